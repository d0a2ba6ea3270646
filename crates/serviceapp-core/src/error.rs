use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceAppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("invalid value '{value}' for {field}")]
    InvalidChoice { field: &'static str, value: String },

    #[error("backend call failed: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

use std::time::Duration;

use thiserror::Error;

/// Why a probe could not report a version. Never fatal: the player is
/// treated as not installed.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to spawn probe: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("probe output contains no JSON object")]
    NoJson,

    #[error("key '{0}' missing from probe output")]
    MissingKey(String),

    #[error("detection cancelled")]
    Cancelled,
}

pub mod backend;
pub mod config;
pub mod error;
pub mod fields;
pub mod models;
pub mod propagator;
pub mod replace_flag;

pub use serviceapp_detect::{DetectionResult, PlayerKind, SinkChoice, SystemPaths};

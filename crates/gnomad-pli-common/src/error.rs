use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PliError {
    /// The values file could not be resolved, found or opened.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No usable gene rows found in {}", .0.display())]
    EmptyDataset(PathBuf),

    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Config file error: {0}")]
    ConfigFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PliError>;

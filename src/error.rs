//! Error types for data loading, configuration and clip storage

/// Result type for TactiCore library operations
pub type Result<T> = std::result::Result<T, TactiCoreError>;

/// Error types for TactiCore library operations
#[derive(thiserror::Error, Debug)]
pub enum TactiCoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Match not found: {0}")]
    MatchNotFound(i64),

    #[error("Invalid clip: {0}")]
    InvalidClip(String),
}

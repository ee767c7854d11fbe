use thiserror::Error;

/// revtrack error types
#[derive(Error, Debug)]
pub enum RevtrackError {
    /// Caller passed an argument outside the accepted range
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Dataset violates an integrity rule (duplicate key, negative amount)
    #[error("validation error: {0}")]
    Validation(String),

    /// Failed to parse a dataset or config file
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for revtrack
pub type Result<T> = std::result::Result<T, RevtrackError>;

//! Error types
//!
//! Nothing here is fatal: load failures become a store-level message, write
//! failures are logged, and rejected input is handed back to the caller.

use thiserror::Error;

/// Reading or writing the persisted submission slot failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Underlying storage I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blob could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The blob was written by a newer format than this build understands.
    #[error("unsupported storage format version {found} (max supported {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// A field failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("name may only contain letters and spaces")]
    InvalidNameCharacters,

    #[error("score {0} is outside 0-100")]
    ScoreOutOfRange(f64),

    #[error("time {0}s is outside 1-3600 seconds")]
    TimeOutOfRange(f64),
}

impl ValidationError {
    /// Name of the form field this error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName
            | ValidationError::NameTooShort { .. }
            | ValidationError::NameTooLong { .. }
            | ValidationError::InvalidNameCharacters => "name",
            ValidationError::ScoreOutOfRange(_) => "score",
            ValidationError::TimeOutOfRange(_) => "time",
        }
    }
}

/// `submit` failed before touching any state.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("submission rejected: {0}")]
    Rejected(#[from] ValidationError),
}

/// Loading a configuration file failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

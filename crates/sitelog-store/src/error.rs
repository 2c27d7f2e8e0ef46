use std::fmt;

/// Result type for sitelog-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the store layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Durable record could not be encoded or decoded
    Serde(serde_json::Error),

    /// Storage location could not be resolved
    Config(String),

    /// A required field is missing or empty; no mutation took place
    Validation {
        field: &'static str,
        message: String,
    },

    /// Referenced id does not exist
    NotFound(String),

    /// Project deletion refused because log entries still reference it
    Blocked { log_count: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation { field, message } => {
                write!(f, "Validation failed for '{}': {}", field, message)
            }
            Error::NotFound(what) => write!(f, "Not found: {}", what),
            Error::Blocked { log_count } => write!(
                f,
                "Cannot delete project: {} log entr{} reference it; delete the logs first",
                log_count,
                if *log_count == 1 { "y" } else { "ies" }
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Serde(err) => Some(err),
            Error::Config(_)
            | Error::Validation { .. }
            | Error::NotFound(_)
            | Error::Blocked { .. } => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

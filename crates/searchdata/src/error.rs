//! Error types for searchdata

use std::fmt;
use std::io;

/// Result type alias shared by the SearchPro crates
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for dataset and cache configuration failures
#[derive(Debug)]
pub enum Error {
    /// I/O error while reading a dataset file
    Io(io::Error),

    /// Dataset text is not a JSON array of records
    Parse(String),

    /// Two records share the same id
    DuplicateId(u64),

    /// Cache constructed with a capacity of zero
    InvalidCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Parse(msg) => write!(f, "Parse error: {}", msg),
            Error::DuplicateId(id) => write!(f, "Duplicate record id: {}", id),
            Error::InvalidCapacity => write!(f, "Cache capacity must be at least 1"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

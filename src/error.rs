// src/error.rs

//! Error types shared by the resolution pipeline

use thiserror::Error;

/// Errors raised while resolving, flattening or cross-checking packages
#[derive(Debug, Error)]
pub enum Error {
    /// The registry has no installed package by this name
    #[error("Package '{0}' is not installed")]
    NotFound(String),

    /// The package stayed missing after every install-and-recheck cycle
    #[error("Tried installing {name} {attempts} times, giving up")]
    AcquisitionExhausted { name: String, attempts: u32 },

    /// A package depends on itself, directly or transitively
    #[error("Circular dependency detected: {}", .path.join(" -> "))]
    CyclicDependency { path: Vec<String> },

    /// An external command could not be run or exited unsuccessfully
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// A collaborator produced output we could not interpret
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for depwalk operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_shows_path() {
        let err = Error::CyclicDependency {
            path: vec!["a".to_string(), "b".to_string(), "a".to_string()],
        };
        assert_eq!(err.to_string(), "Circular dependency detected: a -> b -> a");
    }

    #[test]
    fn test_exhausted_message() {
        let err = Error::AcquisitionExhausted {
            name: "tw2.core".to_string(),
            attempts: 2,
        };
        assert_eq!(err.to_string(), "Tried installing tw2.core 2 times, giving up");
    }
}

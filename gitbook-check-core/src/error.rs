//! Error types for the GitBook checker
//!
//! Loading inputs (the GitBook configuration, the checker expectations) can
//! fail in a small number of well-defined ways. Checks themselves never
//! return these errors to the caller: they fold them into a failed
//! [`CheckOutcome`](crate::report::CheckOutcome) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading checker inputs
#[derive(Debug, Error)]
pub enum GitBookCheckError {
    /// The GitBook configuration file does not exist
    #[error("{} not found", .path.display())]
    ConfigMissing {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The GitBook configuration could not be parsed or lacks a field
    #[error("{reason}")]
    ConfigMalformed {
        /// Path of the offending configuration file
        path:   PathBuf,
        /// Field that is missing, if the document parsed
        field:  Option<&'static str>,
        /// Human-readable reason
        reason: String,
    },

    /// Checker expectations file could not be parsed
    #[error("failed to parse check expectations {}: {reason}", .path.display())]
    Expectations {
        /// Path of the expectations file
        path:   PathBuf,
        /// Parser message
        reason: String,
    },

    /// I/O failure while reading an input file
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read
        path:   PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl GitBookCheckError {
    /// Build a `ConfigMalformed` error for a missing required field
    pub fn missing_field(path: impl Into<PathBuf>, field: &'static str) -> Self {
        Self::ConfigMalformed {
            path:   path.into(),
            field:  Some(field),
            reason: format!("Missing \"{}\" field", field),
        }
    }

    /// Build an I/O error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type used throughout the checker
pub type GitBookResult<T> = Result<T, GitBookCheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = GitBookCheckError::missing_field(".gitbook.yaml", "structure.readme");
        assert_eq!(err.to_string(), "Missing \"structure.readme\" field");
        assert!(matches!(
            err,
            GitBookCheckError::ConfigMalformed {
                field: Some("structure.readme"),
                ..
            }
        ));
    }

    #[test]
    fn test_config_missing_names_path() {
        let err = GitBookCheckError::ConfigMissing {
            path: PathBuf::from("docs/.gitbook.yaml"),
        };
        assert_eq!(err.to_string(), "docs/.gitbook.yaml not found");
    }
}

//! Error types for SWE Common codec operations

use thiserror::Error;

/// Result type alias for SWE Common operations
pub type Result<T> = std::result::Result<T, SweError>;

/// Errors that can occur while encoding or decoding schemas and values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweError {
    /// Input is not valid JSON, or is not shaped like a component document
    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    /// A value tree disagrees with the schema it is bound to
    #[error("Schema mismatch at {path}: expected {expected}, found {found}")]
    SchemaMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// The schema declares a component type this codec does not implement
    #[error("Unsupported component type: {variant}")]
    UnsupportedVariant { variant: String },
}

impl SweError {
    /// Create a malformed document error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Create a schema mismatch error at the given node path
    pub fn mismatch<P, E, F>(path: P, expected: E, found: F) -> Self
    where
        P: Into<String>,
        E: Into<String>,
        F: Into<String>,
    {
        let path = path.into();
        Self::SchemaMismatch {
            path: if path.is_empty() { "/".to_string() } else { path },
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported variant error
    pub fn unsupported<S: Into<String>>(variant: S) -> Self {
        Self::UnsupportedVariant {
            variant: variant.into(),
        }
    }

    /// Path of the failing node, for schema mismatches
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SweError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedDocument {
            message: err.to_string(),
        }
    }
}

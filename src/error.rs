//! Error types for Connected Systems API calls

use swe_common::SweError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by an [`HttpTransport`](crate::net::HttpTransport)
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building, sending or decoding API requests
#[derive(Error, Debug)]
pub enum Error {
    /// Schema or value codec failure, including malformed response bodies
    #[error(transparent)]
    Codec(#[from] SweError),

    /// Server answered with a status outside 200-399
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The transport could not deliver the request
    #[error("Transport error: {source}")]
    Transport {
        #[source]
        source: TransportError,
    },

    /// A request builder precondition was not met
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A resource builder is missing a required property
    #[error("{resource} requires {field}")]
    MissingField {
        resource: &'static str,
        field: &'static str,
    },

    /// A successful response carried no item where one was required
    #[error("Empty response from {url}")]
    EmptyResponse { url: String },

    /// A textual value could not be parsed into an enumeration
    #[error("Invalid {kind}: '{value}'")]
    InvalidValue { kind: &'static str, value: String },
}

impl Error {
    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Wrap a transport failure
    pub fn transport<E>(source: E) -> Self
    where
        E: Into<TransportError>,
    {
        Self::Transport {
            source: source.into(),
        }
    }

    pub(crate) fn invalid_value<S: Into<String>>(kind: &'static str, value: S) -> Self {
        Self::InvalidValue {
            kind,
            value: value.into(),
        }
    }

    /// HTTP status carried by the error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(SweError::from(err))
    }
}

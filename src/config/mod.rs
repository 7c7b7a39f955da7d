use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Connection settings shared by every request a client issues
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the API, e.g. `http://localhost:8181/sensorhub/api`
    pub api_root: String,

    /// Pre-encoded Basic credentials sent as `Authorization: Basic <token>`
    pub authorization_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_root: "http://localhost:8181/sensorhub/api".to_string(),
            authorization_token: None,
        }
    }
}

impl ClientConfig {
    /// Unauthenticated configuration for the given API root
    pub fn new<S: Into<String>>(api_root: S) -> Self {
        Self {
            api_root: api_root.into(),
            authorization_token: None,
        }
    }

    /// Configuration authenticating with HTTP Basic credentials
    pub fn with_credentials<S: Into<String>>(api_root: S, username: &str, password: &str) -> Self {
        Self {
            api_root: api_root.into(),
            authorization_token: Some(STANDARD.encode(format!("{username}:{password}"))),
        }
    }

    /// Use an already encoded Basic token
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.authorization_token = Some(token.into());
        self
    }
}

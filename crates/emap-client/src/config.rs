//! Connection settings for the email-map endpoint.

use std::time::Duration;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP basic-auth credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Settings for [`crate::EmailMapClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `https://records.example.com/service`.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Optional basic-auth credentials.
    pub basic_auth: Option<Credentials>,
}

impl ClientConfig {
    /// Create a config for a server base URL with default timeout and no
    /// authentication.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            basic_auth: None,
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set basic-auth credentials.
    #[must_use]
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.basic_auth = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }
}

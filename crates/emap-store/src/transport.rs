//! Transport seam between the store and the records-management server.

use emap_model::{ChangeSet, Mapping};
use thiserror::Error;

/// Errors surfaced by a transport implementation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Request never produced a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// Response body did not match the expected envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Whether retrying the same request can plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_)
                | Self::UnexpectedStatus {
                    status: 500..=599,
                    ..
                }
        )
    }
}

/// Access to the server's email-map endpoint.
///
/// The store is generic over this trait so the HTTP client stays injectable;
/// tests drive the store with an in-memory implementation instead.
pub trait EmailMapTransport {
    /// Fetch the authoritative mapping list.
    fn fetch_mappings(&self) -> Result<Vec<Mapping>, TransportError>;

    /// Submit staged changes as one batched request, returning the refreshed
    /// mapping list the server now holds.
    fn submit_changes(&self, changes: &ChangeSet) -> Result<Vec<Mapping>, TransportError>;
}

//! Error types for store operations.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors from [`crate::MappingStore`] operations.
///
/// Neither variant is fatal: the store's state is specified for each failure
/// (load leaves everything untouched, save keeps the staged buffers) and the
/// caller may retry or discard.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Fetching the mapping list failed; store state is unchanged.
    #[error("failed to load mappings: {0}")]
    LoadFailed(#[source] TransportError),

    /// Submitting staged changes failed; pending buffers are kept.
    #[error("failed to save mapping changes: {0}")]
    SaveFailed(#[source] TransportError),
}

impl StoreError {
    /// A message suitable for direct display to the user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::LoadFailed(_) => "Could not load the email mappings from the server.",
            Self::SaveFailed(_) => {
                "Could not save the mapping changes. Your staged changes were kept."
            }
        }
    }

    /// Whether retrying the failed operation can plausibly succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::LoadFailed(source) | Self::SaveFailed(source) => source.is_retryable(),
        }
    }
}

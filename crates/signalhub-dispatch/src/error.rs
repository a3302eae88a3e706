//! Error types for the dispatch engine.

use thiserror::Error;

use crate::directory::DirectoryError;
use signalhub_storage::StorageError;

/// Errors surfaced by dispatch engine operations.
///
/// Expected outcomes are not errors: `claim_next` returns `Ok(None)` when
/// nothing is deliverable, and `release`/`complete` return `Ok(false)` when
/// the claim is no longer valid. This enum covers caller bugs
/// (`InvalidClaimView`) and infrastructure failures, which are propagated
/// without retry - retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The view passed to release/complete does not describe a claim: it must
    /// carry exactly one recipient with `signaler_id` set.
    #[error("invalid claim view: {0}")]
    InvalidClaimView(String),

    /// The message store failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The channel directory failed.
    #[error("channel directory error: {0}")]
    Directory(#[from] DirectoryError),
}

impl DispatchError {
    /// Creates a new `InvalidClaimView` error.
    #[must_use]
    pub fn invalid_claim_view(message: impl Into<String>) -> Self {
        Self::InvalidClaimView(message.into())
    }

    /// Returns `true` if this error indicates a caller bug rather than an
    /// infrastructure failure.
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidClaimView(_))
    }
}

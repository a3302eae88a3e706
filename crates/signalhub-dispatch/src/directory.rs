//! Channel directory: lookup of the channels configured for a recipient.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

use signalhub_core::Channel;

/// Errors from channel directory lookups.
///
/// An entry with no configured channels is not an error - `channels_for`
/// returns an empty list for it.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Failed to reach the directory backend.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// An internal directory error occurred.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DirectoryError {
    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Read-only lookup of the channels configured for an address book entry or
/// resource.
///
/// The dispatch engine queries this per claim candidate when a channel filter
/// is requested. Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait ChannelDirectory: Send + Sync {
    /// Returns the channels configured for the given entry id.
    ///
    /// An unknown entry yields an empty list, not an error.
    async fn channels_for(&self, entry_id: &str) -> Result<Vec<Channel>, DirectoryError>;
}

/// Type alias for a shareable channel directory trait object.
pub type DynChannelDirectory = Arc<dyn ChannelDirectory>;

/// In-process channel directory backed by a map, for local mode and tests.
#[derive(Debug, Default)]
pub struct StaticChannelDirectory {
    channels: RwLock<HashMap<String, Vec<Channel>>>,
}

impl StaticChannelDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the channels configured for the given entry.
    pub async fn set_channels(&self, entry_id: impl Into<String>, channels: Vec<Channel>) {
        let mut guard = self.channels.write().await;
        guard.insert(entry_id.into(), channels);
    }
}

#[async_trait]
impl ChannelDirectory for StaticChannelDirectory {
    async fn channels_for(&self, entry_id: &str) -> Result<Vec<Channel>, DirectoryError> {
        let guard = self.channels.read().await;
        let mut channels = guard.get(entry_id).cloned().unwrap_or_default();
        // Higher priority channels come first, matching the address book's
        // suggestion order.
        channels.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(channels)
    }
}

//! Read-only message views: full listings and per-role mailboxes.

use std::sync::Arc;

use tracing::instrument;

use signalhub_core::{Message, Participant};
use signalhub_storage::{MessageFilters, MessageStore, StorageError};

/// Read-only access to stored messages.
///
/// Unlike the dispatch engine this never writes, so it takes no lock; callers
/// get a snapshot that may be concurrently superseded.
pub struct MailboxReader {
    store: Arc<dyn MessageStore>,
}

impl MailboxReader {
    /// Creates a reader over the given store.
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Returns all stored messages, optionally narrowed by `filters`.
    #[instrument(skip(self, filters), level = "debug")]
    pub async fn messages(
        &self,
        filters: Option<&MessageFilters>,
    ) -> Result<Vec<Message>, StorageError> {
        let messages = self.store.list_all().await?;
        match filters {
            None => Ok(messages),
            Some(filters) => Ok(messages
                .into_iter()
                .filter(|m| filters.matches(m))
                .collect()),
        }
    }

    /// Returns the messages addressed to the given role whose read flag
    /// equals `read`.
    ///
    /// Only `Role` recipients participate; a recipient whose read flag was
    /// never set matches neither mailbox.
    #[instrument(skip(self), level = "debug")]
    pub async fn mailbox_messages(
        &self,
        role_id: &str,
        read: bool,
    ) -> Result<Vec<Message>, StorageError> {
        let messages = self.store.list_all().await?;
        Ok(messages
            .into_iter()
            .filter(|m| {
                m.recipients.iter().any(|r| {
                    r.recipient_type == Participant::Role
                        && r.recipient_id == role_id
                        && r.read == Some(read)
                })
            })
            .collect())
    }
}

//! Storage traits for the message store abstraction layer.

use async_trait::async_trait;

use crate::error::StorageError;
use signalhub_core::{Message, MessageDirection};

/// The storage trait that all message store backends must implement.
///
/// Implementations must be thread-safe (`Send + Sync`). The dispatch engine
/// drives all claim-state persistence through `replace`, so `replace` must be
/// last-writer-wins per message id; callers that need read-modify-write
/// atomicity across `list_all`/`find_by_id` and `replace` serialize those
/// sections themselves.
///
/// # Example
///
/// ```ignore
/// use signalhub_storage::{MessageStore, StorageError};
/// use signalhub_core::Message;
///
/// async fn outstanding(store: &dyn MessageStore) -> Result<Vec<Message>, StorageError> {
///     let all = store.list_all().await?;
///     Ok(all.into_iter().filter(|m| m.is_dispatchable()).collect())
/// }
/// ```
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Reads a message by id.
    ///
    /// Returns `None` if the message does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error only for infrastructure issues, not for missing
    /// messages.
    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, StorageError>;

    /// Persists a new message and assigns its id.
    ///
    /// Any id on the input is ignored; the store owns id assignment. Returns
    /// the stored copy carrying the assigned id.
    async fn save(&self, message: Message) -> Result<Message, StorageError>;

    /// Replaces the stored message with the same id, last-writer-wins.
    ///
    /// Returns `false` if no message with that id exists (it may have been
    /// deleted concurrently). This is the optimistic-concurrency primitive
    /// the dispatch engine builds on.
    async fn replace(&self, message: &Message) -> Result<bool, StorageError>;

    /// Returns all messages in store order.
    ///
    /// Store order is insertion order and must be stable across calls: the
    /// claim-next scan's tie-break depends on it.
    async fn list_all(&self) -> Result<Vec<Message>, StorageError>;

    /// Returns the name of this storage backend for logging/debugging.
    fn backend_name(&self) -> &'static str;
}

/// Search criteria for read-only message views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFilters {
    /// Keep only messages with this direction.
    pub by_direction: Option<MessageDirection>,
    /// Keep only messages whose review flag matches.
    pub by_needs_review: Option<bool>,
}

impl MessageFilters {
    /// Creates an empty filter set that matches every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to the given direction.
    #[must_use]
    pub fn with_direction(mut self, direction: MessageDirection) -> Self {
        self.by_direction = Some(direction);
        self
    }

    /// Restricts to messages whose review flag matches.
    #[must_use]
    pub fn with_needs_review(mut self, needs_review: bool) -> Self {
        self.by_needs_review = Some(needs_review);
        self
    }

    /// Whether the message passes every set criterion.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        if let Some(direction) = self.by_direction
            && message.direction != direction
        {
            return false;
        }
        if let Some(needs_review) = self.by_needs_review
            && message.needs_review != needs_review
        {
            return false;
        }
        true
    }
}

//! In-memory message store backend for signalhub.
//!
//! This crate provides an in-memory implementation of the `MessageStore`
//! trait from `signalhub-storage`, using a papaya lock-free HashMap for
//! concurrent access. It backs the local/desktop mode and the test suites.
//!
//! # Example
//!
//! ```ignore
//! use signalhub_db_memory::InMemoryMessageStore;
//! use signalhub_storage::MessageStore;
//!
//! let store = InMemoryMessageStore::new();
//! let stored = store.save(message).await?;
//! assert!(!stored.id.is_empty());
//! ```

mod store;

pub use store::InMemoryMessageStore;

// Re-export the MessageStore trait for convenience
pub use signalhub_storage::{MessageStore, StorageError};

/// Creates a new shareable in-memory message store.
pub fn create_message_store() -> signalhub_storage::DynMessageStore {
    std::sync::Arc::new(InMemoryMessageStore::new())
}

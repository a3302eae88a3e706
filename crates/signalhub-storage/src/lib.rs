//! # signalhub-storage
//!
//! Storage abstraction layer for signalhub messages.
//!
//! This crate defines the [`MessageStore`] trait that all message storage
//! backends must implement. It does not contain any implementations - those
//! are provided by separate crates such as `signalhub-db-memory`.
//!
//! ## Overview
//!
//! The contract is deliberately narrow: the dispatch engine only needs
//! keyed reads, a store-order scan, and a full replace-by-id that doubles as
//! the optimistic-concurrency primitive.
//!
//! ```ignore
//! use signalhub_storage::{MessageStore, StorageError};
//! use signalhub_core::Message;
//!
//! async fn reload(store: &dyn MessageStore, id: &str) -> Result<Message, StorageError> {
//!     store
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| StorageError::not_found(id))
//! }
//! ```

mod error;
mod traits;

pub use error::{ErrorCategory, StorageError};
pub use traits::{MessageFilters, MessageStore};

/// Type alias for a storage result.
pub type StorageResult<T> = Result<T, StorageError>;

/// Type alias for a shareable message store trait object.
pub type DynMessageStore = std::sync::Arc<dyn MessageStore>;

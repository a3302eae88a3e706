//! # signalhub-dispatch
//!
//! The message delivery dispatch engine: hands outgoing messages, addressed
//! to multiple recipients over multiple communication channels, one at a time
//! to signalers for manual delivery.
//!
//! Each (message, recipient) pair is a separate unit of work tracked through
//! claim → deliver-or-abandon → complete, with the guarantee that no two
//! signalers ever hold the same pair.
//!
//! ## Overview
//!
//! [`DispatchEngine`] is the caller-facing API:
//! - [`DispatchEngine::claim_next`] - scan for the first deliverable
//!   recipient, optionally constrained to a channel type, and claim it.
//! - [`DispatchEngine::release`] - abandon a claim.
//! - [`DispatchEngine::complete`] - confirm delivery.
//!
//! The engine is stateless apart from its collaborators: a [`MessageStore`]
//! (persistence of claim state) and a [`ChannelDirectory`] (channel
//! eligibility lookups). [`MailboxReader`] provides the thin read-only views
//! for role mailboxes.
//!
//! ```ignore
//! use signalhub_dispatch::DispatchEngine;
//!
//! let engine = DispatchEngine::new(store, directory);
//! if let Some(view) = engine.claim_next("sig1", Some(ChannelType::Radio)).await? {
//!     // deliver over the radio, then:
//!     engine.complete(&view).await?;
//! }
//! ```

mod directory;
mod eligibility;
mod engine;
mod error;
mod mailbox;

pub use directory::{ChannelDirectory, DirectoryError, DynChannelDirectory, StaticChannelDirectory};
pub use eligibility::channel_eligible;
pub use engine::DispatchEngine;
pub use error::DispatchError;
pub use mailbox::MailboxReader;

// Re-exported for callers wiring up an engine.
pub use signalhub_storage::{DynMessageStore, MessageFilters, MessageStore};

/// Type alias for a dispatch result.
pub type DispatchResult<T> = Result<T, DispatchError>;

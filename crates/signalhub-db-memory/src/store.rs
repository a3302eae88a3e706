use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use papaya::HashMap as PapayaHashMap;

use signalhub_core::Message;
use signalhub_storage::{MessageStore, StorageError};

/// A stored message paired with its insertion sequence number.
///
/// The sequence is what makes `list_all` return store order: papaya's
/// iteration order is arbitrary, and the claim-next tie-break depends on
/// insertion order being stable.
#[derive(Debug, Clone)]
struct StoredMessage {
    seq: u64,
    message: Message,
}

/// In-memory message store using a papaya lock-free HashMap.
///
/// `replace` is last-writer-wins per message id, as the `MessageStore`
/// contract requires; callers needing read-modify-write atomicity across a
/// scan and a replace serialize those sections themselves.
#[derive(Debug)]
pub struct InMemoryMessageStore {
    data: Arc<PapayaHashMap<String, StoredMessage>>,
    /// Monotonic counter assigning insertion sequence numbers.
    seq_counter: AtomicU64,
}

impl InMemoryMessageStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(PapayaHashMap::new()),
            seq_counter: AtomicU64::new(1),
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq_counter.fetch_add(1, Ordering::SeqCst)
    }

    /// Number of messages currently stored.
    pub fn count(&self) -> usize {
        self.data.pin().len()
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Message>, StorageError> {
        let guard = self.data.pin();
        Ok(guard.get(id).map(|stored| stored.message.clone()))
    }

    async fn save(&self, message: Message) -> Result<Message, StorageError> {
        let mut message = message;
        message.id = uuid::Uuid::new_v4().to_string();

        let stored = StoredMessage {
            seq: self.next_seq(),
            message: message.clone(),
        };
        let guard = self.data.pin();
        guard.insert(message.id.clone(), stored);

        Ok(message)
    }

    async fn replace(&self, message: &Message) -> Result<bool, StorageError> {
        if message.id.is_empty() {
            return Err(StorageError::internal(
                "replace called with an unsaved message (empty id)",
            ));
        }

        let guard = self.data.pin();
        let Some(existing) = guard.get(&message.id) else {
            return Ok(false);
        };

        // Keep the original insertion sequence so the scan order is stable
        // across replaces.
        let stored = StoredMessage {
            seq: existing.seq,
            message: message.clone(),
        };
        guard.insert(message.id.clone(), stored);
        Ok(true)
    }

    async fn list_all(&self) -> Result<Vec<Message>, StorageError> {
        let guard = self.data.pin();
        let mut entries: Vec<StoredMessage> = guard.iter().map(|(_, v)| v.clone()).collect();
        entries.sort_by_key(|stored| stored.seq);
        Ok(entries.into_iter().map(|stored| stored.message).collect())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

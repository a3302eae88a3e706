//! The dispatch engine: claim, release and complete operations over
//! undelivered message/recipient pairs.

use std::sync::Arc;

use futures_util::future;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::directory::ChannelDirectory;
use crate::eligibility::channel_eligible;
use crate::error::DispatchError;
use signalhub_core::{ChannelType, Message, Recipient};
use signalhub_storage::MessageStore;

/// Hands out deliverable (message, recipient) pairs to signalers, one at a
/// time, and persists their claim state through the message store.
///
/// The engine itself is stateless apart from its collaborators; all claim
/// state lives in the stored messages. Claim-state writes are
/// read-modify-write against a last-writer-wins store, so every mutating
/// operation runs under a per-engine lock - this is what upholds the
/// at-most-one-claim invariant when signalers race.
pub struct DispatchEngine {
    store: Arc<dyn MessageStore>,
    directory: Arc<dyn ChannelDirectory>,
    write_lock: Mutex<()>,
}

impl DispatchEngine {
    /// Creates an engine over the given store and channel directory.
    pub fn new(store: Arc<dyn MessageStore>, directory: Arc<dyn ChannelDirectory>) -> Self {
        Self {
            store,
            directory,
            write_lock: Mutex::new(()),
        }
    }

    /// Claims the next deliverable recipient for `signaler_id`.
    ///
    /// Scans messages in store order and recipients in list order, skipping
    /// messages that are not outgoing and review-cleared, and recipients that
    /// are not address book entries or resources, already sent, or already
    /// claimed. With a `channel_filter`, a candidate is only eligible if the
    /// channel directory knows an active channel matching the recipient's
    /// selected channel id and the wanted type.
    ///
    /// Returns the message projected to the single claimed recipient, or
    /// `None` when nothing is deliverable right now - including the case
    /// where the selected message vanished before the claim could be
    /// persisted (no automatic retry).
    #[instrument(skip(self), level = "debug")]
    pub async fn claim_next(
        &self,
        signaler_id: &str,
        channel_filter: Option<ChannelType>,
    ) -> Result<Option<Message>, DispatchError> {
        let _guard = self.write_lock.lock().await;

        let messages = self.store.list_all().await?;

        // Candidate (message index, recipient index) pairs in scan order.
        // This order is the tie-break: earliest message, then earliest
        // recipient within it, wins.
        let mut candidates: Vec<(usize, usize)> = Vec::new();
        for (mi, message) in messages.iter().enumerate() {
            if !message.is_dispatchable() {
                continue;
            }
            for (ri, recipient) in message.recipients.iter().enumerate() {
                if recipient.is_deliverable() {
                    candidates.push((mi, ri));
                }
            }
        }

        let selected = match channel_filter {
            None => candidates.first().copied(),
            Some(wanted) => {
                // Resolve eligibility for every candidate before selecting.
                // join_all preserves candidate order, so selection stays
                // deterministic no matter which lookup resolves first.
                let lookups = candidates.iter().map(|&(mi, ri)| {
                    self.directory
                        .channels_for(&messages[mi].recipients[ri].recipient_id)
                });
                let channel_lists: Vec<_> = future::join_all(lookups)
                    .await
                    .into_iter()
                    .collect::<Result<_, _>>()?;

                candidates
                    .iter()
                    .zip(channel_lists.iter())
                    .find(|((mi, ri), channels)| {
                        let recipient = &messages[*mi].recipients[*ri];
                        channel_eligible(recipient.channel_id.as_deref(), wanted, channels)
                    })
                    .map(|(&pair, _)| pair)
            }
        };

        let Some((mi, ri)) = selected else {
            debug!(signaler_id, "no deliverable recipient");
            return Ok(None);
        };

        let mut message = messages[mi].clone();
        message.recipients[ri].signaler_id = Some(signaler_id.to_string());

        if !self.store.replace(&message).await? {
            debug!(
                message_id = %message.id,
                "selected message vanished before the claim was persisted"
            );
            return Ok(None);
        }

        debug!(
            message_id = %message.id,
            recipient_id = %message.recipients[ri].recipient_id,
            signaler_id,
            "claimed recipient"
        );
        Ok(message.with_single_recipient(ri))
    }

    /// Abandons the claim described by `view`, making the recipient
    /// deliverable again.
    ///
    /// `view` must be a claim projection as returned by [`claim_next`]:
    /// exactly one recipient with `signaler_id` set. The recipient is
    /// re-located in the freshly loaded message by its
    /// `(recipient_type, recipient_id, signaler_id)` triple; returns `false`
    /// when the message or a matching claim no longer exists.
    ///
    /// [`claim_next`]: DispatchEngine::claim_next
    #[instrument(skip(self, view), fields(message_id = %view.id), level = "debug")]
    pub async fn release(&self, view: &Message) -> Result<bool, DispatchError> {
        let claimed = Self::claimed_recipient(view)?;

        let _guard = self.write_lock.lock().await;

        let Some(mut message) = self.store.find_by_id(&view.id).await? else {
            return Ok(false);
        };
        let Some(recipient) = message
            .recipients
            .iter_mut()
            .find(|r| !r.send && r.matches_claim(claimed))
        else {
            return Ok(false);
        };

        recipient.signaler_id = None;
        let replaced = self.store.replace(&message).await?;
        debug!(released = replaced, "released claim");
        Ok(replaced)
    }

    /// Confirms delivery for the claim described by `view`.
    ///
    /// Same matching rules as [`release`]; on a match the recipient's `send`
    /// flag is set and the claim is cleared in the same write, so a completed
    /// recipient never carries a live claim and can never be claimed or
    /// released again.
    ///
    /// [`release`]: DispatchEngine::release
    #[instrument(skip(self, view), fields(message_id = %view.id), level = "debug")]
    pub async fn complete(&self, view: &Message) -> Result<bool, DispatchError> {
        let claimed = Self::claimed_recipient(view)?;

        let _guard = self.write_lock.lock().await;

        let Some(mut message) = self.store.find_by_id(&view.id).await? else {
            return Ok(false);
        };
        let Some(recipient) = message
            .recipients
            .iter_mut()
            .find(|r| !r.send && r.matches_claim(claimed))
        else {
            return Ok(false);
        };

        recipient.send = true;
        recipient.signaler_id = None;
        let replaced = self.store.replace(&message).await?;
        debug!(completed = replaced, "marked recipient as sent");
        Ok(replaced)
    }

    /// Validates that `view` is a claim projection and returns its recipient.
    fn claimed_recipient(view: &Message) -> Result<&Recipient, DispatchError> {
        if view.recipients.len() != 1 {
            return Err(DispatchError::invalid_claim_view(format!(
                "expected exactly one recipient, got {}",
                view.recipients.len()
            )));
        }
        let recipient = &view.recipients[0];
        if recipient.signaler_id.is_none() {
            return Err(DispatchError::invalid_claim_view(
                "recipient carries no signaler id",
            ));
        }
        Ok(recipient)
    }
}

use crate::channel::ChannelType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Participants of the system that are addressable in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Participant {
    AddressBookEntry,
    Resource,
    Role,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressBookEntry => write!(f, "address-book-entry"),
            Self::Resource => write!(f, "resource"),
            Self::Role => write!(f, "role"),
        }
    }
}

impl FromStr for Participant {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "address-book-entry" => Ok(Self::AddressBookEntry),
            "resource" => Ok(Self::Resource),
            "role" => Ok(Self::Role),
            other => Err(crate::CoreError::invalid_participant(other)),
        }
    }
}

/// Direction of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// One delivery obligation of a message.
///
/// A recipient is a sub-entity of [`Message`] with no independent lifecycle.
/// Claim state lives in `signaler_id`; confirmed delivery in `send`. Once
/// `send` is true the recipient is terminally done and can neither be claimed
/// nor released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub recipient_type: Participant,
    pub recipient_id: String,
    /// Channel selected for delivery. Only meaningful for address book entry
    /// and resource recipients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    /// Whether the recipient already read the message. Only tracked for role
    /// recipients in mailbox contexts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read: Option<bool>,
    /// True once delivery to this recipient was confirmed.
    #[serde(default)]
    pub send: bool,
    /// User id of the signaler currently holding the claim on this recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signaler_id: Option<String>,
}

impl Recipient {
    pub fn new(recipient_type: Participant, recipient_id: impl Into<String>) -> Self {
        Self {
            recipient_type,
            recipient_id: recipient_id.into(),
            channel_id: None,
            read: None,
            send: false,
            signaler_id: None,
        }
    }

    pub fn with_channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = Some(channel_id.into());
        self
    }

    pub fn with_read(mut self, read: bool) -> Self {
        self.read = Some(read);
        self
    }

    /// Whether this recipient kind is handed out to signalers at all. Role
    /// recipients represent organizational broadcast and are handled by the
    /// mailbox instead.
    pub fn is_dispatch_target(&self) -> bool {
        matches!(
            self.recipient_type,
            Participant::AddressBookEntry | Participant::Resource
        )
    }

    /// Whether this recipient can be claimed right now: a dispatch target
    /// that is neither already delivered nor held by another signaler.
    pub fn is_deliverable(&self) -> bool {
        self.is_dispatch_target() && !self.send && self.signaler_id.is_none()
    }

    /// Structural claim identity: `(recipient_type, recipient_id,
    /// signaler_id)`. Claimed recipients are re-located by this triple rather
    /// than by list index, since concurrent operations may have mutated
    /// sibling recipients in the meantime.
    pub fn matches_claim(&self, other: &Recipient) -> bool {
        self.recipient_type == other.recipient_type
            && self.recipient_id == other.recipient_id
            && self.signaler_id == other.signaler_id
    }
}

/// An incoming or outgoing message in the system.
///
/// Everything besides `id`, `direction`, `needs_review` and `recipients` is
/// descriptive payload that the dispatch engine carries through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Identifies the message. Assigned by the store on creation and
    /// immutable thereafter.
    #[serde(default)]
    pub id: String,
    pub direction: MessageDirection,
    /// Type of channel an incoming message arrived on (e.g. radio or email).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_channel_type: Option<ChannelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_type: Option<Participant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    /// Additional information about the sender (mail address, call sign, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// New status code of the sending resource, if the sender is a resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_status_code: Option<i32>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Outgoing messages with `needs_review` set are withheld from dispatch
    /// until a reviewer clears them.
    #[serde(default)]
    pub needs_review: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Ordered recipient list. Order is significant: it determines the
    /// claim-next tie-break and must survive persistence round-trips.
    #[serde(default)]
    pub recipients: Vec<Recipient>,
}

impl Message {
    pub fn new(direction: MessageDirection, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            direction,
            incoming_channel_type: None,
            sender_type: None,
            sender_id: None,
            info: None,
            content: content.into(),
            incident_id: None,
            operation_id: None,
            resource_status_code: None,
            created_at: OffsetDateTime::now_utc(),
            needs_review: false,
            priority: None,
            recipients: Vec::new(),
        }
    }

    pub fn with_sender(mut self, sender_type: Participant, sender_id: impl Into<String>) -> Self {
        self.sender_type = Some(sender_type);
        self.sender_id = Some(sender_id.into());
        self
    }

    pub fn with_recipients(mut self, recipients: Vec<Recipient>) -> Self {
        self.recipients = recipients;
        self
    }

    pub fn with_needs_review(mut self, needs_review: bool) -> Self {
        self.needs_review = needs_review;
        self
    }

    pub fn with_incident(mut self, incident_id: impl Into<String>) -> Self {
        self.incident_id = Some(incident_id.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Whether this message is a dispatch source at all: outgoing and cleared
    /// for review. Recipient-level eligibility is checked separately.
    pub fn is_dispatchable(&self) -> bool {
        self.direction == MessageDirection::Outgoing && !self.needs_review
    }

    /// Copy of this message with `recipients` reduced to the single entry at
    /// `index`. This is the projection handed to a signaler after a claim, so
    /// the caller can neither see nor mutate sibling recipients.
    pub fn with_single_recipient(&self, index: usize) -> Option<Message> {
        let recipient = self.recipients.get(index)?.clone();
        let mut projected = self.clone();
        projected.recipients = vec![recipient];
        Some(projected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outgoing_recipient() -> Recipient {
        Recipient::new(Participant::AddressBookEntry, "jan").with_channel_id("c1")
    }

    #[test]
    fn test_deliverable_predicate() {
        let recipient = outgoing_recipient();
        assert!(recipient.is_deliverable());

        let mut claimed = outgoing_recipient();
        claimed.signaler_id = Some("sig1".to_string());
        assert!(!claimed.is_deliverable());

        let mut sent = outgoing_recipient();
        sent.send = true;
        assert!(!sent.is_deliverable());

        let role = Recipient::new(Participant::Role, "s1");
        assert!(!role.is_deliverable());
    }

    #[test]
    fn test_matches_claim_is_a_triple_match() {
        let mut claimed = outgoing_recipient();
        claimed.signaler_id = Some("sig1".to_string());

        let mut same = outgoing_recipient();
        same.signaler_id = Some("sig1".to_string());
        assert!(same.matches_claim(&claimed));

        let mut other_signaler = outgoing_recipient();
        other_signaler.signaler_id = Some("sig2".to_string());
        assert!(!other_signaler.matches_claim(&claimed));

        let mut other_id = claimed.clone();
        other_id.recipient_id = "piotr".to_string();
        assert!(!other_id.matches_claim(&claimed));

        let mut other_type = claimed.clone();
        other_type.recipient_type = Participant::Resource;
        assert!(!other_type.matches_claim(&claimed));
    }

    #[test]
    fn test_dispatchable_predicate() {
        let outgoing = Message::new(MessageDirection::Outgoing, "move to sector 2");
        assert!(outgoing.is_dispatchable());

        let under_review = Message::new(MessageDirection::Outgoing, "draft").with_needs_review(true);
        assert!(!under_review.is_dispatchable());

        let incoming = Message::new(MessageDirection::Incoming, "status report");
        assert!(!incoming.is_dispatchable());
    }

    #[test]
    fn test_single_recipient_projection() {
        let message = Message::new(MessageDirection::Outgoing, "hello").with_recipients(vec![
            Recipient::new(Participant::Role, "s1"),
            outgoing_recipient(),
        ]);

        let projected = message.with_single_recipient(1).unwrap();
        assert_eq!(projected.recipients.len(), 1);
        assert_eq!(projected.recipients[0].recipient_id, "jan");
        assert_eq!(projected.content, message.content);

        assert!(message.with_single_recipient(2).is_none());
    }

    #[test]
    fn test_recipient_order_survives_serde_round_trip() {
        let message = Message::new(MessageDirection::Outgoing, "ordered").with_recipients(vec![
            Recipient::new(Participant::AddressBookEntry, "a"),
            Recipient::new(Participant::Resource, "b"),
            Recipient::new(Participant::Role, "c"),
        ]);

        let json = serde_json::to_string(&message).unwrap();
        let restored: Message = serde_json::from_str(&json).unwrap();
        let ids: Vec<&str> = restored
            .recipients
            .iter()
            .map(|r| r.recipient_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_participant_round_trip() {
        for p in [
            Participant::AddressBookEntry,
            Participant::Resource,
            Participant::Role,
        ] {
            let parsed: Participant = p.to_string().parse().unwrap();
            assert_eq!(parsed, p);
        }
        assert!("operator".parse::<Participant>().is_err());
    }
}

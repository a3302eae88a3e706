use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::Duration;

/// Supported channel types over which outgoing messages can be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChannelType {
    Radio,
    Email,
    InAppNotification,
    PhoneCall,
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radio => write!(f, "radio"),
            Self::Email => write!(f, "email"),
            Self::InAppNotification => write!(f, "in-app-notification"),
            Self::PhoneCall => write!(f, "phone-call"),
        }
    }
}

impl FromStr for ChannelType {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "radio" => Ok(Self::Radio),
            "email" => Ok(Self::Email),
            "in-app-notification" => Ok(Self::InAppNotification),
            "phone-call" => Ok(Self::PhoneCall),
            other => Err(crate::CoreError::invalid_channel_type(other)),
        }
    }
}

/// A configured communication path of an address book entry.
///
/// Channels are ways of delivering messages to recipients: an email channel
/// carries the message to a target address, a radio channel forwards it to a
/// signaler who calls the recipient. Channels are owned by the address book
/// and read-only to the dispatch engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Identifies the channel.
    pub id: String,
    /// Id of the owning address book entry.
    pub entry: String,
    /// Human-readable label.
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub channel_type: ChannelType,
    /// Channels with higher priority are preferred for delivery.
    #[serde(default)]
    pub priority: i32,
    /// Minimum importance a message must carry to suggest this channel.
    #[serde(default)]
    pub min_importance: i32,
    /// Delivery is considered failed after this timeout without a response.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    /// Inactive channels stay configured but are excluded from delivery.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_timeout() -> Duration {
    Duration::minutes(10)
}

fn default_active() -> bool {
    true
}

impl Channel {
    pub fn new(
        id: impl Into<String>,
        entry: impl Into<String>,
        channel_type: ChannelType,
    ) -> Self {
        Self {
            id: id.into(),
            entry: entry.into(),
            label: String::new(),
            channel_type,
            priority: 0,
            min_importance: 0,
            timeout: Duration::minutes(10),
            is_active: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_type_round_trip() {
        for t in [
            ChannelType::Radio,
            ChannelType::Email,
            ChannelType::InAppNotification,
            ChannelType::PhoneCall,
        ] {
            let parsed: ChannelType = t.to_string().parse().unwrap();
            assert_eq!(parsed, t);
        }
        assert!("smoke-signal".parse::<ChannelType>().is_err());
    }

    #[test]
    fn test_channel_type_wire_format() {
        let json = serde_json::to_string(&ChannelType::InAppNotification).unwrap();
        assert_eq!(json, r#""in-app-notification""#);
    }

    #[test]
    fn test_channel_defaults() {
        let channel = Channel::new("c1", "jan", ChannelType::Radio);
        assert!(channel.is_active);
        assert_eq!(channel.timeout, Duration::minutes(10));

        let inactive = Channel::new("c2", "jan", ChannelType::Email).inactive();
        assert!(!inactive.is_active);
    }
}

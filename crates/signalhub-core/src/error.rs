use thiserror::Error;

/// Core error types for signalhub domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid channel type: {0}")]
    InvalidChannelType(String),

    #[error("Invalid participant type: {0}")]
    InvalidParticipant(String),

    #[error("Invalid message direction: {0}")]
    InvalidDirection(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),

    #[error("Invalid message data: {message}")]
    InvalidMessage { message: String },
}

impl CoreError {
    /// Create a new InvalidChannelType error
    pub fn invalid_channel_type(channel_type: impl Into<String>) -> Self {
        Self::InvalidChannelType(channel_type.into())
    }

    /// Create a new InvalidParticipant error
    pub fn invalid_participant(participant: impl Into<String>) -> Self {
        Self::InvalidParticipant(participant.into())
    }

    /// Create a new InvalidMessage error
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }
}

/// Result type alias using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_channel_type("carrier-pigeon");
        assert_eq!(err.to_string(), "Invalid channel type: carrier-pigeon");

        let err = CoreError::invalid_message("recipients missing");
        assert_eq!(err.to_string(), "Invalid message data: recipients missing");
    }
}

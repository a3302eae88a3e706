pub mod channel;
pub mod error;
pub mod message;

pub use channel::{Channel, ChannelType};
pub use error::{CoreError, Result};
pub use message::{Message, MessageDirection, Participant, Recipient};

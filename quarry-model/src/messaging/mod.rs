//! Messaging entities: channels and messages.

mod channel;
mod message;

pub use channel::{Channel, ChannelType, MembershipPolicy};
pub use message::Message;

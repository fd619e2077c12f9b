//! Conversation and messaging domain.

pub mod api;
pub mod model;
pub mod search;

pub use api::{ChatApi, MessageHistory, SendMessage, SentMessage};
pub use model::{Conversation, Message, MessageKind};
pub use search::filter_by_participant;

//! Conversation state.

use swapmarket_core::chat::{Conversation, Message};

/// Lifecycle of the currently open message thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadState {
    /// No thread open, or the open thread has no messages yet
    #[default]
    Idle,
    /// A message fetch for the open thread is in flight
    Loading,
    /// The open thread's messages are populated
    Loaded,
    /// A send for the open thread is in flight
    Sending,
}

/// Snapshot of the conversation store's state.
///
/// `conversations` is a cache of the server's list, replaced wholesale on
/// each successful full fetch and kept sorted by most recent activity.
/// `messages` belong to `current_conversation` only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    pub current_conversation: Option<Conversation>,
    pub messages: Vec<Message>,
    pub thread: ThreadState,
    /// Message of the most recent failed operation, for display
    pub error: Option<String>,
}

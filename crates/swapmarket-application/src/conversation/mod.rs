//! Conversation list and open-thread state.

pub mod state;
pub mod store;

pub use state::{ChatState, ThreadState};
pub use store::ConversationStore;

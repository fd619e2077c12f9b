//! # swapmarket-application
//!
//! The client's state machines: the authentication session and the
//! conversation store. Both own their state behind async locks, expose
//! cloned snapshots to readers, and talk to the network only through the
//! collaborator traits defined in `swapmarket-core`.

pub mod conversation;
pub mod session;

pub use conversation::{ChatState, ConversationStore, ThreadState};
pub use session::{AuthState, AuthStatus, SessionManager};

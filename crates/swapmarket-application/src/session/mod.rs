//! Authentication session lifecycle.

pub mod manager;
pub mod state;

pub use manager::SessionManager;
pub use state::{AuthState, AuthStatus};

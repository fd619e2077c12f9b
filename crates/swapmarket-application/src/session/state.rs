//! Session state.

use swapmarket_core::user::User;

/// Where the session lifecycle currently stands.
///
/// `Unknown` exists only before the first `check_auth_status` completes;
/// after that the state is always one of the two settled variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    /// Process started, stored credential not yet checked
    #[default]
    Unknown,
    /// No valid credential
    Unauthenticated,
    /// Valid credential and verified user
    Authenticated,
}

/// Snapshot of the session manager's state.
///
/// Invariant: `user` is present only when `token` is present. The reverse
/// can hold transiently while a stored credential is being re-verified.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// Opaque bearer token proving the session to the remote API
    pub token: Option<String>,
    pub status: AuthStatus,
    /// True until the initial stored-credential check completes
    pub is_loading: bool,
    /// Message of the most recent failed auth operation, for display
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            token: None,
            status: AuthStatus::Unknown,
            is_loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// A settled unauthenticated state with loading cleared.
    pub(crate) fn signed_out() -> Self {
        Self {
            user: None,
            token: None,
            status: AuthStatus::Unauthenticated,
            is_loading: false,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_unknown_and_loading() {
        let state = AuthState::default();
        assert_eq!(state.status, AuthStatus::Unknown);
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
        assert!(state.user.is_none());
        assert!(state.token.is_none());
    }

    #[test]
    fn signed_out_state_is_settled() {
        let state = AuthState::signed_out();
        assert_eq!(state.status, AuthStatus::Unauthenticated);
        assert!(!state.is_loading);
        assert!(state.error.is_none());
    }
}

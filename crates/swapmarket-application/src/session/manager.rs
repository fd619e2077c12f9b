//! Session manager: the authentication lifecycle.
//!
//! Owns the current user identity and bearer credential, and is the only
//! writer of both the in-memory auth state and the persisted credential
//! keys. All other subsystems consume it read-only as the answer to
//! "who is the current user".

use std::sync::Arc;

use swapmarket_core::auth::{AuthApi, AuthResponse, Credentials, SignupData};
use swapmarket_core::error::{MarketError, Result};
use swapmarket_core::storage::{AUTH_TOKEN_KEY, CredentialStore, USER_DATA_KEY};
use swapmarket_core::user::User;
use tokio::sync::RwLock;

use super::state::{AuthState, AuthStatus};

/// Resolves and holds the authenticated session for the process lifetime.
pub struct SessionManager {
    auth_api: Arc<dyn AuthApi>,
    credentials: Arc<dyn CredentialStore>,
    state: Arc<RwLock<AuthState>>,
}

impl SessionManager {
    pub fn new(auth_api: Arc<dyn AuthApi>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            auth_api,
            credentials,
            state: Arc::new(RwLock::new(AuthState::default())),
        }
    }

    /// Returns a snapshot of the current auth state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Resolves, on process start, whether a stored credential still proves
    /// a valid session.
    ///
    /// Storage failures are logged and treated as "no stored credential";
    /// a credential the server rejects is purged. The loading flag clears
    /// on every path once the check completes.
    pub async fn check_auth_status(&self) -> bool {
        let resolved = self.resolve_stored_session().await;

        let mut state = self.state.write().await;
        match resolved {
            Some((user, token)) => {
                state.user = Some(user);
                state.token = Some(token);
                state.status = AuthStatus::Authenticated;
                state.error = None;
            }
            None => {
                state.user = None;
                state.token = None;
                state.status = AuthStatus::Unauthenticated;
            }
        }
        state.is_loading = false;
        state.is_authenticated()
    }

    /// Reads the persisted credential and, when present, verifies it
    /// against the remote API. The verified response is the source of
    /// truth for identity; the persisted snapshot only gates whether
    /// verification is attempted at all.
    async fn resolve_stored_session(&self) -> Option<(User, String)> {
        let token = self.read_key(AUTH_TOKEN_KEY).await?;
        self.read_key(USER_DATA_KEY).await?;

        match self.auth_api.current_user().await {
            Ok(user) => Some((user, token)),
            Err(err) => {
                tracing::debug!("Stored credential rejected, purging: {err}");
                self.purge_credentials().await;
                None
            }
        }
    }

    async fn read_key(&self, key: &str) -> Option<String> {
        match self.credentials.get(key).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("Failed to read '{key}' from credential storage: {err}");
                None
            }
        }
    }

    /// Exchanges credentials for a session. On success the token and user
    /// snapshot are persisted and the state flips to authenticated; on
    /// failure the error is recorded for display and propagated.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(MarketError::validation("Email and password are required"));
        }

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.auth_api.login(credentials).await {
            Ok(response) => Ok(self.apply_auth_success(response).await),
            Err(err) => Err(self.record_auth_failure(err).await),
        }
    }

    /// Registers a new account; identical session-state effects as `login`.
    pub async fn signup(&self, data: SignupData) -> Result<User> {
        if data.email.trim().is_empty()
            || data.password.is_empty()
            || data.username.trim().is_empty()
            || data.first_name.trim().is_empty()
            || data.last_name.trim().is_empty()
        {
            return Err(MarketError::validation("All signup fields are required"));
        }

        match self.auth_api.signup(data).await {
            Ok(response) => Ok(self.apply_auth_success(response).await),
            Err(err) => Err(self.record_auth_failure(err).await),
        }
    }

    async fn apply_auth_success(&self, response: AuthResponse) -> User {
        self.persist_session(&response).await;

        let mut state = self.state.write().await;
        state.user = Some(response.user.clone());
        state.token = Some(response.token);
        state.status = AuthStatus::Authenticated;
        state.is_loading = false;
        state.error = None;

        response.user
    }

    /// Persists the credential pair. Write failures are non-fatal: the
    /// session stays valid for this run and the next start falls back to
    /// unauthenticated.
    async fn persist_session(&self, response: &AuthResponse) {
        if let Err(err) = self.credentials.set(AUTH_TOKEN_KEY, &response.token).await {
            tracing::warn!("Failed to persist auth token: {err}");
        }
        match serde_json::to_string(&response.user) {
            Ok(snapshot) => {
                if let Err(err) = self.credentials.set(USER_DATA_KEY, &snapshot).await {
                    tracing::warn!("Failed to persist user snapshot: {err}");
                }
            }
            Err(err) => tracing::warn!("Failed to serialize user snapshot: {err}"),
        }
    }

    async fn record_auth_failure(&self, err: MarketError) -> MarketError {
        let mut state = self.state.write().await;
        state.error = Some(err.user_message());
        state.is_loading = false;
        err
    }

    /// Ends the session. The remote call is best-effort; local state and
    /// persisted credentials are cleared unconditionally.
    pub async fn logout(&self) {
        if let Err(err) = self.auth_api.logout().await {
            tracing::warn!("Remote logout failed, clearing local session anyway: {err}");
        }
        self.purge_credentials().await;
        *self.state.write().await = AuthState::signed_out();
    }

    /// Forces the session into the unauthenticated state after the server
    /// rejected the credential mid-run (401-equivalent).
    pub async fn invalidate(&self) {
        tracing::debug!("Session credential rejected by server, signing out");
        self.purge_credentials().await;
        *self.state.write().await = AuthState::signed_out();
    }

    async fn purge_credentials(&self) {
        if let Err(err) = self.credentials.remove(AUTH_TOKEN_KEY).await {
            tracing::warn!("Failed to remove stored auth token: {err}");
        }
        if let Err(err) = self.credentials.remove(USER_DATA_KEY).await {
            tracing::warn!("Failed to remove stored user snapshot: {err}");
        }
    }

    /// Requests a password-reset email. No session-state effect.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(MarketError::validation("Email is required"));
        }
        self.auth_api.forgot_password(email).await
    }

    /// Completes a password reset with the emailed token. No session-state
    /// effect; the caller logs in with the new password afterwards.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<()> {
        if token.is_empty() || new_password.is_empty() {
            return Err(MarketError::validation("Token and new password are required"));
        }
        self.auth_api.reset_password(token, new_password).await
    }

    /// Clears the recorded error, e.g. after the UI has displayed it.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;

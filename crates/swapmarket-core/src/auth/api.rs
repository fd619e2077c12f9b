//! Auth collaborator contract.
//!
//! The interface to the remote authentication endpoints. Implementations
//! are stateless proxies; credential persistence is owned by the session
//! manager, not by this layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::user::User;

/// Login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub email: String,
    pub password: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// Successful login/signup response: the verified identity plus the
/// opaque bearer token proving the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// An abstract client for the remote auth endpoints.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a verified user and bearer token.
    async fn login(&self, credentials: Credentials) -> Result<AuthResponse>;

    /// Registers a new account; same session effects as `login`.
    async fn signup(&self, data: SignupData) -> Result<AuthResponse>;

    /// Invalidates the session server-side. Best-effort: callers must not
    /// let a failure here block clearing local state.
    async fn logout(&self) -> Result<()>;

    /// Fetches the identity behind the current bearer token.
    /// Fails with `Unauthorized` when the token is invalid or expired.
    async fn current_user(&self) -> Result<User>;

    /// Requests a password-reset email.
    async fn forgot_password(&self, email: &str) -> Result<()>;

    /// Completes a password reset with the emailed token.
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<()>;
}

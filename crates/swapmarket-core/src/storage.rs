//! Persistent credential store contract.
//!
//! A small key/value store for the bearer token and the persisted user
//! snapshot, addressed by fixed keys. Backed by a JSON file in production
//! and by an in-memory map in tests.

use async_trait::async_trait;

use crate::error::Result;

/// Storage key for the opaque bearer token.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Storage key for the serialized user snapshot.
///
/// The snapshot only decides whether verification is attempted on startup;
/// the verified remote response is always the source of truth for identity.
pub const USER_DATA_KEY: &str = "userData";

/// An abstract persistent key/value store for session credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads a value, `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// Removes every stored key.
    async fn clear(&self) -> Result<()>;
}

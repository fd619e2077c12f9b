//! # swapmarket-infrastructure
//!
//! Storage-side implementations of the Swapmarket collaborator contracts:
//! the file-backed credential store and the path resolution it relies on.

pub mod credential_store;
pub mod paths;

pub use credential_store::FileCredentialStore;

//! # swapmarket-core
//!
//! Core domain models and collaborator contracts for the Swapmarket
//! marketplace client. This crate is transport-agnostic: the HTTP clients
//! live in `swapmarket-api`, the file-backed credential store in
//! `swapmarket-infrastructure`, and the state machines that consume these
//! contracts in `swapmarket-application`.
//!
//! ## Key Concepts
//!
//! - **Session**: the authenticated identity and bearer credential held
//!   for the lifetime of a logged-in run
//! - **Conversation**: a two-party message thread, optionally tied to a
//!   product listing
//! - **Unread count**: messages sent to the current user not yet
//!   acknowledged as read

pub mod auth;
pub mod chat;
pub mod error;
pub mod storage;
pub mod user;

// Re-export common types
pub use error::{MarketError, Result};
pub use user::User;

//! # swapmarket-api
//!
//! HTTP implementations of the Swapmarket collaborator contracts: a shared
//! `ApiClient` (bearer injection, fixed timeout, error mapping) plus
//! `HttpAuthApi` and `HttpChatApi` for the auth and chat endpoints.

pub mod auth;
pub mod chat;
pub mod client;
pub mod config;

pub use auth::HttpAuthApi;
pub use chat::HttpChatApi;
pub use client::ApiClient;
pub use config::ApiConfig;

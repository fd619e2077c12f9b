//! Authentication domain.

pub mod api;

pub use api::{AuthApi, AuthResponse, Credentials, SignupData};

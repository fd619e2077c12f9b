//! User identity types.

pub mod model;

pub use model::User;

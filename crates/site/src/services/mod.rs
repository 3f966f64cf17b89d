//! Business logic services for the site.

pub mod auth;
pub mod tokens;

pub use auth::{AuthError, AuthService};

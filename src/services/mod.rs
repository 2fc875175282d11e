//! Application services layer - Use cases outside the transforms.
//!
//! Services depend on abstractions (traits) and reach persistence through
//! the Unit of Work.

mod auth_service;

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};

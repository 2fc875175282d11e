//! Dream Space - Storefront backend
//!
//! Users register and own shops, shops list products, and products carry
//! images and color variants. The heart of the crate is the serialization
//! layer that validates input and renders entities for the wire.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **serializers**: Entity transforms (validation and representation)
//! - **services**: Authentication
//! - **infra**: Database, entities, repositories and Unit of Work
//! - **api**: HTTP handlers, extractors, middleware and routes
//! - **errors**: Centralized error handling
//!
//! Domain entities live in the `domain` workspace crate.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod infra;
pub mod serializers;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use serializers::RequestContext;

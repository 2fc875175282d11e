//! Custom axum extractors.

mod request_context;
mod validated_json;

pub use request_context::request_base;
pub use validated_json::{JsonBody, ValidatedJson};

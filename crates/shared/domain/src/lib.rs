//! Domain layer - Core catalog entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Users own shops, shops list products, and products carry their own
//! images and color variants.

pub mod constants;
pub mod error;
pub mod password;
pub mod product;
pub mod shop;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, FieldErrors};
pub use password::Password;
pub use product::{Product, ProductColor, ProductData, ProductImage};
pub use shop::{NewShop, Shop};
pub use user::{NewUser, User, UserChanges};

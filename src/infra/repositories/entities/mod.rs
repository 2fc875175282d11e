//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod product;
pub mod product_color;
pub mod product_image;
pub mod shop;
pub mod user;
pub mod user_favorite;
pub mod user_shop;

//! Product catalog entities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product listed by a shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub shop_id: i64,
}

/// Writable product fields, shared by create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductData {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub shop_id: i64,
}

/// An image attached to a product. Deleted together with its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub product_id: i64,
    /// Relative storage path; may be missing
    pub image: Option<String>,
}

impl ProductImage {
    pub fn image_path(&self) -> Option<&str> {
        self.image.as_deref().filter(|path| !path.is_empty())
    }
}

/// A color variant label. A product's colors are always replaced as a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductColor {
    pub id: i64,
    pub product_id: i64,
    pub color: String,
}

//! Shop domain entity.

use serde::{Deserialize, Serialize};

/// A storefront owned by one or more users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    /// Relative storage path of the logo image
    pub logo: Option<String>,
}

impl Shop {
    /// Logo path, treating an empty string the same as no logo.
    pub fn logo_path(&self) -> Option<&str> {
        self.logo.as_deref().filter(|path| !path.is_empty())
    }
}

/// Fields for creating a shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShop {
    pub name: String,
    pub logo: Option<String>,
}

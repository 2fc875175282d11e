//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Multi-row writes run inside a single database transaction.

pub(crate) mod entities;
mod product_repository;
mod shop_repository;
mod user_repository;

pub use product_repository::{ProductRepository, ProductStore};
pub use shop_repository::{ShopRepository, ShopStore};
pub use user_repository::{UserRepository, UserStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use shop_repository::MockShopRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;

/// Drop duplicate ids, keeping ascending order.
pub(crate) fn unique_ids(ids: Vec<i64>) -> Vec<i64> {
    let set: std::collections::BTreeSet<i64> = ids.into_iter().collect();
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_sorted_and_deduplicated() {
        assert_eq!(unique_ids(vec![3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(unique_ids(vec![]).is_empty());
    }
}

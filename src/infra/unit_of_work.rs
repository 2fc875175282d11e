//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories so services and serializers
//! depend on one object instead of three. Multi-row writes are made atomic
//! inside the repositories themselves.

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use super::db;
use super::repositories::{
    ProductRepository, ProductStore, ShopRepository, ShopStore, UserRepository, UserStore,
};
use crate::errors::AppResult;

/// Unit of Work trait for dependency injection.
///
/// Object safe, so it can be shared as `Arc<dyn UnitOfWork>` and swapped for
/// mock repositories or an in-memory store in tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get shop repository
    fn shops(&self) -> Arc<dyn ShopRepository>;

    /// Get product repository
    fn products(&self) -> Arc<dyn ProductRepository>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    shop_repo: Arc<ShopStore>,
    product_repo: Arc<ProductStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            shop_repo: Arc::new(ShopStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn shops(&self) -> Arc<dyn ShopRepository> {
        self.shop_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        db::ping(&self.db).await?;
        Ok(())
    }
}

/// Unit of work over mock repositories.
#[cfg(any(test, feature = "test-utils"))]
pub struct MockPersistence {
    users: Arc<dyn UserRepository>,
    shops: Arc<dyn ShopRepository>,
    products: Arc<dyn ProductRepository>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockPersistence {
    pub fn new(
        users: super::repositories::MockUserRepository,
        shops: super::repositories::MockShopRepository,
        products: super::repositories::MockProductRepository,
    ) -> Self {
        Self {
            users: Arc::new(users),
            shops: Arc::new(shops),
            products: Arc::new(products),
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl UnitOfWork for MockPersistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn shops(&self) -> Arc<dyn ShopRepository> {
        self.shops.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.products.clone()
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

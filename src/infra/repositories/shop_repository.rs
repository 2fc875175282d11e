//! Shop repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

use super::entities::{shop, user_shop};
use super::unique_ids;
use crate::errors::AppResult;
use domain::{NewShop, Shop};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Shop repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Find shop by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Shop>>;

    /// List all shops
    async fn list(&self) -> AppResult<Vec<Shop>>;

    /// The subset of `ids` that refer to existing shops
    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>>;

    /// Create a shop and add it to the user's shop set, atomically
    async fn create_for_user(&self, user_id: i64, shop: NewShop) -> AppResult<Shop>;
}

/// Concrete implementation of ShopRepository
pub struct ShopStore {
    db: DatabaseConnection,
}

impl ShopStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShopRepository for ShopStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Shop>> {
        let result = shop::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Shop::from))
    }

    async fn list(&self) -> AppResult<Vec<Shop>> {
        let models = shop::Entity::find()
            .order_by_asc(shop::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Shop::from).collect())
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(ids);
        }

        let found: Vec<i64> = shop::Entity::find()
            .select_only()
            .column(shop::Column::Id)
            .filter(shop::Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(found)
    }

    async fn create_for_user(&self, user_id: i64, new_shop: NewShop) -> AppResult<Shop> {
        let txn = self.db.begin().await?;

        let model = shop::ActiveModel {
            name: Set(new_shop.name),
            logo: Set(new_shop.logo),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        user_shop::Entity::insert(user_shop::ActiveModel {
            user_id: Set(user_id),
            shop_id: Set(model.id),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;

        tracing::info!(shop_id = model.id, user_id, "Shop created");
        Ok(Shop::from(model))
    }
}

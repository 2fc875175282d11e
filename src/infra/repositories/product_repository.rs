//! Product repository implementation.
//!
//! Colors are never patched one by one: a supplied color list replaces the
//! whole set inside the same transaction as the product write.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

use super::entities::{product, product_color, product_image};
use super::unique_ids;
use crate::errors::{AppError, AppResult};
use domain::{Product, ProductColor, ProductData, ProductImage};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find product by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// List all products
    async fn list(&self) -> AppResult<Vec<Product>>;

    /// The subset of `ids` that refer to existing products
    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>>;

    /// Images attached to a product
    async fn images(&self, product_id: i64) -> AppResult<Vec<ProductImage>>;

    /// Color variants of a product
    async fn colors(&self, product_id: i64) -> AppResult<Vec<ProductColor>>;

    /// Insert a product, with its colors when supplied
    async fn create(&self, data: ProductData, colors: Option<Vec<String>>) -> AppResult<Product>;

    /// Overwrite a product; `Some(colors)` replaces the color set, `None` keeps it
    async fn update(
        &self,
        id: i64,
        data: ProductData,
        colors: Option<Vec<String>>,
    ) -> AppResult<Product>;

    /// Delete a product together with its images and colors
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// Attach an image to a product
    async fn add_image(&self, product_id: i64, image: Option<String>) -> AppResult<ProductImage>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn product_not_found(id: i64) -> AppError {
    AppError::not_found(format!("Product with id '{}' not found.", id))
}

/// Delete every color of the product, then insert one row per label.
async fn replace_colors<C: ConnectionTrait>(
    conn: &C,
    product_id: i64,
    colors: Vec<String>,
) -> AppResult<()> {
    product_color::Entity::delete_many()
        .filter(product_color::Column::ProductId.eq(product_id))
        .exec(conn)
        .await?;

    let rows: Vec<product_color::ActiveModel> = colors
        .into_iter()
        .map(|color| product_color::ActiveModel {
            color: Set(color),
            product_id: Set(product_id),
            ..Default::default()
        })
        .collect();

    if !rows.is_empty() {
        product_color::Entity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let result = product::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Product::from))
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let models = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>> {
        let ids = unique_ids(ids);
        if ids.is_empty() {
            return Ok(ids);
        }

        let found: Vec<i64> = product::Entity::find()
            .select_only()
            .column(product::Column::Id)
            .filter(product::Column::Id.is_in(ids))
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(found)
    }

    async fn images(&self, product_id: i64) -> AppResult<Vec<ProductImage>> {
        let models = product_image::Entity::find()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_asc(product_image::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ProductImage::from).collect())
    }

    async fn colors(&self, product_id: i64) -> AppResult<Vec<ProductColor>> {
        let models = product_color::Entity::find()
            .filter(product_color::Column::ProductId.eq(product_id))
            .order_by_asc(product_color::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ProductColor::from).collect())
    }

    async fn create(&self, data: ProductData, colors: Option<Vec<String>>) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let model = product::ActiveModel {
            name: Set(data.name),
            price: Set(data.price),
            category: Set(data.category),
            shop_id: Set(data.shop_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if let Some(colors) = colors {
            replace_colors(&txn, model.id, colors).await?;
        }

        txn.commit().await?;

        tracing::info!(product_id = model.id, shop_id = model.shop_id, "Product created");
        Ok(Product::from(model))
    }

    async fn update(
        &self,
        id: i64,
        data: ProductData,
        colors: Option<Vec<String>>,
    ) -> AppResult<Product> {
        let txn = self.db.begin().await?;

        let current = product::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| product_not_found(id))?;

        let mut active: product::ActiveModel = current.into();
        active.name = Set(data.name);
        active.price = Set(data.price);
        active.category = Set(data.category);
        active.shop_id = Set(data.shop_id);
        let model = active.update(&txn).await?;

        if let Some(colors) = colors {
            replace_colors(&txn, id, colors).await?;
        }

        txn.commit().await?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = product::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(product_not_found(id));
        }

        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn add_image(&self, product_id: i64, image: Option<String>) -> AppResult<ProductImage> {
        let model = product_image::ActiveModel {
            image: Set(image),
            product_id: Set(product_id),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(ProductImage::from(model))
    }
}

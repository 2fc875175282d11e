//! User repository implementation.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

use super::entities::{shop, user, user_favorite, user_shop};
use super::unique_ids;
use crate::errors::{AppError, AppResult};
use domain::{NewUser, Shop, User, UserChanges};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user (password already hashed)
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Apply a profile update, replacing relation sets that are supplied
    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User>;

    /// Shops owned by the user
    async fn shops(&self, id: i64) -> AppResult<Vec<Shop>>;

    /// Ids of the products the user has favorited
    async fn favorite_ids(&self, id: i64) -> AppResult<Vec<i64>>;

    /// Stamp the last-login timestamp
    async fn record_login(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = user::ActiveModel {
            email: Set(new_user.email),
            username: Set(new_user.username),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password_hash: Set(new_user.password_hash),
            is_superuser: Set(false),
            is_staff: Set(false),
            is_active: Set(true),
            date_joined: Set(chrono::Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        let txn = self.db.begin().await?;

        let current = user::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' not found.", id)))?;

        let mut active: user::ActiveModel = current.clone().into();
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }

        let model = if active.is_changed() {
            active.update(&txn).await?
        } else {
            current
        };

        if let Some(shop_ids) = changes.shops {
            user_shop::Entity::delete_many()
                .filter(user_shop::Column::UserId.eq(id))
                .exec(&txn)
                .await?;

            let links: Vec<user_shop::ActiveModel> = unique_ids(shop_ids)
                .into_iter()
                .map(|shop_id| user_shop::ActiveModel {
                    user_id: Set(id),
                    shop_id: Set(shop_id),
                })
                .collect();
            if !links.is_empty() {
                user_shop::Entity::insert_many(links)
                    .exec_without_returning(&txn)
                    .await?;
            }
        }

        if let Some(product_ids) = changes.favorites {
            user_favorite::Entity::delete_many()
                .filter(user_favorite::Column::UserId.eq(id))
                .exec(&txn)
                .await?;

            let links: Vec<user_favorite::ActiveModel> = unique_ids(product_ids)
                .into_iter()
                .map(|product_id| user_favorite::ActiveModel {
                    user_id: Set(id),
                    product_id: Set(product_id),
                })
                .collect();
            if !links.is_empty() {
                user_favorite::Entity::insert_many(links)
                    .exec_without_returning(&txn)
                    .await?;
            }
        }

        txn.commit().await?;
        Ok(User::from(model))
    }

    async fn shops(&self, id: i64) -> AppResult<Vec<Shop>> {
        let models = shop::Entity::find()
            .join(JoinType::InnerJoin, shop::Relation::UserShops.def())
            .filter(user_shop::Column::UserId.eq(id))
            .order_by_asc(shop::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Shop::from).collect())
    }

    async fn favorite_ids(&self, id: i64) -> AppResult<Vec<i64>> {
        let ids: Vec<i64> = user_favorite::Entity::find()
            .select_only()
            .column(user_favorite::Column::ProductId)
            .filter(user_favorite::Column::UserId.eq(id))
            .order_by_asc(user_favorite::Column::ProductId)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ids)
    }

    async fn record_login(&self, id: i64) -> AppResult<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLogin, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;

        Ok(())
    }
}

//! User transforms: profile read and profile update.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::shop::{summarize, ShopRepresentation};
use super::RequestContext;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{invalid_pk_message, FieldErrors, User, UserChanges, MSG_EMAIL_TAKEN};

/// User profile as returned to clients.
///
/// Account-state fields and the password hash are never part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserRepresentation {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Ids of favorited products
    pub favorites: Vec<i64>,
    /// Owned shops, expanded
    pub shops: Vec<ShopRepresentation>,
}

/// Render a user with favorites as ids and shops expanded.
pub async fn represent(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    user: &User,
) -> AppResult<UserRepresentation> {
    let users = uow.users();
    let (favorites, shops) = tokio::try_join!(users.favorite_ids(user.id), users.shops(user.id))?;

    Ok(UserRepresentation {
        id: user.id,
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        favorites,
        shops: shops.iter().map(|shop| summarize(ctx, shop)).collect(),
    })
}

/// Load a user by id and render it.
pub async fn retrieve(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    id: i64,
) -> AppResult<UserRepresentation> {
    let user = find_user(uow, id).await?;
    represent(ctx, uow, &user).await
}

async fn find_user(uow: &dyn UnitOfWork, id: i64) -> AppResult<User> {
    uow.users()
        .find_by_id(id)
        .await?
        .ok_or_not_found(|| format!("User with id '{}' not found.", id))
}

/// Profile update payload. Omitted fields stay as they are.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UserUpdateInput {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub last_name: Option<String>,

    /// Replaces the favorite set
    pub favorites: Option<Vec<i64>>,

    /// Replaces the owned shop set
    pub shops: Option<Vec<i64>>,
}

/// Apply a profile update on behalf of the acting user.
///
/// Only the user themself may update their profile. Every id in `favorites`
/// and `shops` must resolve.
pub async fn update(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    id: i64,
    input: UserUpdateInput,
) -> AppResult<UserRepresentation> {
    if ctx.actor() != Some(id) {
        return Err(AppError::Forbidden);
    }

    input.validate()?;
    let current = find_user(uow, id).await?;

    let mut errors = FieldErrors::new();
    let email = input.email.map(|email| email.trim().to_string());

    if let Some(email) = email.as_deref().filter(|email| *email != current.email) {
        if let Some(owner) = uow.users().find_by_email(email).await? {
            if owner.id != id {
                errors.add("email", MSG_EMAIL_TAKEN);
            }
        }
    }

    if let Some(ids) = &input.favorites {
        let existing = uow.products().existing_ids(ids.clone()).await?;
        if let Some(missing) = first_missing(ids, &existing) {
            errors.add("favorites", invalid_pk_message(missing));
        }
    }

    if let Some(ids) = &input.shops {
        let existing = uow.shops().existing_ids(ids.clone()).await?;
        if let Some(missing) = first_missing(ids, &existing) {
            errors.add("shops", invalid_pk_message(missing));
        }
    }

    errors.into_result()?;

    let changes = UserChanges {
        email,
        first_name: input.first_name,
        last_name: input.last_name,
        shops: input.shops,
        favorites: input.favorites,
    };
    if changes.is_empty() {
        return represent(ctx, uow, &current).await;
    }

    let user = uow.users().update(id, changes).await?;
    tracing::info!(user_id = id, "User profile updated");

    represent(ctx, uow, &user).await
}

fn first_missing(requested: &[i64], existing: &[i64]) -> Option<i64> {
    requested.iter().copied().find(|id| !existing.contains(id))
}

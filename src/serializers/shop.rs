//! Shop transforms: read, create, and the summary nested inside users.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::RequestContext;
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{NewShop, Shop, MSG_REQUIRED};

/// Shop as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShopRepresentation {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Lumen Lighting")]
    pub name: String,
    /// Absolute URL of the logo, `null` when the shop has none
    #[schema(example = "http://localhost:3000/media/logos/lumen.png")]
    pub logo: Option<String>,
}

/// Render a shop with its logo as an absolute URL.
pub fn represent(ctx: &RequestContext, shop: &Shop) -> ShopRepresentation {
    ShopRepresentation {
        id: shop.id,
        name: shop.name.clone(),
        logo: shop.logo_path().map(|path| ctx.absolute_media_url(path)),
    }
}

/// Render a shop nested inside a user.
pub fn summarize(ctx: &RequestContext, shop: &Shop) -> ShopRepresentation {
    // Empty logos become null here as well, never a bare media-prefix URL
    represent(ctx, shop)
}

pub async fn retrieve(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    id: i64,
) -> AppResult<ShopRepresentation> {
    let shop = uow
        .shops()
        .find_by_id(id)
        .await?
        .ok_or_not_found(|| format!("Shop with id '{}' not found.", id))?;
    Ok(represent(ctx, &shop))
}

pub async fn list(ctx: &RequestContext, uow: &dyn UnitOfWork) -> AppResult<Vec<ShopRepresentation>> {
    let shops = uow.shops().list().await?;
    Ok(shops.iter().map(|shop| represent(ctx, shop)).collect())
}

/// Shop creation payload. The shop is attached to `user_id`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ShopCreateInput {
    #[schema(example = "Lumen Lighting")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters.")
    )]
    pub name: Option<String>,

    /// Relative storage path of an already uploaded logo
    #[schema(example = "logos/lumen.png")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub logo: Option<String>,

    #[schema(example = 1)]
    #[validate(
        required(message = "This field is required."),
        range(min = 1, message = "Ensure this value is greater than or equal to 1.")
    )]
    pub user_id: Option<i64>,
}

/// Create a shop and add it to the owning user's shop set.
///
/// Nothing is written when the user does not exist.
pub async fn create(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    input: ShopCreateInput,
) -> AppResult<ShopRepresentation> {
    input.validate()?;

    let user_id = input
        .user_id
        .ok_or_else(|| AppError::validation("user_id", MSG_REQUIRED))?;
    let name = input
        .name
        .ok_or_else(|| AppError::validation("name", MSG_REQUIRED))?;

    let user = uow
        .users()
        .find_by_id(user_id)
        .await?
        .ok_or_not_found(|| format!("User with id '{}' not found.", user_id))?;

    let new_shop = NewShop {
        name,
        logo: input.logo.filter(|logo| !logo.is_empty()),
    };
    let shop = uow.shops().create_for_user(user.id, new_shop).await?;

    Ok(represent(ctx, &shop))
}

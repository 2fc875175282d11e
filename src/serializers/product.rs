//! Product transforms.
//!
//! The detail representation resolves the owning shop and expands images and
//! colors. The write path validates input, persists, then renders through the
//! same detail function. The list representation is a separate reduced type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::RequestContext;
use crate::errors::{field_errors, AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use domain::{
    invalid_pk_message, FieldErrors, Product, ProductData, ProductImage, MAX_COLOR_LENGTH,
    MSG_REQUIRED, PRICE_DECIMAL_PLACES, PRICE_MAX_DIGITS,
};

/// Product detail as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductRepresentation {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Desk lamp")]
    pub name: String,
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    #[schema(example = "lighting")]
    pub category: String,
    /// Absolute image URLs
    pub images: Vec<String>,
    /// Color labels
    pub colors: Vec<String>,
    #[schema(example = 1)]
    pub shop_id: i64,
    #[schema(example = "Lumen Lighting")]
    pub shop_name: String,
}

/// Product as listed in collections: raw fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductListItem {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    pub category: String,
    /// Id of the owning shop
    pub shop: i64,
}

impl From<&Product> for ProductListItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            category: product.category.clone(),
            shop: product.shop_id,
        }
    }
}

/// Absolute URL of a product image, `None` when no file is stored.
pub fn image_url(ctx: &RequestContext, image: &ProductImage) -> Option<String> {
    image.image_path().map(|path| ctx.absolute_media_url(path))
}

/// Render the detail representation of a product.
///
/// Fails with not-found when the owning shop no longer exists.
pub async fn represent(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    product: &Product,
) -> AppResult<ProductRepresentation> {
    let shops = uow.shops();
    let products = uow.products();
    let (shop, images, colors) = tokio::try_join!(
        shops.find_by_id(product.shop_id),
        products.images(product.id),
        products.colors(product.id),
    )?;

    let shop = shop.ok_or_not_found(|| {
        format!(
            "Shop with id '{}' for product {} not found.",
            product.shop_id, product.name
        )
    })?;

    Ok(ProductRepresentation {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
        category: product.category.clone(),
        images: images.iter().filter_map(|image| image_url(ctx, image)).collect(),
        colors: colors.into_iter().map(|color| color.color).collect(),
        shop_id: product.shop_id,
        shop_name: shop.name,
    })
}

/// Load a product by id and render its detail representation.
pub async fn retrieve(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    id: i64,
) -> AppResult<ProductRepresentation> {
    let product = find_product(uow, id).await?;
    represent(ctx, uow, &product).await
}

/// Render every product in list form.
pub async fn list(uow: &dyn UnitOfWork) -> AppResult<Vec<ProductListItem>> {
    let products = uow.products().list().await?;
    Ok(products.iter().map(ProductListItem::from).collect())
}

async fn find_product(uow: &dyn UnitOfWork, id: i64) -> AppResult<Product> {
    uow.products()
        .find_by_id(id)
        .await?
        .ok_or_not_found(|| format!("Product with id '{}' not found.", id))
}

/// Product create/update payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProductInput {
    #[schema(example = "Desk lamp")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 255, message = "Ensure this field has between 1 and 255 characters.")
    )]
    pub name: Option<String>,

    #[schema(value_type = Option<String>, example = "49.90")]
    #[validate(required(message = "This field is required."))]
    pub price: Option<Decimal>,

    #[schema(example = "lighting")]
    #[validate(
        required(message = "This field is required."),
        length(min = 1, max = 100, message = "Ensure this field has between 1 and 100 characters.")
    )]
    pub category: Option<String>,

    /// Id of the owning shop
    #[schema(example = 1)]
    #[validate(required(message = "This field is required."))]
    pub shop: Option<i64>,

    /// Replaces every color of the product when present
    #[schema(example = json!(["red", "blue"]))]
    pub colors: Option<Vec<String>>,
}

/// Non-negative, at most `PRICE_DECIMAL_PLACES` decimals and
/// `PRICE_MAX_DIGITS` digits overall.
fn check_price(price: &Decimal) -> Result<(), String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }

    let normalized = price.normalize();
    if normalized.scale() > PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        ));
    }

    let whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;
    if normalized.trunc() >= Decimal::from(10_u64.pow(whole_digits)) {
        return Err(format!(
            "Ensure that there are no more than {} digits before the decimal point.",
            whole_digits
        ));
    }

    Ok(())
}

/// Labels are judged after trimming surrounding whitespace.
fn check_colors(colors: &[String]) -> Result<(), String> {
    if colors.iter().any(|color| color.trim().is_empty()) {
        return Err("This field may not be blank.".to_string());
    }
    if colors.iter().any(|color| color.trim().chars().count() > MAX_COLOR_LENGTH) {
        return Err(format!(
            "Ensure this field has no more than {} characters.",
            MAX_COLOR_LENGTH
        ));
    }
    Ok(())
}

impl ProductInput {
    /// Run the declarative rules plus the price and color checks, collecting
    /// every failure.
    fn check(&self) -> AppResult<()> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => field_errors(&e),
        };

        if let Some(Err(message)) = self.price.as_ref().map(check_price) {
            errors.add("price", message);
        }
        if let Some(Err(message)) = self.colors.as_deref().map(check_colors) {
            errors.add("colors", message);
        }

        errors.into_result()?;
        Ok(())
    }
}

/// Create (`id = None`) or overwrite a product, then render it.
///
/// Colors are replaced only when the payload carries them.
pub async fn save(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    id: Option<i64>,
    input: ProductInput,
) -> AppResult<ProductRepresentation> {
    if let Some(id) = id {
        find_product(uow, id).await?;
    }

    input.check()?;

    let name = input
        .name
        .ok_or_else(|| AppError::validation("name", MSG_REQUIRED))?;
    let price = input
        .price
        .ok_or_else(|| AppError::validation("price", MSG_REQUIRED))?;
    let category = input
        .category
        .ok_or_else(|| AppError::validation("category", MSG_REQUIRED))?;
    let shop_id = input
        .shop
        .ok_or_else(|| AppError::validation("shop", MSG_REQUIRED))?;

    if uow.shops().find_by_id(shop_id).await?.is_none() {
        return Err(AppError::validation("shop", invalid_pk_message(shop_id)));
    }

    // Match the numeric(10, 2) column scale
    let mut price = price;
    price.rescale(PRICE_DECIMAL_PLACES);

    let data = ProductData {
        name,
        price,
        category,
        shop_id,
    };
    let colors: Option<Vec<String>> = input
        .colors
        .map(|labels| labels.iter().map(|label| label.trim().to_string()).collect());

    let product = match id {
        Some(id) => uow.products().update(id, data, colors).await?,
        None => uow.products().create(data, colors).await?,
    };

    represent(ctx, uow, &product).await
}

/// Delete a product along with its images and colors.
pub async fn delete(uow: &dyn UnitOfWork, id: i64) -> AppResult<()> {
    uow.products().delete(id).await
}

/// Image attachment payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ImageInput {
    /// Relative storage path of an already uploaded image
    #[schema(example = "products/lamp-front.jpg")]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub image: Option<String>,
}

/// Attach an image to a product and render the product.
pub async fn add_image(
    ctx: &RequestContext,
    uow: &dyn UnitOfWork,
    product_id: i64,
    input: ImageInput,
) -> AppResult<ProductRepresentation> {
    input.validate()?;
    let product = find_product(uow, product_id).await?;

    let image = input.image.filter(|path| !path.is_empty());
    uow.products().add_image(product.id, image).await?;

    represent(ctx, uow, &product).await
}

//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, product_handler, shop_handler, user_handler};
use crate::serializers::{
    ImageInput, ProductInput, ProductListItem, ProductRepresentation, RegisteredUser,
    RegistrationInput, ShopCreateInput, ShopRepresentation, UserRepresentation, UserUpdateInput,
};
use crate::services::TokenResponse;

/// OpenAPI documentation for the Dream Space API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dream Space",
        version = "0.1.0",
        description = "Shops, products and user profiles for the Dream Space storefront",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // User endpoints
        user_handler::get_current_user,
        user_handler::get_user,
        user_handler::update_user,
        // Shop endpoints
        shop_handler::list_shops,
        shop_handler::get_shop,
        shop_handler::create_shop,
        // Product endpoints
        product_handler::list_products,
        product_handler::get_product,
        product_handler::create_product,
        product_handler::update_product,
        product_handler::delete_product,
        product_handler::add_product_image,
    ),
    components(
        schemas(
            // Auth types
            RegistrationInput,
            RegisteredUser,
            auth_handler::LoginRequest,
            TokenResponse,
            // Users
            UserRepresentation,
            UserUpdateInput,
            // Shops
            ShopRepresentation,
            ShopCreateInput,
            // Products
            ProductRepresentation,
            ProductListItem,
            ProductInput,
            ImageInput,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "User registration and login"),
        (name = "Users", description = "User profiles"),
        (name = "Shops", description = "Shop management"),
        (name = "Products", description = "Product catalog")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}

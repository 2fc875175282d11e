//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_users_table;
mod m20240101_000002_create_shops_table;
mod m20240101_000003_create_products_table;
mod m20240102_000001_create_product_images_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_shops_table::Migration),
            Box::new(m20240101_000003_create_products_table::Migration),
            Box::new(m20240102_000001_create_product_images_table::Migration),
        ]
    }
}

#[derive(Iden)]
pub(crate) enum Users {
    Table,
    Id,
    Email,
    Username,
    FirstName,
    LastName,
    PasswordHash,
    IsSuperuser,
    IsStaff,
    IsActive,
    DateJoined,
    LastLogin,
}

#[derive(Iden)]
pub(crate) enum Shops {
    Table,
    Id,
    Name,
    Logo,
}

#[derive(Iden)]
pub(crate) enum UserShops {
    Table,
    UserId,
    ShopId,
}

#[derive(Iden)]
pub(crate) enum Products {
    Table,
    Id,
    Name,
    Price,
    Category,
    ShopId,
}

#[derive(Iden)]
pub(crate) enum ProductColors {
    Table,
    Id,
    Color,
    ProductId,
}

#[derive(Iden)]
pub(crate) enum UserFavorites {
    Table,
    UserId,
    ProductId,
}

#[derive(Iden)]
pub(crate) enum ProductImages {
    Table,
    Id,
    Image,
    ProductId,
}

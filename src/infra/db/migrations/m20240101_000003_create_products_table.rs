//! Migration: Create products, their color variants, and user favorites.

use sea_orm_migration::prelude::*;

use super::{ProductColors, Products, Shops, UserFavorites, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Products::Price).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Products::Category).string_len(100).not_null())
                    .col(ColumnDef::new(Products::ShopId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_shop_id")
                            .from(Products::Table, Products::ShopId)
                            .to(Shops::Table, Shops::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_products_shop_id")
                    .table(Products::Table)
                    .col(Products::ShopId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductColors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProductColors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProductColors::Color).string_len(10).not_null())
                    .col(ColumnDef::new(ProductColors::ProductId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_colors_product_id")
                            .from(ProductColors::Table, ProductColors::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserFavorites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserFavorites::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserFavorites::ProductId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserFavorites::UserId)
                            .col(UserFavorites::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorites_user_id")
                            .from(UserFavorites::Table, UserFavorites::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_favorites_product_id")
                            .from(UserFavorites::Table, UserFavorites::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserFavorites::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ProductColors::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

//! Migration: Create shops and the user/shop ownership link.

use sea_orm_migration::prelude::*;

use super::{Shops, UserShops, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shops::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shops::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shops::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Shops::Logo).string_len(255).null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserShops::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(UserShops::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserShops::ShopId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(UserShops::UserId)
                            .col(UserShops::ShopId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_shops_user_id")
                            .from(UserShops::Table, UserShops::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_shops_shop_id")
                            .from(UserShops::Table, UserShops::ShopId)
                            .to(Shops::Table, Shops::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserShops::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Shops::Table).to_owned())
            .await
    }
}

//! Shop database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Shop;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "shops")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
    #[sea_orm(has_many = "super::user_shop::Entity")]
    UserShops,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::user_shop::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserShops.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Shop {
    fn from(model: Model) -> Self {
        Shop {
            id: model.id,
            name: model.name,
            logo: model.logo,
        }
    }
}

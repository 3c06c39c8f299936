//! Wallets: where a canvas keeps its assets.
//!
//! Deleting a wallet archives it.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "wallets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub name: String,
    pub wallet_category_id: i32,
    pub owner_id: i32,
    pub wallet_number: Option<String>,
    pub entity_id: Option<i32>,
    pub description: Option<Json>,
    pub is_archived: bool,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::canvases::Entity",
        from = "Column::CanvasId",
        to = "super::canvases::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Canvases,
    #[sea_orm(
        belongs_to = "super::wallet_categories::Entity",
        from = "Column::WalletCategoryId",
        to = "super::wallet_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    WalletCategories,
    #[sea_orm(has_many = "super::assets::Entity")]
    Assets,
}

impl Related<super::wallet_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WalletCategories.def()
    }
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

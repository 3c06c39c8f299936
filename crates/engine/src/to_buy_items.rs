//! Wish list of planned purchases.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "to_buy_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub name: String,
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))", nullable)]
    pub estimated_price: Option<Decimal>,
    pub currency_id: Option<i32>,
    pub priority: i32,
    pub category: Option<String>,
    pub target_purchase_date: Option<Date>,
    pub actual_purchase_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))", nullable)]
    pub actual_price: Option<Decimal>,
    pub purchased_from_entity_id: Option<i32>,
    pub status: Option<String>,
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
}

impl ActiveModelBehavior for ActiveModel {}

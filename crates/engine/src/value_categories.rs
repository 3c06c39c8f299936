//! Kinds of value an asset can hold (cash, stock, gold...).
//!
//! Rows with `canvas_id = NULL` are system categories visible to every canvas.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "value_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: Option<i32>,
    pub name: String,
    pub category_type: Option<String>,
    pub currency_id: Option<i32>,
    pub unit: Option<String>,
    pub is_fungible: bool,
    pub is_wallet_compatible: bool,
    pub photo_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

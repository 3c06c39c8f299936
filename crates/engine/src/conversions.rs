//! Currency conversions between two assets.
//!
//! `parent_conversion_id` links multi-hop chains (A to B to C). A parent
//! always exists before its children, so chains are acyclic.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "converted_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub origin_asset_id: i32,
    pub destination_asset_id: i32,
    pub income_transaction_id: Option<i32>,
    pub parent_conversion_id: Option<i32>,
    pub conversion_date: DateTimeUtc,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub origin_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub destination_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub exchange_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub transaction_fee: Decimal,
    pub fee_currency_id: Option<i32>,
    pub conversion_type: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentConversionId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

//! Historical exchange rates between two currencies.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "currency_exchange_rates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub from_currency_id: i32,
    pub to_currency_id: i32,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub rate: Decimal,
    pub rate_date: DateTimeUtc,
    pub source: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

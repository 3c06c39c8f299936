//! Expected income of a resource over a date range, next to what actually
//! arrived once the period closes.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income_forecasts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub income_resource_id: i32,
    pub period_type: Option<String>,
    pub period_start: Date,
    pub period_end: Date,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub forecasted_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))", nullable)]
    pub actual_amount: Option<Decimal>,
    pub currency_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::income_resources::Entity",
        from = "Column::IncomeResourceId",
        to = "super::income_resources::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    IncomeResources,
}

impl Related<super::income_resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeResources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

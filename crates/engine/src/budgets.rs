//! Spending budgets, optionally bound to an expense category.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub name: String,
    pub expense_category_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub amount: Decimal,
    pub currency_id: i32,
    pub period_type: Option<String>,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub rollover_unused: bool,
    pub alert_threshold: Option<i32>,
    pub is_active: bool,
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
    #[sea_orm(has_many = "super::budget_tracking::Entity")]
    BudgetTracking,
}

impl Related<super::budget_tracking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BudgetTracking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Expenses: recurring or one-off spending commitments.
//!
//! Deleting an expense clears `is_active`.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub name: String,
    pub expense_category_id: i32,
    pub currency_id: i32,
    pub entity_id: Option<i32>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<Json>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::expense_categories::Entity",
        from = "Column::ExpenseCategoryId",
        to = "super::expense_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ExpenseCategories,
    #[sea_orm(
        belongs_to = "super::currencies::Entity",
        from = "Column::CurrencyId",
        to = "super::currencies::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Currencies,
    #[sea_orm(has_many = "super::spent_transactions::Entity")]
    SpentTransactions,
}

impl Related<super::expense_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExpenseCategories.def()
    }
}

impl Related<super::currencies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Currencies.def()
    }
}

impl Related<super::spent_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SpentTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

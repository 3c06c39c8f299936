//! Debts owed by or to a counterparty.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub debt_type_id: i32,
    pub entity_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub principal_amount: Decimal,
    pub currency_id: i32,
    #[sea_orm(column_type = "Decimal(Some((5, 2)))", nullable)]
    pub interest_rate: Option<Decimal>,
    pub start_date: Date,
    pub due_date: Option<Date>,
    pub status: Option<String>,
    pub notes: Option<String>,
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
    #[sea_orm(has_many = "super::debt_payments::Entity")]
    DebtPayments,
}

impl Related<super::debt_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DebtPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

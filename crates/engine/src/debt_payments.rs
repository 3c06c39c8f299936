use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "debt_payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub debt_id: i32,
    pub asset_id: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub amount: Decimal,
    pub payment_type: Option<String>,
    pub payment_date: Date,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::debts::Entity",
        from = "Column::DebtId",
        to = "super::debts::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Debts,
}

impl Related<super::debts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Debts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

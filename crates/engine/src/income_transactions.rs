//! Received (or expected) income, credited to a destination asset.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub income_resource_id: Option<i32>,
    pub destination_asset_id: i32,
    #[sea_orm(column_type = "Decimal(Some((20, 8)))")]
    pub amount: Decimal,
    pub expected_date: Option<DateTimeUtc>,
    pub received_date: Option<DateTimeUtc>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
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
        on_delete = "NoAction"
    )]
    IncomeResources,
}

impl Related<super::income_resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeResources.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

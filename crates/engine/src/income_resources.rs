//! Income resources: named sources of income inside a canvas.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "income_resources")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub name: String,
    pub income_resource_category_id: i32,
    pub owner_id: i32,
    pub default_value_category_id: i32,
    pub default_entity_id: Option<i32>,
    pub default_asset_id: Option<i32>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<Json>,
    pub photo_url: Option<String>,
    pub description: Option<Json>,
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
    #[sea_orm(has_many = "super::income_transactions::Entity")]
    IncomeTransactions,
    #[sea_orm(has_many = "super::income_forecasts::Entity")]
    IncomeForecasts,
}

impl Related<super::income_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeTransactions.def()
    }
}

impl Related<super::income_forecasts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::IncomeForecasts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Counterparties (people, shops, banks) of a canvas.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub entity_type_id: Option<i32>,
    pub name: String,
    pub description: Option<Json>,
    pub contact_info: Option<Json>,
    pub photo_url: Option<String>,
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
}

impl ActiveModelBehavior for ActiveModel {}

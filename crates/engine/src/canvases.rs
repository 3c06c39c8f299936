//! Canvases: isolated financial workspaces.
//!
//! A canvas is never hard-deleted, `is_archived` marks it as retired.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "canvases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub canvas_type: Option<String>,
    pub is_archived: bool,
    pub created_at: DateTimeUtc,
    pub created_by: Option<i32>,
    pub last_modified_at: DateTimeUtc,
    pub last_modified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::canvas_members::Entity")]
    CanvasMembers,
}

impl Related<super::canvas_members::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CanvasMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

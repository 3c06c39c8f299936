//! Canvas memberships.
//!
//! A row grants its user access to every resource of the canvas. The pair
//! `(canvas_id, user_id)` is unique.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "canvas_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub user_id: i32,
    pub role_id: Option<i32>,
    pub base_currency_id: i32,
    pub is_owner: bool,
    pub joined_at: DateTimeUtc,
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
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Users,
}

impl Related<super::canvases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Canvases.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

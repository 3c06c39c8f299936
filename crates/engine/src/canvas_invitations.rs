//! Pending invitations to join a canvas.
//!
//! The token is single use: accepting moves `status` from `pending` to
//! `accepted` and stamps `accepted_at`.

use sea_orm::entity::prelude::*;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "canvas_invitations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub canvas_id: i32,
    pub inviter_id: i32,
    pub invitee_email: String,
    pub role_id: Option<i32>,
    #[sea_orm(unique)]
    pub invitation_token: Option<String>,
    pub status: String,
    pub expires_at: Option<DateTimeUtc>,
    pub accepted_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
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

impl Related<super::canvases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Canvases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

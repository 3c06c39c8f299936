use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, NewInvitation, ResultEngine, canvas_invitations, canvas_members, roles, users,
};

use super::{Engine, with_tx};

impl Engine {
    /// Invite `new.email` to a canvas. Only the owner may invite, and the
    /// address must not already belong to a member.
    pub async fn create_invitation(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewInvitation,
    ) -> ResultEngine<canvas_invitations::Model> {
        let email = new.email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(EngineError::InvalidInput(
                "a valid invitee email is required".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;

            if let Some(role_id) = new.role_id
                && roles::Entity::find_by_id(role_id).one(&db_tx).await?.is_none()
            {
                return Err(EngineError::InvalidId("Invalid role ID".to_string()));
            }
            if let Some(invitee) = users::Entity::find()
                .filter(users::Column::Email.eq(email.as_str()))
                .one(&db_tx)
                .await?
                && self.membership(&db_tx, canvas_id, invitee.id).await?.is_some()
            {
                return Err(EngineError::InvalidInput(
                    "user is already a member of this canvas".to_string(),
                ));
            }

            Ok(canvas_invitations::ActiveModel {
                canvas_id: ActiveValue::Set(canvas_id),
                inviter_id: ActiveValue::Set(user_id),
                invitee_email: ActiveValue::Set(email),
                role_id: ActiveValue::Set(new.role_id),
                invitation_token: ActiveValue::Set(Some(new.token)),
                status: ActiveValue::Set(canvas_invitations::STATUS_PENDING.to_string()),
                expires_at: ActiveValue::Set(Some(new.expires_at)),
                accepted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?)
        })
    }

    /// Every invitation of a canvas, newest first. Owner only.
    pub async fn canvas_invitations(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<canvas_invitations::Model>> {
        with_tx!(self, |db_tx| {
            self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;
            Ok(canvas_invitations::Entity::find()
                .filter(canvas_invitations::Column::CanvasId.eq(canvas_id))
                .order_by_desc(canvas_invitations::Column::CreatedAt)
                .order_by_desc(canvas_invitations::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    /// Redeem a pending invitation for the caller, whose email must match
    /// the invited address. The new member gets the invitation's role and
    /// the owner's base currency. A caller who is already a member keeps
    /// their row.
    pub async fn accept_invitation(
        &self,
        user_id: i32,
        token: &str,
    ) -> ResultEngine<canvas_members::Model> {
        with_tx!(self, |db_tx| {
            let invitation = canvas_invitations::Entity::find()
                .filter(canvas_invitations::Column::InvitationToken.eq(token))
                .filter(canvas_invitations::Column::Status.eq(canvas_invitations::STATUS_PENDING))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("Invitation not found".to_string()))?;
            let now = Utc::now();
            if invitation.expires_at.is_some_and(|expires_at| expires_at <= now) {
                return Err(EngineError::InvalidInput("invitation has expired".to_string()));
            }
            let caller = self.find_user(&db_tx, user_id).await?;
            if caller.email.to_lowercase() != invitation.invitee_email {
                return Err(EngineError::Forbidden(
                    "invitation was sent to another address".to_string(),
                ));
            }

            let canvas_id = invitation.canvas_id;
            let role_id = invitation.role_id;
            let inviter_id = invitation.inviter_id;
            let mut active: canvas_invitations::ActiveModel = invitation.into();
            active.status = ActiveValue::Set(canvas_invitations::STATUS_ACCEPTED.to_string());
            active.accepted_at = ActiveValue::Set(Some(now));
            active.update(&db_tx).await?;

            if let Some(existing) = self.membership(&db_tx, canvas_id, user_id).await? {
                Ok(existing)
            } else {
                let owner = canvas_members::Entity::find()
                    .filter(canvas_members::Column::CanvasId.eq(canvas_id))
                    .filter(canvas_members::Column::IsOwner.eq(true))
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("Canvas not found".to_string()))?;
                Ok(canvas_members::ActiveModel {
                    canvas_id: ActiveValue::Set(canvas_id),
                    user_id: ActiveValue::Set(user_id),
                    role_id: ActiveValue::Set(role_id),
                    base_currency_id: ActiveValue::Set(owner.base_currency_id),
                    is_owner: ActiveValue::Set(false),
                    joined_at: ActiveValue::Set(now),
                    created_at: ActiveValue::Set(now),
                    created_by: ActiveValue::Set(Some(inviter_id)),
                    last_modified_at: ActiveValue::Set(now),
                    last_modified_by: ActiveValue::Set(Some(user_id)),
                    ..Default::default()
                }
                .insert(&db_tx)
                .await
                .map_err(|err| EngineError::on_write(err, format!("member {user_id}")))?)
            }
        })
    }
}

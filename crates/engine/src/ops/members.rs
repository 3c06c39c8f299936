use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, MemberRef, NewMember, ResultEngine, canvas_members, currencies, roles, users,
};

use super::{Engine, patch, touch, with_tx};

/// A canvas member joined with its user row.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberWithUser {
    pub member: canvas_members::Model,
    pub user: users::Model,
}

impl Engine {
    /// Members of a canvas. Any member may list them.
    pub async fn canvas_members(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<MemberWithUser>> {
        with_tx!(self, |db_tx| {
            self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;

            let rows = canvas_members::Entity::find()
                .filter(canvas_members::Column::CanvasId.eq(canvas_id))
                .find_also_related(users::Entity)
                .order_by_asc(canvas_members::Column::JoinedAt)
                .order_by_asc(canvas_members::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(rows
                .into_iter()
                .filter_map(|(member, user)| user.map(|user| MemberWithUser { member, user }))
                .collect())
        })
    }

    /// Add a user to a canvas, or update the role and base currency of an
    /// existing member. Returns the row and whether it was created.
    ///
    /// Only the owner may manage members. The base currency defaults to the
    /// owner's.
    pub async fn upsert_canvas_member(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewMember,
    ) -> ResultEngine<(canvas_members::Model, bool)> {
        with_tx!(self, |db_tx| {
            self.find_canvas(&db_tx, canvas_id).await?;
            let owner = self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;

            let target = match &new.user {
                MemberRef::Id(id) => users::Entity::find_by_id(*id).one(&db_tx).await?,
                MemberRef::Email(email) => {
                    users::Entity::find()
                        .filter(users::Column::Email.eq(email.trim().to_lowercase()))
                        .one(&db_tx)
                        .await?
                }
            }
            .ok_or_else(|| EngineError::KeyNotFound("User not found".to_string()))?;

            if let Some(role_id) = new.role_id
                && roles::Entity::find_by_id(role_id).one(&db_tx).await?.is_none()
            {
                return Err(EngineError::InvalidId("Invalid role ID".to_string()));
            }
            if let Some(currency_id) = new.base_currency_id
                && currencies::Entity::find_by_id(currency_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid currency ID".to_string()));
            }

            if let Some(existing) = self.membership(&db_tx, canvas_id, target.id).await? {
                let mut active: canvas_members::ActiveModel = existing.into();
                patch(&mut active.role_id, new.role_id.map(Some));
                patch(&mut active.base_currency_id, new.base_currency_id);
                touch!(active, user_id);
                Ok((active.update(&db_tx).await?, false))
            } else {
                let now = Utc::now();
                let member = canvas_members::ActiveModel {
                    canvas_id: ActiveValue::Set(canvas_id),
                    user_id: ActiveValue::Set(target.id),
                    role_id: ActiveValue::Set(new.role_id),
                    base_currency_id: ActiveValue::Set(
                        new.base_currency_id.unwrap_or(owner.base_currency_id),
                    ),
                    is_owner: ActiveValue::Set(false),
                    joined_at: ActiveValue::Set(now),
                    created_at: ActiveValue::Set(now),
                    created_by: ActiveValue::Set(Some(user_id)),
                    last_modified_at: ActiveValue::Set(now),
                    last_modified_by: ActiveValue::Set(Some(user_id)),
                    ..Default::default()
                }
                .insert(&db_tx)
                .await
                .map_err(|err| EngineError::on_write(err, format!("member {}", target.id)))?;
                Ok((member, true))
            }
        })
    }

    /// Remove a member. The owner row itself can never be removed.
    pub async fn remove_canvas_member(
        &self,
        user_id: i32,
        canvas_id: i32,
        member_user_id: i32,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;

            let member = self
                .membership(&db_tx, canvas_id, member_user_id)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("Member not found".to_string()))?;
            if member.is_owner {
                return Err(EngineError::InvalidInput(
                    "the canvas owner cannot be removed".to_string(),
                ));
            }
            member.delete(&db_tx).await?;
            Ok(())
        })
    }
}

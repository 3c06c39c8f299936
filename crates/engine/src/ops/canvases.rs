use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    CanvasFilter, CanvasUpdate, EngineError, NewCanvas, ResultEngine, canvas_members, canvases,
    currencies, roles, user_settings,
};

use super::{Engine, normalize_optional_text, normalize_required_name, patch, touch, with_tx};

/// Currency used for a new canvas when neither the request nor the user's
/// settings name one.
const FALLBACK_CURRENCY: &str = "USD";
const OWNER_ROLE: &str = "Owner";

/// A canvas as seen by one of its members.
#[derive(Clone, Debug, PartialEq)]
pub struct CanvasMembership {
    pub canvas: canvases::Model,
    pub is_owner: bool,
    pub base_currency_id: i32,
}

impl Engine {
    /// Create a canvas and make `user_id` its owner, atomically.
    pub async fn create_canvas(
        &self,
        user_id: i32,
        new: NewCanvas,
    ) -> ResultEngine<(canvases::Model, canvas_members::Model)> {
        let name = normalize_required_name(&new.name, "canvas")?;
        with_tx!(self, |db_tx| {
            let base_currency_id = self
                .resolve_base_currency(&db_tx, user_id, new.base_currency_id)
                .await?;
            let owner_role = roles::Entity::find()
                .filter(roles::Column::Name.eq(OWNER_ROLE))
                .one(&db_tx)
                .await?
                .map(|role| role.id);

            let now = Utc::now();
            let canvas = canvases::ActiveModel {
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(normalize_optional_text(
                    new.description.as_deref(),
                )),
                photo_url: ActiveValue::Set(new.photo_url),
                canvas_type: ActiveValue::Set(new.canvas_type),
                is_archived: ActiveValue::Set(false),
                created_at: ActiveValue::Set(now),
                created_by: ActiveValue::Set(Some(user_id)),
                last_modified_at: ActiveValue::Set(now),
                last_modified_by: ActiveValue::Set(Some(user_id)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            let member = canvas_members::ActiveModel {
                canvas_id: ActiveValue::Set(canvas.id),
                user_id: ActiveValue::Set(user_id),
                role_id: ActiveValue::Set(owner_role),
                base_currency_id: ActiveValue::Set(base_currency_id),
                is_owner: ActiveValue::Set(true),
                joined_at: ActiveValue::Set(now),
                created_at: ActiveValue::Set(now),
                created_by: ActiveValue::Set(Some(user_id)),
                last_modified_at: ActiveValue::Set(now),
                last_modified_by: ActiveValue::Set(Some(user_id)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?;

            Ok((canvas, member))
        })
    }

    /// Canvases `user_id` is a member of, newest first.
    pub async fn list_canvases(
        &self,
        user_id: i32,
        filter: CanvasFilter,
    ) -> ResultEngine<Vec<CanvasMembership>> {
        with_tx!(self, |db_tx| {
            let mut query = canvas_members::Entity::find()
                .filter(canvas_members::Column::UserId.eq(user_id))
                .find_also_related(canvases::Entity)
                .order_by_desc(canvases::Column::CreatedAt)
                .order_by_desc(canvases::Column::Id);
            if let Some(archived) = filter.archived {
                query = query.filter(canvases::Column::IsArchived.eq(archived));
            }
            let rows = query.all(&db_tx).await?;

            Ok(rows
                .into_iter()
                .filter_map(|(member, canvas)| {
                    canvas.map(|canvas| CanvasMembership {
                        canvas,
                        is_owner: member.is_owner,
                        base_currency_id: member.base_currency_id,
                    })
                })
                .collect())
        })
    }

    pub async fn canvas(&self, user_id: i32, canvas_id: i32) -> ResultEngine<CanvasMembership> {
        with_tx!(self, |db_tx| {
            let canvas = self.find_canvas(&db_tx, canvas_id).await?;
            let member = self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(CanvasMembership {
                canvas,
                is_owner: member.is_owner,
                base_currency_id: member.base_currency_id,
            })
        })
    }

    /// Update canvas metadata. Only the owner may do it.
    pub async fn update_canvas(
        &self,
        user_id: i32,
        canvas_id: i32,
        update: CanvasUpdate,
    ) -> ResultEngine<canvases::Model> {
        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "canvas"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let canvas = self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;

            let mut active: canvases::ActiveModel = canvas.into();
            patch(&mut active.name, name);
            patch(&mut active.description, update.description);
            patch(&mut active.photo_url, update.photo_url);
            patch(&mut active.canvas_type, update.canvas_type);
            patch(&mut active.is_archived, update.is_archived);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Soft-delete: mark the canvas archived. Only the owner may do it.
    pub async fn archive_canvas(&self, user_id: i32, canvas_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let canvas = self.find_canvas(&db_tx, canvas_id).await?;
            self.require_canvas_owner(&db_tx, canvas_id, user_id).await?;

            let mut active: canvases::ActiveModel = canvas.into();
            active.is_archived = ActiveValue::Set(true);
            touch!(active, user_id);
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Requested currency, else the user's default, else the fallback code.
    async fn resolve_base_currency<C: ConnectionTrait>(
        &self,
        db: &C,
        user_id: i32,
        requested: Option<i32>,
    ) -> ResultEngine<i32> {
        if let Some(currency_id) = requested {
            return currencies::Entity::find_by_id(currency_id)
                .one(db)
                .await?
                .map(|currency| currency.id)
                .ok_or_else(|| EngineError::InvalidId("Invalid currency ID".to_string()));
        }
        let default = user_settings::Entity::find()
            .filter(user_settings::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .and_then(|settings| settings.default_currency_id);
        if let Some(currency_id) = default {
            return Ok(currency_id);
        }
        currencies::Entity::find()
            .filter(currencies::Column::Code.eq(FALLBACK_CURRENCY))
            .one(db)
            .await?
            .map(|currency| currency.id)
            .ok_or_else(|| {
                EngineError::KeyNotFound(format!("currency {FALLBACK_CURRENCY} not found"))
            })
    }
}

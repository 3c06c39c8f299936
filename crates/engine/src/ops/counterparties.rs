use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, NewCounterparty, ResultEngine, counterparties, entity_types};

use super::{Engine, normalize_optional_text, normalize_required_name, with_tx};

impl Engine {
    /// People, companies, shops and banks a canvas deals with.
    pub async fn counterparties(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<counterparties::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(counterparties::Entity::find()
                .filter(counterparties::Column::CanvasId.eq(canvas_id))
                .order_by_asc(counterparties::Column::Name)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_counterparty(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewCounterparty,
    ) -> ResultEngine<counterparties::Model> {
        let name = normalize_required_name(&new.name, "entity")?;
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            if let Some(type_id) = new.entity_type_id
                && entity_types::Entity::find_by_id(type_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid entity type ID".to_string()));
            }

            let now = Utc::now();
            Ok(counterparties::ActiveModel {
                canvas_id: ActiveValue::Set(canvas_id),
                entity_type_id: ActiveValue::Set(new.entity_type_id),
                name: ActiveValue::Set(name),
                description: ActiveValue::Set(new.description),
                contact_info: ActiveValue::Set(new.contact_info),
                photo_url: ActiveValue::Set(normalize_optional_text(new.photo_url.as_deref())),
                created_at: ActiveValue::Set(now),
                created_by: ActiveValue::Set(Some(user_id)),
                last_modified_at: ActiveValue::Set(now),
                last_modified_by: ActiveValue::Set(Some(user_id)),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?)
        })
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Query,
};

use crate::{EngineError, NewAsset, ResultEngine, assets, currencies, wallets};

use super::{
    Engine, normalize_optional_text, normalize_required_name, require_non_negative, with_tx,
};

impl Engine {
    /// Assets of a canvas: rows stamped with the canvas plus unstamped rows
    /// held by one of its wallets.
    pub async fn assets(&self, user_id: i32, canvas_id: i32) -> ResultEngine<Vec<assets::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            let canvas_wallets = Query::select()
                .column(wallets::Column::Id)
                .from(wallets::Entity)
                .and_where(wallets::Column::CanvasId.eq(canvas_id))
                .to_owned();
            Ok(assets::Entity::find()
                .filter(
                    Condition::any()
                        .add(assets::Column::CanvasId.eq(canvas_id))
                        .add(
                            Condition::all()
                                .add(assets::Column::CanvasId.is_null())
                                .add(assets::Column::WalletId.in_subquery(canvas_wallets)),
                        ),
                )
                .order_by_asc(assets::Column::Name)
                .order_by_asc(assets::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_asset(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewAsset,
    ) -> ResultEngine<assets::Model> {
        let name = normalize_required_name(&new.name, "asset")?;
        let quantity = require_non_negative(new.quantity, "quantity")?;
        let purchase_price = new
            .purchase_price
            .map(|price| require_non_negative(price, "purchase price"))
            .transpose()?;
        let current_value = new
            .current_value
            .map(|value| require_non_negative(value, "current value"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_value_category(&db_tx, canvas_id, new.value_category_id)
                .await?;
            if let Some(wallet_id) = new.wallet_id {
                self.require_wallet_in_canvas(&db_tx, canvas_id, wallet_id)
                    .await?;
            }
            if let Some(owner_id) = new.owner_id {
                self.require_owner_is_member(&db_tx, canvas_id, owner_id)
                    .await?;
            }
            if let Some(currency_id) = new.purchase_currency_id
                && currencies::Entity::find_by_id(currency_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid currency ID".to_string()));
            }

            let now = Utc::now();
            Ok(assets::ActiveModel {
                canvas_id: ActiveValue::Set(Some(canvas_id)),
                name: ActiveValue::Set(name),
                value_category_id: ActiveValue::Set(new.value_category_id),
                wallet_id: ActiveValue::Set(new.wallet_id),
                owner_id: ActiveValue::Set(new.owner_id),
                quantity: ActiveValue::Set(quantity),
                purchase_price: ActiveValue::Set(purchase_price),
                purchase_currency_id: ActiveValue::Set(new.purchase_currency_id),
                purchase_date: ActiveValue::Set(new.purchase_date),
                current_value: ActiveValue::Set(current_value),
                description: ActiveValue::Set(new.description),
                photo_url: ActiveValue::Set(normalize_optional_text(new.photo_url.as_deref())),
                is_active: ActiveValue::Set(true),
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

    pub async fn asset(&self, user_id: i32, asset_id: i32) -> ResultEngine<assets::Model> {
        with_tx!(self, |db_tx| {
            let asset = self.find_asset(&db_tx, asset_id).await?;
            let canvas_id = self.asset_canvas_id(&db_tx, &asset).await?;
            self.require_member_of(&db_tx, canvas_id, user_id).await?;
            Ok(asset)
        })
    }
}

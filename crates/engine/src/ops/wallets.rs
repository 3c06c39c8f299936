use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{NewWallet, ResultEngine, WalletUpdate, assets, wallet_categories, wallets};

use super::{Engine, normalize_optional_text, normalize_required_name, patch, touch, with_tx};

/// A wallet together with its category and the assets it holds.
#[derive(Clone, Debug, PartialEq)]
pub struct WalletDetail {
    pub wallet: wallets::Model,
    pub category: Option<wallet_categories::Model>,
    pub assets: Vec<assets::Model>,
}

impl Engine {
    /// Wallets of a canvas, archived ones included.
    pub async fn wallets(&self, user_id: i32, canvas_id: i32) -> ResultEngine<Vec<wallets::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(wallets::Entity::find()
                .filter(wallets::Column::CanvasId.eq(canvas_id))
                .order_by_asc(wallets::Column::Name)
                .order_by_asc(wallets::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    /// Create a wallet. The owner defaults to the caller and must be a
    /// member of the canvas.
    pub async fn create_wallet(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewWallet,
    ) -> ResultEngine<wallets::Model> {
        let name = normalize_required_name(&new.name, "wallet")?;
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_wallet_category(&db_tx, new.wallet_category_id)
                .await?;
            let owner_id = new.owner_id.unwrap_or(user_id);
            self.require_owner_is_member(&db_tx, canvas_id, owner_id)
                .await?;
            if let Some(entity_id) = new.entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }

            let now = Utc::now();
            Ok(wallets::ActiveModel {
                canvas_id: ActiveValue::Set(canvas_id),
                name: ActiveValue::Set(name),
                wallet_category_id: ActiveValue::Set(new.wallet_category_id),
                owner_id: ActiveValue::Set(owner_id),
                wallet_number: ActiveValue::Set(normalize_optional_text(
                    new.wallet_number.as_deref(),
                )),
                entity_id: ActiveValue::Set(new.entity_id),
                description: ActiveValue::Set(new.description),
                is_archived: ActiveValue::Set(false),
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

    pub async fn wallet(&self, user_id: i32, wallet_id: i32) -> ResultEngine<WalletDetail> {
        with_tx!(self, |db_tx| {
            let wallet = self.find_wallet(&db_tx, wallet_id).await?;
            self.require_canvas_member(&db_tx, wallet.canvas_id, user_id)
                .await?;

            let category = wallet
                .find_related(wallet_categories::Entity)
                .one(&db_tx)
                .await?;
            let assets = wallet
                .find_related(assets::Entity)
                .order_by_asc(assets::Column::Id)
                .all(&db_tx)
                .await?;
            Ok(WalletDetail {
                wallet,
                category,
                assets,
            })
        })
    }

    pub async fn update_wallet(
        &self,
        user_id: i32,
        wallet_id: i32,
        update: WalletUpdate,
    ) -> ResultEngine<wallets::Model> {
        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "wallet"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let wallet = self.find_wallet(&db_tx, wallet_id).await?;
            let canvas_id = wallet.canvas_id;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;

            if let Some(category_id) = update.wallet_category_id {
                self.require_wallet_category(&db_tx, category_id).await?;
            }
            if let Some(owner_id) = update.owner_id {
                self.require_owner_is_member(&db_tx, canvas_id, owner_id)
                    .await?;
            }
            if let Some(Some(entity_id)) = update.entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }

            let mut active: wallets::ActiveModel = wallet.into();
            patch(&mut active.name, name);
            patch(&mut active.wallet_category_id, update.wallet_category_id);
            patch(&mut active.owner_id, update.owner_id);
            patch(&mut active.wallet_number, update.wallet_number);
            patch(&mut active.entity_id, update.entity_id);
            patch(&mut active.description, update.description);
            patch(&mut active.is_archived, update.is_archived);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Soft-delete a wallet.
    pub async fn archive_wallet(&self, user_id: i32, wallet_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let wallet = self.find_wallet(&db_tx, wallet_id).await?;
            self.require_canvas_member(&db_tx, wallet.canvas_id, user_id)
                .await?;

            let mut active: wallets::ActiveModel = wallet.into();
            active.is_archived = ActiveValue::Set(true);
            touch!(active, user_id);
            active.update(&db_tx).await?;
            Ok(())
        })
    }
}

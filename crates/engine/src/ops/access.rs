//! Canvas membership checks and row-to-canvas resolution.
//!
//! Ordering for single-row operations: load the row first (404 when it does
//! not exist), then resolve its canvas and check membership (403).

use sea_orm::{ConnectionTrait, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    EngineError, ResultEngine, assets, canvas_members, canvases, conversions, counterparties,
    expenses, income_resources, income_transactions, users, wallets,
};

use super::{Engine, with_tx};

/// Generates a `find_*` helper returning the row or
/// [`EngineError::KeyNotFound`] with the given message.
macro_rules! impl_find_or_404 {
    ($fn_name:ident, $entity:path, $model:path, $err_msg:literal) => {
        pub(super) async fn $fn_name<C: ConnectionTrait>(
            &self,
            db: &C,
            id: i32,
        ) -> ResultEngine<$model> {
            <$entity>::find_by_id(id)
                .one(db)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound($err_msg.to_string()))
        }
    };
}

impl Engine {
    impl_find_or_404!(find_canvas, canvases::Entity, canvases::Model, "Canvas not found");
    impl_find_or_404!(find_wallet, wallets::Entity, wallets::Model, "Wallet not found");
    impl_find_or_404!(find_asset, assets::Entity, assets::Model, "Asset not found");
    impl_find_or_404!(find_expense, expenses::Entity, expenses::Model, "Expense not found");
    impl_find_or_404!(
        find_income_resource,
        income_resources::Entity,
        income_resources::Model,
        "Income resource not found"
    );
    impl_find_or_404!(
        find_income_transaction,
        income_transactions::Entity,
        income_transactions::Model,
        "Income transaction not found"
    );
    impl_find_or_404!(
        find_conversion,
        conversions::Entity,
        conversions::Model,
        "Conversion not found"
    );
    impl_find_or_404!(find_user, users::Entity, users::Model, "User not found");

    /// Whether `user_id` holds a membership row for `canvas_id`.
    ///
    /// A canvas that does not exist has no members, so this is `false`
    /// rather than an error.
    pub async fn is_canvas_member(&self, canvas_id: i32, user_id: i32) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            Ok(self.membership(&db_tx, canvas_id, user_id).await?.is_some())
        })
    }

    pub(super) async fn membership<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        user_id: i32,
    ) -> ResultEngine<Option<canvas_members::Model>> {
        canvas_members::Entity::find()
            .filter(canvas_members::Column::CanvasId.eq(canvas_id))
            .filter(canvas_members::Column::UserId.eq(user_id))
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_canvas_member<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        user_id: i32,
    ) -> ResultEngine<canvas_members::Model> {
        self.membership(db, canvas_id, user_id)
            .await?
            .ok_or_else(EngineError::access_denied)
    }

    pub(super) async fn require_canvas_owner<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        user_id: i32,
    ) -> ResultEngine<canvas_members::Model> {
        let member = self.require_canvas_member(db, canvas_id, user_id).await?;
        if !member.is_owner {
            return Err(EngineError::access_denied());
        }
        Ok(member)
    }

    /// The canvas an asset belongs to: its own `canvas_id`, else the canvas
    /// of the wallet holding it.
    pub(super) async fn asset_canvas_id<C: ConnectionTrait>(
        &self,
        db: &C,
        asset: &assets::Model,
    ) -> ResultEngine<Option<i32>> {
        if let Some(canvas_id) = asset.canvas_id {
            return Ok(Some(canvas_id));
        }
        let Some(wallet_id) = asset.wallet_id else {
            return Ok(None);
        };
        Ok(wallets::Entity::find_by_id(wallet_id)
            .one(db)
            .await?
            .map(|wallet| wallet.canvas_id))
    }

    /// The canvas of an income transaction: its resource's canvas, else the
    /// canvas of the destination asset.
    pub(super) async fn income_transaction_canvas_id<C: ConnectionTrait>(
        &self,
        db: &C,
        transaction: &income_transactions::Model,
    ) -> ResultEngine<Option<i32>> {
        if let Some(resource_id) = transaction.income_resource_id
            && let Some(resource) = income_resources::Entity::find_by_id(resource_id)
                .one(db)
                .await?
        {
            return Ok(Some(resource.canvas_id));
        }
        let Some(asset) = assets::Entity::find_by_id(transaction.destination_asset_id)
            .one(db)
            .await?
        else {
            return Ok(None);
        };
        self.asset_canvas_id(db, &asset).await
    }

    /// The canvas of a conversion is the canvas of its origin asset.
    pub(super) async fn conversion_canvas_id<C: ConnectionTrait>(
        &self,
        db: &C,
        conversion: &conversions::Model,
    ) -> ResultEngine<Option<i32>> {
        let asset = self.find_asset(db, conversion.origin_asset_id).await?;
        self.asset_canvas_id(db, &asset).await
    }

    /// Membership check against a resolved canvas; an unresolvable canvas is
    /// treated as foreign.
    pub(super) async fn require_member_of<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: Option<i32>,
        user_id: i32,
    ) -> ResultEngine<canvas_members::Model> {
        let Some(canvas_id) = canvas_id else {
            return Err(EngineError::access_denied());
        };
        self.require_canvas_member(db, canvas_id, user_id).await
    }

    /// Loads an asset referenced from a payload and checks that it lives in
    /// `canvas_id`.
    pub(super) async fn require_asset_in_canvas<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        asset_id: i32,
    ) -> ResultEngine<assets::Model> {
        let asset = assets::Entity::find_by_id(asset_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::InvalidId("Invalid asset ID".to_string()))?;
        if self.asset_canvas_id(db, &asset).await? != Some(canvas_id) {
            return Err(EngineError::InvalidId("Invalid asset ID".to_string()));
        }
        Ok(asset)
    }

    pub(super) async fn require_counterparty_in_canvas<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        entity_id: i32,
    ) -> ResultEngine<()> {
        let exists = counterparties::Entity::find_by_id(entity_id)
            .filter(counterparties::Column::CanvasId.eq(canvas_id))
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::InvalidId("Invalid entity ID".to_string()));
        }
        Ok(())
    }

    pub(super) async fn require_wallet_in_canvas<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        wallet_id: i32,
    ) -> ResultEngine<()> {
        let exists = wallets::Entity::find_by_id(wallet_id)
            .filter(wallets::Column::CanvasId.eq(canvas_id))
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::InvalidId("Invalid wallet ID".to_string()));
        }
        Ok(())
    }

    /// Owners of wallets and income resources must themselves be members.
    pub(super) async fn require_owner_is_member<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        owner_id: i32,
    ) -> ResultEngine<()> {
        if self.membership(db, canvas_id, owner_id).await?.is_none() {
            return Err(EngineError::InvalidInput(
                "owner must be a member of the canvas".to_string(),
            ));
        }
        Ok(())
    }
}

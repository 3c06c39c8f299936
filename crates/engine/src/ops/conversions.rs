//! Currency conversions between assets.
//!
//! Conversions form chains through `parent_conversion_id`: a hop may only
//! name a parent that already exists in the same canvas, so chains are
//! acyclic by construction. The chain walk still guards against revisits.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Query,
};

use crate::{
    EngineError, NewConversion, ResultEngine, assets, conversions, currencies,
    income_transactions, wallets,
};

use super::{Engine, normalize_optional_text, require_non_negative, with_tx};

/// `destination / origin`, rounded to the column scale.
fn derive_rate(origin_amount: Decimal, destination_amount: Decimal) -> ResultEngine<Decimal> {
    if origin_amount <= Decimal::ZERO {
        return Err(EngineError::InvalidAmount(
            "origin amount must be greater than zero to derive the exchange rate".to_string(),
        ));
    }
    destination_amount
        .checked_div(origin_amount)
        .map(|rate| rate.round_dp(8))
        .ok_or_else(|| EngineError::InvalidAmount("exchange rate is out of range".to_string()))
}

impl Engine {
    /// Conversions whose origin asset belongs to the canvas, newest first.
    pub async fn conversions(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<conversions::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            let canvas_wallets = Query::select()
                .column(wallets::Column::Id)
                .from(wallets::Entity)
                .and_where(wallets::Column::CanvasId.eq(canvas_id))
                .to_owned();
            let canvas_assets = Query::select()
                .column(assets::Column::Id)
                .from(assets::Entity)
                .cond_where(
                    Condition::any()
                        .add(assets::Column::CanvasId.eq(canvas_id))
                        .add(
                            Condition::all()
                                .add(assets::Column::CanvasId.is_null())
                                .add(assets::Column::WalletId.in_subquery(canvas_wallets)),
                        ),
                )
                .to_owned();
            Ok(conversions::Entity::find()
                .filter(conversions::Column::OriginAssetId.in_subquery(canvas_assets))
                .order_by_desc(conversions::Column::ConversionDate)
                .order_by_desc(conversions::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    /// Record a conversion hop between two assets of the canvas.
    ///
    /// The exchange rate is derived from the amounts when not supplied. A
    /// parent conversion must already exist in the same canvas.
    pub async fn create_conversion(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewConversion,
    ) -> ResultEngine<conversions::Model> {
        let origin_amount = require_non_negative(new.origin_amount, "origin amount")?;
        let destination_amount =
            require_non_negative(new.destination_amount, "destination amount")?;
        let exchange_rate = match new.exchange_rate {
            Some(rate) => rate,
            None => derive_rate(origin_amount, destination_amount)?,
        };
        if exchange_rate <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount(
                "exchange rate must be greater than zero".to_string(),
            ));
        }
        let transaction_fee = require_non_negative(
            new.transaction_fee.unwrap_or(Decimal::ZERO),
            "transaction fee",
        )?;

        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_asset_in_canvas(&db_tx, canvas_id, new.origin_asset_id)
                .await?;
            self.require_asset_in_canvas(&db_tx, canvas_id, new.destination_asset_id)
                .await?;

            if let Some(parent_id) = new.parent_conversion_id {
                let parent = conversions::Entity::find_by_id(parent_id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| {
                        EngineError::InvalidId("Invalid parent conversion ID".to_string())
                    })?;
                if self.conversion_canvas_id(&db_tx, &parent).await? != Some(canvas_id) {
                    return Err(EngineError::InvalidId(
                        "Invalid parent conversion ID".to_string(),
                    ));
                }
            }
            if let Some(transaction_id) = new.income_transaction_id {
                let transaction = income_transactions::Entity::find_by_id(transaction_id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| {
                        EngineError::InvalidId("Invalid income transaction ID".to_string())
                    })?;
                if self
                    .income_transaction_canvas_id(&db_tx, &transaction)
                    .await?
                    != Some(canvas_id)
                {
                    return Err(EngineError::InvalidId(
                        "Invalid income transaction ID".to_string(),
                    ));
                }
            }
            if let Some(currency_id) = new.fee_currency_id
                && currencies::Entity::find_by_id(currency_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid currency ID".to_string()));
            }

            let now = Utc::now();
            Ok(conversions::ActiveModel {
                origin_asset_id: ActiveValue::Set(new.origin_asset_id),
                destination_asset_id: ActiveValue::Set(new.destination_asset_id),
                income_transaction_id: ActiveValue::Set(new.income_transaction_id),
                parent_conversion_id: ActiveValue::Set(new.parent_conversion_id),
                conversion_date: ActiveValue::Set(new.conversion_date),
                origin_amount: ActiveValue::Set(origin_amount),
                destination_amount: ActiveValue::Set(destination_amount),
                exchange_rate: ActiveValue::Set(exchange_rate),
                transaction_fee: ActiveValue::Set(transaction_fee),
                fee_currency_id: ActiveValue::Set(new.fee_currency_id),
                conversion_type: ActiveValue::Set(normalize_optional_text(
                    new.conversion_type.as_deref(),
                )),
                notes: ActiveValue::Set(normalize_optional_text(new.notes.as_deref())),
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

    pub async fn conversion(
        &self,
        user_id: i32,
        conversion_id: i32,
    ) -> ResultEngine<conversions::Model> {
        with_tx!(self, |db_tx| {
            let conversion = self.find_conversion(&db_tx, conversion_id).await?;
            let canvas_id = self.conversion_canvas_id(&db_tx, &conversion).await?;
            self.require_member_of(&db_tx, canvas_id, user_id).await?;
            Ok(conversion)
        })
    }

    /// The hops leading to `conversion_id`, from the root conversion to the
    /// requested one.
    pub async fn conversion_chain(
        &self,
        user_id: i32,
        conversion_id: i32,
    ) -> ResultEngine<Vec<conversions::Model>> {
        with_tx!(self, |db_tx| {
            let conversion = self.find_conversion(&db_tx, conversion_id).await?;
            let canvas_id = self.conversion_canvas_id(&db_tx, &conversion).await?;
            self.require_member_of(&db_tx, canvas_id, user_id).await?;

            let mut visited = HashSet::from([conversion.id]);
            let mut parent_id = conversion.parent_conversion_id;
            let mut chain = vec![conversion];
            while let Some(id) = parent_id {
                if !visited.insert(id) {
                    break;
                }
                let Some(parent) = conversions::Entity::find_by_id(id).one(&db_tx).await? else {
                    break;
                };
                parent_id = parent.parent_conversion_id;
                chain.push(parent);
            }
            chain.reverse();
            Ok(chain)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_is_destination_over_origin() {
        let rate = derive_rate(Decimal::new(100, 0), Decimal::new(92, 0)).unwrap();
        assert_eq!(rate, Decimal::new(92, 2));
    }

    #[test]
    fn rate_needs_positive_origin() {
        assert!(matches!(
            derive_rate(Decimal::ZERO, Decimal::new(5, 0)),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn derived_rate_is_rounded_to_column_scale() {
        let rate = derive_rate(Decimal::new(3, 0), Decimal::new(1, 0)).unwrap();
        assert_eq!(rate, Decimal::new(33_333_333, 8));
    }
}

use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{EngineError, NewExchangeRate, ResultEngine, currencies, exchange_rates};

use super::{Engine, normalize_required_name, with_tx};

fn normalize_code(code: &str) -> ResultEngine<String> {
    let code = code.trim().to_uppercase();
    if code.is_empty() {
        return Err(EngineError::InvalidInput("currency code is required".to_string()));
    }
    Ok(code)
}

impl Engine {
    /// Active currencies ordered by code.
    pub async fn currencies(&self) -> ResultEngine<Vec<currencies::Model>> {
        with_tx!(self, |db_tx| {
            Ok(currencies::Entity::find()
                .filter(currencies::Column::IsActive.eq(true))
                .order_by_asc(currencies::Column::Code)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn currency_by_code(&self, code: &str) -> ResultEngine<currencies::Model> {
        let code = normalize_code(code)?;
        with_tx!(self, |db_tx| self.find_currency_by_code(&db_tx, &code).await)
    }

    pub async fn add_currency(
        &self,
        code: &str,
        name: &str,
        symbol: &str,
        decimals: i32,
        kind: Option<String>,
    ) -> ResultEngine<currencies::Model> {
        let code = normalize_code(code)?;
        let name = normalize_required_name(name, "currency")?;
        if !(0..=18).contains(&decimals) {
            return Err(EngineError::InvalidInput(
                "decimals must be between 0 and 18".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let currency = currencies::ActiveModel {
                code: ActiveValue::Set(code.clone()),
                name: ActiveValue::Set(name),
                symbol: ActiveValue::Set(symbol.trim().to_string()),
                kind: ActiveValue::Set(kind),
                decimals: ActiveValue::Set(decimals),
                photo_url: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                ..Default::default()
            }
            .insert(&db_tx)
            .await
            .map_err(|err| EngineError::on_write(err, code))?;
            Ok(currency)
        })
    }

    /// Record a dated rate meaning `1 from = rate to`.
    pub async fn add_exchange_rate(
        &self,
        new: NewExchangeRate,
    ) -> ResultEngine<exchange_rates::Model> {
        if new.rate <= Decimal::ZERO {
            return Err(EngineError::InvalidAmount(
                "exchange rate must be greater than zero".to_string(),
            ));
        }
        let from = normalize_code(&new.from)?;
        let to = normalize_code(&new.to)?;
        if from == to {
            return Err(EngineError::InvalidInput(
                "exchange rate currencies must differ".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let from = self.find_currency_by_code(&db_tx, &from).await?;
            let to = self.find_currency_by_code(&db_tx, &to).await?;
            Ok(exchange_rates::ActiveModel {
                from_currency_id: ActiveValue::Set(from.id),
                to_currency_id: ActiveValue::Set(to.id),
                rate: ActiveValue::Set(new.rate),
                rate_date: ActiveValue::Set(new.rate_date),
                source: ActiveValue::Set(new.source),
                ..Default::default()
            }
            .insert(&db_tx)
            .await?)
        })
    }

    /// Latest rate converting one unit of `from` into `to`.
    ///
    /// Identical codes yield 1. When only the opposite direction is stored,
    /// its reciprocal is returned.
    pub async fn exchange_rate(&self, from: &str, to: &str) -> ResultEngine<Decimal> {
        let from = normalize_code(from)?;
        let to = normalize_code(to)?;
        if from == to {
            return Ok(Decimal::ONE);
        }
        with_tx!(self, |db_tx| {
            let from = self.find_currency_by_code(&db_tx, &from).await?;
            let to = self.find_currency_by_code(&db_tx, &to).await?;

            if let Some(direct) = self.latest_rate(&db_tx, from.id, to.id).await? {
                return Ok(direct.rate);
            }
            let inverse = self
                .latest_rate(&db_tx, to.id, from.id)
                .await?
                .ok_or_else(|| {
                    EngineError::KeyNotFound(format!(
                        "no exchange rate from {} to {}",
                        from.code, to.code
                    ))
                })?;
            Decimal::ONE.checked_div(inverse.rate).ok_or_else(|| {
                EngineError::InvalidAmount("stored exchange rate is zero".to_string())
            })
        })
    }

    async fn latest_rate<C: ConnectionTrait>(
        &self,
        db: &C,
        from_id: i32,
        to_id: i32,
    ) -> ResultEngine<Option<exchange_rates::Model>> {
        Ok(exchange_rates::Entity::find()
            .filter(exchange_rates::Column::FromCurrencyId.eq(from_id))
            .filter(exchange_rates::Column::ToCurrencyId.eq(to_id))
            .order_by_desc(exchange_rates::Column::RateDate)
            .order_by_desc(exchange_rates::Column::Id)
            .one(db)
            .await?)
    }

    pub(super) async fn find_currency_by_code<C: ConnectionTrait>(
        &self,
        db: &C,
        code: &str,
    ) -> ResultEngine<currencies::Model> {
        currencies::Entity::find()
            .filter(currencies::Column::Code.eq(code))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound(format!("currency {code} not found")))
    }
}

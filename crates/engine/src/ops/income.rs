use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, IncomeResourceUpdate, IncomeTransactionUpdate, NewIncomeForecast,
    NewIncomeResource, NewIncomeTransaction, ResultEngine, currencies, income_forecasts,
    income_resources, income_transactions,
};

use super::{
    Engine, normalize_optional_text, normalize_required_name, patch, require_non_negative, touch,
    with_tx,
};

impl Engine {
    pub async fn income_resources(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<income_resources::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(income_resources::Entity::find()
                .filter(income_resources::Column::CanvasId.eq(canvas_id))
                .order_by_asc(income_resources::Column::Name)
                .order_by_asc(income_resources::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_income_resource(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewIncomeResource,
    ) -> ResultEngine<income_resources::Model> {
        let name = normalize_required_name(&new.name, "income resource")?;
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_income_category(&db_tx, new.income_resource_category_id)
                .await?;
            self.require_value_category(&db_tx, canvas_id, new.default_value_category_id)
                .await?;
            let owner_id = new.owner_id.unwrap_or(user_id);
            self.require_owner_is_member(&db_tx, canvas_id, owner_id)
                .await?;
            if let Some(entity_id) = new.default_entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }
            if let Some(asset_id) = new.default_asset_id {
                self.require_asset_in_canvas(&db_tx, canvas_id, asset_id)
                    .await?;
            }

            let now = Utc::now();
            Ok(income_resources::ActiveModel {
                canvas_id: ActiveValue::Set(canvas_id),
                name: ActiveValue::Set(name),
                income_resource_category_id: ActiveValue::Set(new.income_resource_category_id),
                owner_id: ActiveValue::Set(owner_id),
                default_value_category_id: ActiveValue::Set(new.default_value_category_id),
                default_entity_id: ActiveValue::Set(new.default_entity_id),
                default_asset_id: ActiveValue::Set(new.default_asset_id),
                is_recurring: ActiveValue::Set(new.is_recurring),
                recurrence_pattern: ActiveValue::Set(new.recurrence_pattern),
                photo_url: ActiveValue::Set(normalize_optional_text(new.photo_url.as_deref())),
                description: ActiveValue::Set(new.description),
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

    pub async fn income_resource(
        &self,
        user_id: i32,
        resource_id: i32,
    ) -> ResultEngine<income_resources::Model> {
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            self.require_canvas_member(&db_tx, resource.canvas_id, user_id)
                .await?;
            Ok(resource)
        })
    }

    pub async fn update_income_resource(
        &self,
        user_id: i32,
        resource_id: i32,
        update: IncomeResourceUpdate,
    ) -> ResultEngine<income_resources::Model> {
        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "income resource"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            let canvas_id = resource.canvas_id;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;

            if let Some(category_id) = update.income_resource_category_id {
                self.require_income_category(&db_tx, category_id).await?;
            }
            if let Some(category_id) = update.default_value_category_id {
                self.require_value_category(&db_tx, canvas_id, category_id)
                    .await?;
            }
            if let Some(owner_id) = update.owner_id {
                self.require_owner_is_member(&db_tx, canvas_id, owner_id)
                    .await?;
            }
            if let Some(Some(entity_id)) = update.default_entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }
            if let Some(Some(asset_id)) = update.default_asset_id {
                self.require_asset_in_canvas(&db_tx, canvas_id, asset_id)
                    .await?;
            }

            let mut active: income_resources::ActiveModel = resource.into();
            patch(&mut active.name, name);
            patch(
                &mut active.income_resource_category_id,
                update.income_resource_category_id,
            );
            patch(
                &mut active.default_value_category_id,
                update.default_value_category_id,
            );
            patch(&mut active.owner_id, update.owner_id);
            patch(&mut active.default_entity_id, update.default_entity_id);
            patch(&mut active.default_asset_id, update.default_asset_id);
            patch(&mut active.is_recurring, update.is_recurring);
            patch(&mut active.recurrence_pattern, update.recurrence_pattern);
            patch(&mut active.photo_url, update.photo_url);
            patch(&mut active.description, update.description);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Hard delete. The resource's transactions and forecasts go with it in the same
    /// database transaction; conversions that referenced them keep their
    /// rows with the reference cleared.
    pub async fn delete_income_resource(&self, user_id: i32, resource_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            self.require_canvas_member(&db_tx, resource.canvas_id, user_id)
                .await?;

            income_transactions::Entity::delete_many()
                .filter(income_transactions::Column::IncomeResourceId.eq(resource_id))
                .exec(&db_tx)
                .await?;
            income_forecasts::Entity::delete_many()
                .filter(income_forecasts::Column::IncomeResourceId.eq(resource_id))
                .exec(&db_tx)
                .await?;
            resource.delete(&db_tx).await?;
            Ok(())
        })
    }

    pub async fn income_transactions(
        &self,
        user_id: i32,
        resource_id: i32,
    ) -> ResultEngine<Vec<income_transactions::Model>> {
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            self.require_canvas_member(&db_tx, resource.canvas_id, user_id)
                .await?;
            Ok(resource
                .find_related(income_transactions::Entity)
                .order_by_desc(income_transactions::Column::CreatedAt)
                .order_by_desc(income_transactions::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    /// Record income for a resource. The destination asset must belong to
    /// the resource's canvas.
    pub async fn create_income_transaction(
        &self,
        user_id: i32,
        resource_id: i32,
        new: NewIncomeTransaction,
    ) -> ResultEngine<income_transactions::Model> {
        let amount = require_non_negative(new.amount, "amount")?;
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            let canvas_id = resource.canvas_id;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_asset_in_canvas(&db_tx, canvas_id, new.destination_asset_id)
                .await?;

            let now = Utc::now();
            Ok(income_transactions::ActiveModel {
                income_resource_id: ActiveValue::Set(Some(resource_id)),
                destination_asset_id: ActiveValue::Set(new.destination_asset_id),
                amount: ActiveValue::Set(amount),
                expected_date: ActiveValue::Set(new.expected_date),
                received_date: ActiveValue::Set(new.received_date),
                status: ActiveValue::Set(normalize_optional_text(new.status.as_deref())),
                notes: ActiveValue::Set(normalize_optional_text(new.notes.as_deref())),
                description: ActiveValue::Set(new.description),
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

    pub async fn income_transaction(
        &self,
        user_id: i32,
        transaction_id: i32,
    ) -> ResultEngine<income_transactions::Model> {
        with_tx!(self, |db_tx| {
            let transaction = self
                .find_income_transaction(&db_tx, transaction_id)
                .await?;
            let canvas_id = self
                .income_transaction_canvas_id(&db_tx, &transaction)
                .await?;
            self.require_member_of(&db_tx, canvas_id, user_id).await?;
            Ok(transaction)
        })
    }

    pub async fn update_income_transaction(
        &self,
        user_id: i32,
        transaction_id: i32,
        update: IncomeTransactionUpdate,
    ) -> ResultEngine<income_transactions::Model> {
        let amount = update
            .amount
            .map(|amount| require_non_negative(amount, "amount"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let transaction = self
                .find_income_transaction(&db_tx, transaction_id)
                .await?;
            let canvas_id = self
                .income_transaction_canvas_id(&db_tx, &transaction)
                .await?;
            let member = self.require_member_of(&db_tx, canvas_id, user_id).await?;
            if let Some(asset_id) = update.destination_asset_id {
                self.require_asset_in_canvas(&db_tx, member.canvas_id, asset_id)
                    .await?;
            }

            let mut active: income_transactions::ActiveModel = transaction.into();
            patch(&mut active.destination_asset_id, update.destination_asset_id);
            patch(&mut active.amount, amount);
            patch(&mut active.expected_date, update.expected_date);
            patch(&mut active.received_date, update.received_date);
            patch(&mut active.status, update.status);
            patch(&mut active.notes, update.notes);
            patch(&mut active.description, update.description);
            patch(&mut active.photo_url, update.photo_url);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Hard delete; referencing conversions keep their rows.
    pub async fn delete_income_transaction(
        &self,
        user_id: i32,
        transaction_id: i32,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let transaction = self
                .find_income_transaction(&db_tx, transaction_id)
                .await?;
            let canvas_id = self
                .income_transaction_canvas_id(&db_tx, &transaction)
                .await?;
            self.require_member_of(&db_tx, canvas_id, user_id).await?;
            transaction.delete(&db_tx).await?;
            Ok(())
        })
    }

    /// Forecasts of a resource, ordered by period.
    pub async fn income_forecasts(
        &self,
        user_id: i32,
        resource_id: i32,
    ) -> ResultEngine<Vec<income_forecasts::Model>> {
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            self.require_canvas_member(&db_tx, resource.canvas_id, user_id)
                .await?;
            Ok(resource
                .find_related(income_forecasts::Entity)
                .order_by_asc(income_forecasts::Column::PeriodStart)
                .order_by_asc(income_forecasts::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_income_forecast(
        &self,
        user_id: i32,
        resource_id: i32,
        new: NewIncomeForecast,
    ) -> ResultEngine<income_forecasts::Model> {
        let forecasted = require_non_negative(new.forecasted_amount, "forecasted amount")?;
        let actual = new
            .actual_amount
            .map(|amount| require_non_negative(amount, "actual amount"))
            .transpose()?;
        if new.period_start > new.period_end {
            return Err(EngineError::InvalidInput(
                "period start must not be after period end".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            let resource = self.find_income_resource(&db_tx, resource_id).await?;
            self.require_canvas_member(&db_tx, resource.canvas_id, user_id)
                .await?;
            if let Some(currency_id) = new.currency_id
                && currencies::Entity::find_by_id(currency_id)
                    .one(&db_tx)
                    .await?
                    .is_none()
            {
                return Err(EngineError::InvalidId("Invalid currency ID".to_string()));
            }

            let now = Utc::now();
            Ok(income_forecasts::ActiveModel {
                income_resource_id: ActiveValue::Set(resource_id),
                period_type: ActiveValue::Set(normalize_optional_text(new.period_type.as_deref())),
                period_start: ActiveValue::Set(new.period_start),
                period_end: ActiveValue::Set(new.period_end),
                forecasted_amount: ActiveValue::Set(forecasted),
                actual_amount: ActiveValue::Set(actual),
                currency_id: ActiveValue::Set(new.currency_id),
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

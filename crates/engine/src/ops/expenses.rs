use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    EngineError, ExpenseUpdate, NewExpense, NewSpentTransaction, ResultEngine, conversions,
    currencies, expense_categories, expenses, spent_transactions,
};

use super::{
    Engine, normalize_optional_text, normalize_required_name, patch, require_non_negative, touch,
    with_tx,
};

/// An expense with its category and currency rows.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDetail {
    pub expense: expenses::Model,
    pub category: Option<expense_categories::Model>,
    pub currency: Option<currencies::Model>,
}

impl Engine {
    /// Expenses of a canvas, inactive ones included.
    pub async fn expenses(&self, user_id: i32, canvas_id: i32) -> ResultEngine<Vec<expenses::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(expenses::Entity::find()
                .filter(expenses::Column::CanvasId.eq(canvas_id))
                .order_by_desc(expenses::Column::CreatedAt)
                .order_by_desc(expenses::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_expense(
        &self,
        user_id: i32,
        canvas_id: i32,
        new: NewExpense,
    ) -> ResultEngine<expenses::Model> {
        let name = normalize_required_name(&new.name, "expense")?;
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_expense_category(&db_tx, canvas_id, new.expense_category_id)
                .await?;
            self.require_currency(&db_tx, new.currency_id).await?;
            if let Some(entity_id) = new.entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }

            let now = Utc::now();
            Ok(expenses::ActiveModel {
                canvas_id: ActiveValue::Set(canvas_id),
                name: ActiveValue::Set(name),
                expense_category_id: ActiveValue::Set(new.expense_category_id),
                currency_id: ActiveValue::Set(new.currency_id),
                entity_id: ActiveValue::Set(new.entity_id),
                is_recurring: ActiveValue::Set(new.is_recurring),
                recurrence_pattern: ActiveValue::Set(new.recurrence_pattern),
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

    pub async fn expense(&self, user_id: i32, expense_id: i32) -> ResultEngine<ExpenseDetail> {
        with_tx!(self, |db_tx| {
            let expense = self.find_expense(&db_tx, expense_id).await?;
            self.require_canvas_member(&db_tx, expense.canvas_id, user_id)
                .await?;
            let category = expense
                .find_related(expense_categories::Entity)
                .one(&db_tx)
                .await?;
            let currency = expense
                .find_related(currencies::Entity)
                .one(&db_tx)
                .await?;
            Ok(ExpenseDetail {
                expense,
                category,
                currency,
            })
        })
    }

    pub async fn update_expense(
        &self,
        user_id: i32,
        expense_id: i32,
        update: ExpenseUpdate,
    ) -> ResultEngine<expenses::Model> {
        let name = update
            .name
            .as_deref()
            .map(|name| normalize_required_name(name, "expense"))
            .transpose()?;
        with_tx!(self, |db_tx| {
            let expense = self.find_expense(&db_tx, expense_id).await?;
            let canvas_id = expense.canvas_id;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;

            if let Some(category_id) = update.expense_category_id {
                self.require_expense_category(&db_tx, canvas_id, category_id)
                    .await?;
            }
            if let Some(currency_id) = update.currency_id {
                self.require_currency(&db_tx, currency_id).await?;
            }
            if let Some(Some(entity_id)) = update.entity_id {
                self.require_counterparty_in_canvas(&db_tx, canvas_id, entity_id)
                    .await?;
            }

            let mut active: expenses::ActiveModel = expense.into();
            patch(&mut active.name, name);
            patch(&mut active.expense_category_id, update.expense_category_id);
            patch(&mut active.currency_id, update.currency_id);
            patch(&mut active.entity_id, update.entity_id);
            patch(&mut active.is_recurring, update.is_recurring);
            patch(&mut active.recurrence_pattern, update.recurrence_pattern);
            patch(&mut active.description, update.description);
            patch(&mut active.photo_url, update.photo_url);
            patch(&mut active.is_active, update.is_active);
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    /// Soft-delete an expense by clearing `is_active`.
    pub async fn deactivate_expense(&self, user_id: i32, expense_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let expense = self.find_expense(&db_tx, expense_id).await?;
            self.require_canvas_member(&db_tx, expense.canvas_id, user_id)
                .await?;

            let mut active: expenses::ActiveModel = expense.into();
            active.is_active = ActiveValue::Set(false);
            touch!(active, user_id);
            active.update(&db_tx).await?;
            Ok(())
        })
    }

    /// Spending records of an expense, most recent first.
    pub async fn spent_transactions(
        &self,
        user_id: i32,
        expense_id: i32,
    ) -> ResultEngine<Vec<spent_transactions::Model>> {
        with_tx!(self, |db_tx| {
            let expense = self.find_expense(&db_tx, expense_id).await?;
            self.require_canvas_member(&db_tx, expense.canvas_id, user_id)
                .await?;
            Ok(expense
                .find_related(spent_transactions::Entity)
                .order_by_desc(spent_transactions::Column::CreatedAt)
                .order_by_desc(spent_transactions::Column::Id)
                .all(&db_tx)
                .await?)
        })
    }

    /// Record a payment against an expense. The origin asset, and the
    /// conversion it was funded by when given, must be in the expense's
    /// canvas.
    pub async fn create_spent_transaction(
        &self,
        user_id: i32,
        expense_id: i32,
        new: NewSpentTransaction,
    ) -> ResultEngine<spent_transactions::Model> {
        let amount = require_non_negative(new.amount, "amount")?;
        with_tx!(self, |db_tx| {
            let expense = self.find_expense(&db_tx, expense_id).await?;
            let canvas_id = expense.canvas_id;
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            self.require_asset_in_canvas(&db_tx, canvas_id, new.origin_asset_id)
                .await?;
            if let Some(conversion_id) = new.converted_transaction_id {
                let conversion = conversions::Entity::find_by_id(conversion_id)
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::InvalidId("Invalid conversion ID".to_string()))?;
                if self.conversion_canvas_id(&db_tx, &conversion).await? != Some(canvas_id) {
                    return Err(EngineError::InvalidId("Invalid conversion ID".to_string()));
                }
            }

            let now = Utc::now();
            Ok(spent_transactions::ActiveModel {
                expense_id: ActiveValue::Set(expense_id),
                origin_asset_id: ActiveValue::Set(new.origin_asset_id),
                converted_transaction_id: ActiveValue::Set(new.converted_transaction_id),
                amount: ActiveValue::Set(amount),
                due_date: ActiveValue::Set(new.due_date),
                paid_date: ActiveValue::Set(new.paid_date),
                status: ActiveValue::Set(normalize_optional_text(new.status.as_deref())),
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

    pub(super) async fn require_currency<C: ConnectionTrait>(
        &self,
        db: &C,
        currency_id: i32,
    ) -> ResultEngine<currencies::Model> {
        currencies::Entity::find_by_id(currency_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::InvalidId("Invalid currency ID".to_string()))
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};

use crate::{
    EngineError, IncomeCategoryChange, ResultEngine, expense_categories, income_categories,
    income_resources, value_categories, wallet_categories,
};

use super::{Engine, normalize_optional_text, normalize_required_name, touch, with_tx};

impl Engine {
    pub async fn wallet_categories(&self) -> ResultEngine<Vec<wallet_categories::Model>> {
        with_tx!(self, |db_tx| {
            Ok(wallet_categories::Entity::find()
                .order_by_asc(wallet_categories::Column::Name)
                .all(&db_tx)
                .await?)
        })
    }

    /// Income resource categories are global: system rows plus every
    /// user-created one.
    pub async fn income_categories(&self) -> ResultEngine<Vec<income_categories::Model>> {
        with_tx!(self, |db_tx| {
            Ok(income_categories::Entity::find()
                .order_by_desc(income_categories::Column::IsSystemCategory)
                .order_by_asc(income_categories::Column::Name)
                .all(&db_tx)
                .await?)
        })
    }

    pub async fn create_income_category(
        &self,
        user_id: i32,
        change: IncomeCategoryChange,
    ) -> ResultEngine<income_categories::Model> {
        let name = normalize_required_name(&change.name, "category")?;
        with_tx!(self, |db_tx| {
            let now = Utc::now();
            Ok(income_categories::ActiveModel {
                name: ActiveValue::Set(name),
                photo_url: ActiveValue::Set(normalize_optional_text(change.photo_url.as_deref())),
                is_system_category: ActiveValue::Set(false),
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

    /// Rename a user category. System categories are immutable and only the
    /// creator may change a user category.
    pub async fn update_income_category(
        &self,
        user_id: i32,
        category_id: i32,
        change: IncomeCategoryChange,
    ) -> ResultEngine<income_categories::Model> {
        let name = normalize_required_name(&change.name, "category")?;
        with_tx!(self, |db_tx| {
            let category = self.find_income_category(&db_tx, category_id).await?;
            if category.is_system_category {
                return Err(EngineError::Forbidden(
                    "System categories cannot be modified".to_string(),
                ));
            }
            if category.created_by != Some(user_id) {
                return Err(EngineError::access_denied());
            }
            let mut active: income_categories::ActiveModel = category.into();
            active.name = ActiveValue::Set(name);
            active.photo_url =
                ActiveValue::Set(normalize_optional_text(change.photo_url.as_deref()));
            touch!(active, user_id);
            Ok(active.update(&db_tx).await?)
        })
    }

    pub async fn delete_income_category(&self, user_id: i32, category_id: i32) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let category = self.find_income_category(&db_tx, category_id).await?;
            if category.is_system_category {
                return Err(EngineError::Forbidden(
                    "System categories cannot be deleted".to_string(),
                ));
            }
            if category.created_by != Some(user_id) {
                return Err(EngineError::access_denied());
            }
            let in_use = income_resources::Entity::find()
                .filter(income_resources::Column::IncomeResourceCategoryId.eq(category_id))
                .count(&db_tx)
                .await?;
            if in_use > 0 {
                return Err(EngineError::InvalidInput(
                    "category is used by income resources".to_string(),
                ));
            }
            category.delete(&db_tx).await?;
            Ok(())
        })
    }

    /// System expense categories plus the canvas' own, parents first.
    pub async fn expense_categories(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<expense_categories::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            Ok(expense_categories::Entity::find()
                .filter(
                    Condition::any()
                        .add(expense_categories::Column::CanvasId.is_null())
                        .add(expense_categories::Column::CanvasId.eq(canvas_id)),
                )
                .order_by_asc(expense_categories::Column::Level)
                .order_by_asc(expense_categories::Column::Name)
                .all(&db_tx)
                .await?)
        })
    }

    /// System value categories plus the canvas' own. With
    /// `wallet_compatible = Some(true)` only categories that can be held in
    /// a wallet are returned.
    pub async fn value_categories(
        &self,
        user_id: i32,
        canvas_id: i32,
        wallet_compatible: Option<bool>,
    ) -> ResultEngine<Vec<value_categories::Model>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            let mut query = value_categories::Entity::find().filter(
                Condition::any()
                    .add(value_categories::Column::CanvasId.is_null())
                    .add(value_categories::Column::CanvasId.eq(canvas_id)),
            );
            if let Some(flag) = wallet_compatible {
                query = query.filter(value_categories::Column::IsWalletCompatible.eq(flag));
            }
            Ok(query
                .order_by_asc(value_categories::Column::Name)
                .all(&db_tx)
                .await?)
        })
    }

    async fn find_income_category<C: ConnectionTrait>(
        &self,
        db: &C,
        category_id: i32,
    ) -> ResultEngine<income_categories::Model> {
        income_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("Category not found".to_string()))
    }

    /// An expense category usable from `canvas_id`: a system row or one of
    /// the canvas' own.
    pub(super) async fn require_expense_category<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        category_id: i32,
    ) -> ResultEngine<expense_categories::Model> {
        expense_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .filter(|category| category.canvas_id.is_none_or(|id| id == canvas_id))
            .ok_or_else(|| EngineError::InvalidId("Invalid expense category ID".to_string()))
    }

    pub(super) async fn require_value_category<C: ConnectionTrait>(
        &self,
        db: &C,
        canvas_id: i32,
        category_id: i32,
    ) -> ResultEngine<value_categories::Model> {
        value_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .filter(|category| category.canvas_id.is_none_or(|id| id == canvas_id))
            .ok_or_else(|| EngineError::InvalidId("Invalid value category ID".to_string()))
    }

    pub(super) async fn require_income_category<C: ConnectionTrait>(
        &self,
        db: &C,
        category_id: i32,
    ) -> ResultEngine<income_categories::Model> {
        income_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::InvalidId("Invalid income category ID".to_string()))
    }

    pub(super) async fn require_wallet_category<C: ConnectionTrait>(
        &self,
        db: &C,
        category_id: i32,
    ) -> ResultEngine<wallet_categories::Model> {
        wallet_categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::InvalidId("Invalid wallet category ID".to_string()))
    }
}

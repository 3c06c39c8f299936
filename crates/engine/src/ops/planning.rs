use rust_decimal::Decimal;
use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    ResultEngine, budget_tracking, budgets, debt_payments, debts, financial_goals,
    financial_plans, to_buy_items,
};

use super::{Engine, with_tx};

/// A debt with the totals derived from its payments.
#[derive(Clone, Debug, PartialEq)]
pub struct DebtSummary {
    pub debt: debts::Model,
    pub paid_amount: Decimal,
    /// `principal - paid`, floored at zero.
    pub outstanding_amount: Decimal,
}

impl DebtSummary {
    fn new(debt: debts::Model, payments: &[debt_payments::Model]) -> Self {
        let paid_amount: Decimal = payments.iter().map(|payment| payment.amount).sum();
        let outstanding_amount = (debt.principal_amount - paid_amount).max(Decimal::ZERO);
        Self {
            debt,
            paid_amount,
            outstanding_amount,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetWithTracking {
    pub budget: budgets::Model,
    pub tracking: Vec<budget_tracking::Model>,
}

/// Generates a member-gated list of a canvas-scoped table.
macro_rules! impl_canvas_list {
    ($fn_name:ident, $module:ident, $order:ident) => {
        pub async fn $fn_name(
            &self,
            user_id: i32,
            canvas_id: i32,
        ) -> ResultEngine<Vec<$module::Model>> {
            with_tx!(self, |db_tx| {
                self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
                Ok($module::Entity::find()
                    .filter($module::Column::CanvasId.eq(canvas_id))
                    .order_by_asc($module::Column::$order)
                    .order_by_asc($module::Column::Id)
                    .all(&db_tx)
                    .await?)
            })
        }
    };
}

impl Engine {
    impl_canvas_list!(financial_plans, financial_plans, StartDate);
    impl_canvas_list!(financial_goals, financial_goals, Priority);
    impl_canvas_list!(to_buy_items, to_buy_items, Priority);

    pub async fn debts(&self, user_id: i32, canvas_id: i32) -> ResultEngine<Vec<DebtSummary>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            let rows = debts::Entity::find()
                .filter(debts::Column::CanvasId.eq(canvas_id))
                .order_by_asc(debts::Column::Id)
                .find_with_related(debt_payments::Entity)
                .all(&db_tx)
                .await?;
            Ok(rows
                .into_iter()
                .map(|(debt, payments)| DebtSummary::new(debt, &payments))
                .collect())
        })
    }

    pub async fn budgets(
        &self,
        user_id: i32,
        canvas_id: i32,
    ) -> ResultEngine<Vec<BudgetWithTracking>> {
        with_tx!(self, |db_tx| {
            self.require_canvas_member(&db_tx, canvas_id, user_id).await?;
            let rows = budgets::Entity::find()
                .filter(budgets::Column::CanvasId.eq(canvas_id))
                .order_by_asc(budgets::Column::Id)
                .find_with_related(budget_tracking::Entity)
                .order_by_asc(budget_tracking::Column::PeriodStart)
                .all(&db_tx)
                .await?;
            Ok(rows
                .into_iter()
                .map(|(budget, tracking)| BudgetWithTracking { budget, tracking })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;

    fn debt(principal: Decimal) -> debts::Model {
        let now = Utc::now();
        debts::Model {
            id: 1,
            canvas_id: 1,
            debt_type_id: 1,
            entity_id: 1,
            name: "Car loan".to_string(),
            principal_amount: principal,
            currency_id: 1,
            interest_rate: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            due_date: None,
            status: None,
            notes: None,
            created_at: now,
            created_by: None,
            last_modified_at: now,
            last_modified_by: None,
        }
    }

    fn payment(amount: Decimal) -> debt_payments::Model {
        let now = Utc::now();
        debt_payments::Model {
            id: 1,
            debt_id: 1,
            asset_id: None,
            amount,
            payment_type: None,
            payment_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            notes: None,
            created_at: now,
            created_by: None,
            last_modified_at: now,
            last_modified_by: None,
        }
    }

    #[test]
    fn outstanding_is_principal_minus_payments() {
        let summary = DebtSummary::new(
            debt(Decimal::new(1000, 0)),
            &[payment(Decimal::new(250, 0)), payment(Decimal::new(100, 0))],
        );
        assert_eq!(summary.paid_amount, Decimal::new(350, 0));
        assert_eq!(summary.outstanding_amount, Decimal::new(650, 0));
    }

    #[test]
    fn overpayment_floors_outstanding_at_zero() {
        let summary = DebtSummary::new(debt(Decimal::new(100, 0)), &[payment(Decimal::new(120, 0))]);
        assert_eq!(summary.outstanding_amount, Decimal::ZERO);
    }
}

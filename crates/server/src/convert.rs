//! Engine rows to API bodies.

use api_types::{
    asset::Asset,
    auth::{Session, Settings, User},
    canvas::Canvas,
    category::{ExpenseCategory, ValueCategory, WalletCategory},
    conversion::Conversion,
    currency::Currency,
    entity::Entity,
    expense::{Expense, SpentTransaction},
    income::{IncomeCategory, IncomeForecast, IncomeResource, IncomeTransaction},
    member::{Invitation, Member},
    planning::{Budget, BudgetPeriod, Debt, FinancialGoal, FinancialPlan, ToBuyItem},
    wallet::Wallet,
};
use engine::{BudgetWithTracking, CanvasMembership, DebtSummary, MemberWithUser};

use crate::identity::ProviderSession;

pub fn canvas(model: engine::Canvas) -> Canvas {
    Canvas {
        id: model.id,
        name: model.name,
        description: model.description,
        photo_url: model.photo_url,
        canvas_type: model.canvas_type,
        is_archived: model.is_archived,
        is_owner: None,
        base_currency_id: None,
        created_at: model.created_at,
        created_by: model.created_by,
        last_modified_at: model.last_modified_at,
        last_modified_by: model.last_modified_by,
    }
}

pub fn canvas_membership(item: CanvasMembership) -> Canvas {
    Canvas {
        is_owner: Some(item.is_owner),
        base_currency_id: Some(item.base_currency_id),
        ..canvas(item.canvas)
    }
}

pub fn member(model: engine::CanvasMember) -> Member {
    Member {
        id: model.id,
        canvas_id: model.canvas_id,
        user_id: model.user_id,
        role_id: model.role_id,
        base_currency_id: model.base_currency_id,
        is_owner: model.is_owner,
        joined_at: model.joined_at,
        email: None,
        first_name: None,
        last_name: None,
    }
}

pub fn member_with_user(item: MemberWithUser) -> Member {
    Member {
        email: Some(item.user.email),
        first_name: item.user.first_name,
        last_name: item.user.last_name,
        ..member(item.member)
    }
}

/// The token is left out; only the creating handler hands it back.
pub fn invitation(model: engine::CanvasInvitation) -> Invitation {
    Invitation {
        id: model.id,
        canvas_id: model.canvas_id,
        inviter_id: model.inviter_id,
        invitee_email: model.invitee_email,
        role_id: model.role_id,
        status: model.status,
        expires_at: model.expires_at,
        accepted_at: model.accepted_at,
        created_at: model.created_at,
        token: None,
    }
}

pub fn wallet(model: engine::Wallet) -> Wallet {
    Wallet {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        wallet_category_id: model.wallet_category_id,
        owner_id: model.owner_id,
        wallet_number: model.wallet_number,
        entity_id: model.entity_id,
        description: model.description,
        is_archived: model.is_archived,
        created_at: model.created_at,
        created_by: model.created_by,
        last_modified_at: model.last_modified_at,
        last_modified_by: model.last_modified_by,
        category: None,
        assets: None,
    }
}

pub fn wallet_category(model: engine::WalletCategory) -> WalletCategory {
    WalletCategory {
        id: model.id,
        name: model.name,
        photo_url: model.photo_url,
        is_system_category: model.is_system_category,
    }
}

pub fn asset(model: engine::Asset) -> Asset {
    Asset {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        value_category_id: model.value_category_id,
        wallet_id: model.wallet_id,
        owner_id: model.owner_id,
        quantity: model.quantity,
        purchase_price: model.purchase_price,
        purchase_currency_id: model.purchase_currency_id,
        purchase_date: model.purchase_date,
        current_value: model.current_value,
        description: model.description,
        photo_url: model.photo_url,
        is_active: model.is_active,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

pub fn currency(model: engine::Currency) -> Currency {
    Currency {
        id: model.id,
        code: model.code,
        name: model.name,
        symbol: model.symbol,
        kind: model.kind,
        decimals: model.decimals,
        photo_url: model.photo_url,
        is_active: model.is_active,
    }
}

pub fn expense_category(model: engine::ExpenseCategory) -> ExpenseCategory {
    ExpenseCategory {
        id: model.id,
        canvas_id: model.canvas_id,
        parent_category_id: model.parent_category_id,
        name: model.name,
        photo_url: model.photo_url,
        level: model.level,
        is_system_category: model.is_system_category,
    }
}

pub fn value_category(model: engine::ValueCategory) -> ValueCategory {
    ValueCategory {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        category_type: model.category_type,
        currency_id: model.currency_id,
        unit: model.unit,
        is_fungible: model.is_fungible,
        is_wallet_compatible: model.is_wallet_compatible,
        photo_url: model.photo_url,
    }
}

pub fn expense(model: engine::Expense) -> Expense {
    Expense {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        expense_category_id: model.expense_category_id,
        currency_id: model.currency_id,
        entity_id: model.entity_id,
        is_recurring: model.is_recurring,
        recurrence_pattern: model.recurrence_pattern,
        description: model.description,
        photo_url: model.photo_url,
        is_active: model.is_active,
        created_at: model.created_at,
        created_by: model.created_by,
        last_modified_at: model.last_modified_at,
        last_modified_by: model.last_modified_by,
        category: None,
        currency: None,
    }
}

pub fn spent_transaction(model: engine::SpentTransaction) -> SpentTransaction {
    SpentTransaction {
        id: model.id,
        expense_id: model.expense_id,
        origin_asset_id: model.origin_asset_id,
        converted_transaction_id: model.converted_transaction_id,
        amount: model.amount,
        due_date: model.due_date,
        paid_date: model.paid_date,
        status: model.status,
        notes: model.notes,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

pub fn income_resource(model: engine::IncomeResource) -> IncomeResource {
    IncomeResource {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        income_resource_category_id: model.income_resource_category_id,
        owner_id: model.owner_id,
        default_value_category_id: model.default_value_category_id,
        default_entity_id: model.default_entity_id,
        default_asset_id: model.default_asset_id,
        is_recurring: model.is_recurring,
        recurrence_pattern: model.recurrence_pattern,
        photo_url: model.photo_url,
        description: model.description,
        created_at: model.created_at,
        created_by: model.created_by,
        last_modified_at: model.last_modified_at,
        last_modified_by: model.last_modified_by,
    }
}

pub fn income_transaction(model: engine::IncomeTransaction) -> IncomeTransaction {
    IncomeTransaction {
        id: model.id,
        income_resource_id: model.income_resource_id,
        destination_asset_id: model.destination_asset_id,
        amount: model.amount,
        expected_date: model.expected_date,
        received_date: model.received_date,
        status: model.status,
        notes: model.notes,
        description: model.description,
        photo_url: model.photo_url,
        created_at: model.created_at,
        created_by: model.created_by,
        last_modified_at: model.last_modified_at,
        last_modified_by: model.last_modified_by,
    }
}

pub fn income_forecast(model: engine::IncomeForecast) -> IncomeForecast {
    IncomeForecast {
        id: model.id,
        income_resource_id: model.income_resource_id,
        period_type: model.period_type,
        period_start: model.period_start,
        period_end: model.period_end,
        forecasted_amount: model.forecasted_amount,
        actual_amount: model.actual_amount,
        currency_id: model.currency_id,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

pub fn income_category(model: engine::IncomeCategory) -> IncomeCategory {
    IncomeCategory {
        id: model.id,
        name: model.name,
        photo_url: model.photo_url,
        is_system_category: model.is_system_category,
        created_by: model.created_by,
    }
}

pub fn conversion(model: engine::Conversion) -> Conversion {
    Conversion {
        id: model.id,
        origin_asset_id: model.origin_asset_id,
        destination_asset_id: model.destination_asset_id,
        income_transaction_id: model.income_transaction_id,
        parent_conversion_id: model.parent_conversion_id,
        conversion_date: model.conversion_date,
        origin_amount: model.origin_amount,
        destination_amount: model.destination_amount,
        exchange_rate: model.exchange_rate,
        transaction_fee: model.transaction_fee,
        fee_currency_id: model.fee_currency_id,
        conversion_type: model.conversion_type,
        notes: model.notes,
        created_at: model.created_at,
        created_by: model.created_by,
    }
}

pub fn entity(model: engine::Counterparty) -> Entity {
    Entity {
        id: model.id,
        canvas_id: model.canvas_id,
        entity_type_id: model.entity_type_id,
        name: model.name,
        description: model.description,
        contact_info: model.contact_info,
        photo_url: model.photo_url,
    }
}

pub fn debt(summary: DebtSummary) -> Debt {
    let DebtSummary {
        debt,
        paid_amount,
        outstanding_amount,
    } = summary;
    Debt {
        id: debt.id,
        canvas_id: debt.canvas_id,
        debt_type_id: debt.debt_type_id,
        entity_id: debt.entity_id,
        name: debt.name,
        principal_amount: debt.principal_amount,
        currency_id: debt.currency_id,
        interest_rate: debt.interest_rate,
        start_date: debt.start_date,
        due_date: debt.due_date,
        status: debt.status,
        notes: debt.notes,
        paid_amount,
        outstanding_amount,
    }
}

pub fn budget(item: BudgetWithTracking) -> Budget {
    let BudgetWithTracking { budget, tracking } = item;
    Budget {
        id: budget.id,
        canvas_id: budget.canvas_id,
        name: budget.name,
        expense_category_id: budget.expense_category_id,
        amount: budget.amount,
        currency_id: budget.currency_id,
        period_type: budget.period_type,
        start_date: budget.start_date,
        end_date: budget.end_date,
        rollover_unused: budget.rollover_unused,
        alert_threshold: budget.alert_threshold,
        is_active: budget.is_active,
        tracking: tracking
            .into_iter()
            .map(|period| BudgetPeriod {
                id: period.id,
                period_start: period.period_start,
                period_end: period.period_end,
                spent_amount: period.spent_amount,
                remaining_amount: period.remaining_amount,
                status: period.status,
            })
            .collect(),
    }
}

pub fn financial_plan(model: engine::FinancialPlan) -> FinancialPlan {
    FinancialPlan {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        plan_type: model.plan_type,
        start_date: model.start_date,
        end_date: model.end_date,
        target_savings: model.target_savings,
        target_income: model.target_income,
        target_expenses: model.target_expenses,
        currency_id: model.currency_id,
        status: model.status,
    }
}

pub fn financial_goal(model: engine::FinancialGoal) -> FinancialGoal {
    FinancialGoal {
        id: model.id,
        canvas_id: model.canvas_id,
        financial_plan_id: model.financial_plan_id,
        name: model.name,
        goal_type: model.goal_type,
        target_amount: model.target_amount,
        current_amount: model.current_amount,
        currency_id: model.currency_id,
        target_date: model.target_date,
        priority: model.priority,
        status: model.status,
    }
}

pub fn to_buy_item(model: engine::ToBuyItem) -> ToBuyItem {
    ToBuyItem {
        id: model.id,
        canvas_id: model.canvas_id,
        name: model.name,
        description: model.description,
        estimated_price: model.estimated_price,
        currency_id: model.currency_id,
        priority: model.priority,
        category: model.category,
        target_purchase_date: model.target_purchase_date,
        actual_purchase_date: model.actual_purchase_date,
        actual_price: model.actual_price,
        purchased_from_entity_id: model.purchased_from_entity_id,
        status: model.status,
    }
}

pub fn user(model: engine::User) -> User {
    User {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        photo_url: model.photo_url,
        age: model.age,
        phone: model.phone,
        email_verified: model.email_verified,
        created_at: model.created_at,
    }
}

pub fn settings(model: engine::UserSettings) -> Settings {
    Settings {
        timezone: model.timezone,
        language: model.language,
        date_format: model.date_format,
        default_currency_id: model.default_currency_id,
        theme: model.theme,
        notification_enabled: model.notification_enabled,
    }
}

pub fn session(session: ProviderSession) -> Session {
    Session {
        access_token: session.access_token,
        refresh_token: session.refresh_token,
        expires_in: session.expires_in,
        token_type: session.token_type,
    }
}

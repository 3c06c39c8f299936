//! Domain engine: persistence model and access-controlled operations for
//! canvases and everything they contain.
//!
//! Every canvas-scoped operation takes the caller's user id and checks that
//! a `canvas_members` row links the caller to the canvas before touching any
//! data. See [`Engine`].

pub use commands::{
    CanvasFilter, CanvasUpdate, ExpenseUpdate, IncomeCategoryChange, IncomeResourceUpdate,
    IncomeTransactionUpdate, MemberRef, NewAsset, NewCanvas, NewConversion, NewCounterparty,
    NewExchangeRate, NewExpense, NewIncomeForecast, NewIncomeResource, NewIncomeTransaction,
    NewInvitation, NewMember, NewSpentTransaction, NewWallet, SettingsUpdate, UserIdentity,
    WalletUpdate,
};
pub use error::EngineError;
pub use ops::{
    BudgetWithTracking, CanvasMembership, DebtSummary, ExpenseDetail, MemberWithUser,
    WalletDetail,
};

pub use assets::Model as Asset;
pub use budget_tracking::Model as BudgetTracking;
pub use budgets::Model as Budget;
pub use canvas_invitations::Model as CanvasInvitation;
pub use canvas_members::Model as CanvasMember;
pub use canvases::Model as Canvas;
pub use conversions::Model as Conversion;
pub use counterparties::Model as Counterparty;
pub use currencies::Model as Currency;
pub use debts::Model as Debt;
pub use exchange_rates::Model as ExchangeRate;
pub use expense_categories::Model as ExpenseCategory;
pub use expenses::Model as Expense;
pub use financial_goals::Model as FinancialGoal;
pub use financial_plans::Model as FinancialPlan;
pub use income_categories::Model as IncomeCategory;
pub use income_forecasts::Model as IncomeForecast;
pub use income_resources::Model as IncomeResource;
pub use income_transactions::Model as IncomeTransaction;
pub use spent_transactions::Model as SpentTransaction;
pub use to_buy_items::Model as ToBuyItem;
pub use user_settings::Model as UserSettings;
pub use users::Model as User;
pub use value_categories::Model as ValueCategory;
pub use wallet_categories::Model as WalletCategory;
pub use wallets::Model as Wallet;

pub use ops::Engine;

mod commands;
mod error;
mod ops;

pub mod assets;
pub mod budget_tracking;
pub mod budgets;
pub mod canvas_invitations;
pub mod canvas_members;
pub mod canvases;
pub mod conversions;
pub mod counterparties;
pub mod currencies;
pub mod debt_payments;
pub mod debt_types;
pub mod debts;
pub mod entity_types;
pub mod exchange_rates;
pub mod expense_categories;
pub mod expenses;
pub mod financial_goals;
pub mod financial_plans;
pub mod income_categories;
pub mod income_forecasts;
pub mod income_resources;
pub mod income_transactions;
pub mod roles;
pub mod spent_transactions;
pub mod to_buy_items;
pub mod user_settings;
pub mod users;
pub mod value_categories;
pub mod wallet_categories;
pub mod wallets;

type ResultEngine<T> = Result<T, EngineError>;

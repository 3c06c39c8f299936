//! Command structs for engine operations.
//!
//! Creation commands carry the already-validated required fields. Update
//! commands follow one convention: `None` leaves a column untouched, and for
//! nullable columns `Some(None)` clears it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde_json::Value as Json;

/// Identity of an authenticated caller, as reported by the identity
/// provider.
#[derive(Clone, Debug)]
pub struct UserIdentity {
    pub external_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_verified: bool,
}

#[derive(Clone, Debug, Default)]
pub struct SettingsUpdate {
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub date_format: Option<String>,
    pub default_currency_id: Option<Option<i32>>,
    pub theme: Option<String>,
    pub notification_enabled: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct NewCanvas {
    pub name: String,
    pub description: Option<String>,
    pub photo_url: Option<String>,
    pub canvas_type: Option<String>,
    pub base_currency_id: Option<i32>,
}

impl NewCanvas {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn base_currency_id(mut self, currency_id: i32) -> Self {
        self.base_currency_id = Some(currency_id);
        self
    }
}

#[derive(Clone, Debug, Default)]
pub struct CanvasUpdate {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub photo_url: Option<Option<String>>,
    pub canvas_type: Option<Option<String>>,
    pub is_archived: Option<bool>,
}

/// Who to add to a canvas: either an existing user id or an email.
#[derive(Clone, Debug)]
pub enum MemberRef {
    Id(i32),
    Email(String),
}

#[derive(Clone, Debug)]
pub struct NewMember {
    pub user: MemberRef,
    pub role_id: Option<i32>,
    pub base_currency_id: Option<i32>,
}

/// An invitation for `email` to join a canvas. `token` is generated by the
/// caller and handed to the invitee out of band.
#[derive(Clone, Debug)]
pub struct NewInvitation {
    pub email: String,
    pub role_id: Option<i32>,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct NewWallet {
    pub name: String,
    pub wallet_category_id: i32,
    pub owner_id: Option<i32>,
    pub wallet_number: Option<String>,
    pub entity_id: Option<i32>,
    pub description: Option<Json>,
}

#[derive(Clone, Debug, Default)]
pub struct WalletUpdate {
    pub name: Option<String>,
    pub wallet_category_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub wallet_number: Option<Option<String>>,
    pub entity_id: Option<Option<i32>>,
    pub description: Option<Option<Json>>,
    pub is_archived: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct NewAsset {
    pub name: String,
    pub value_category_id: i32,
    pub wallet_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub quantity: Decimal,
    pub purchase_price: Option<Decimal>,
    pub purchase_currency_id: Option<i32>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub current_value: Option<Decimal>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewExpense {
    pub name: String,
    pub expense_category_id: i32,
    pub currency_id: i32,
    pub entity_id: Option<i32>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<Json>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct ExpenseUpdate {
    pub name: Option<String>,
    pub expense_category_id: Option<i32>,
    pub currency_id: Option<i32>,
    pub entity_id: Option<Option<i32>>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<Option<Json>>,
    pub description: Option<Option<Json>>,
    pub photo_url: Option<Option<String>>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Default)]
pub struct NewSpentTransaction {
    pub origin_asset_id: i32,
    pub converted_transaction_id: Option<i32>,
    pub amount: Decimal,
    pub due_date: Option<DateTime<Utc>>,
    pub paid_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewIncomeResource {
    pub name: String,
    pub income_resource_category_id: i32,
    pub default_value_category_id: i32,
    pub owner_id: Option<i32>,
    pub default_entity_id: Option<i32>,
    pub default_asset_id: Option<i32>,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<Json>,
    pub photo_url: Option<String>,
    pub description: Option<Json>,
}

#[derive(Clone, Debug, Default)]
pub struct IncomeResourceUpdate {
    pub name: Option<String>,
    pub income_resource_category_id: Option<i32>,
    pub default_value_category_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub default_entity_id: Option<Option<i32>>,
    pub default_asset_id: Option<Option<i32>>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<Option<Json>>,
    pub photo_url: Option<Option<String>>,
    pub description: Option<Option<Json>>,
}

#[derive(Clone, Debug, Default)]
pub struct NewIncomeTransaction {
    pub destination_asset_id: i32,
    pub amount: Decimal,
    pub expected_date: Option<DateTime<Utc>>,
    pub received_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub description: Option<Json>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct IncomeTransactionUpdate {
    pub destination_asset_id: Option<i32>,
    pub amount: Option<Decimal>,
    pub expected_date: Option<Option<DateTime<Utc>>>,
    pub received_date: Option<Option<DateTime<Utc>>>,
    pub status: Option<Option<String>>,
    pub notes: Option<Option<String>>,
    pub description: Option<Option<Json>>,
    pub photo_url: Option<Option<String>>,
}

#[derive(Clone, Debug)]
pub struct NewIncomeForecast {
    pub period_type: Option<String>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub forecasted_amount: Decimal,
    pub actual_amount: Option<Decimal>,
    pub currency_id: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct NewConversion {
    pub origin_asset_id: i32,
    pub destination_asset_id: i32,
    pub income_transaction_id: Option<i32>,
    pub parent_conversion_id: Option<i32>,
    pub conversion_date: DateTime<Utc>,
    pub origin_amount: Decimal,
    pub destination_amount: Decimal,
    /// Derived as `destination_amount / origin_amount` when absent.
    pub exchange_rate: Option<Decimal>,
    pub transaction_fee: Option<Decimal>,
    pub fee_currency_id: Option<i32>,
    pub conversion_type: Option<String>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct NewCounterparty {
    pub name: String,
    pub entity_type_id: Option<i32>,
    pub description: Option<Json>,
    pub contact_info: Option<Json>,
    pub photo_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct IncomeCategoryChange {
    pub name: String,
    pub photo_url: Option<String>,
}

/// Seed values for a new exchange rate.
#[derive(Clone, Debug)]
pub struct NewExchangeRate {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub rate_date: DateTime<Utc>,
    pub source: Option<String>,
}

/// Filter for canvas listings.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanvasFilter {
    /// `Some(true)` only archived, `Some(false)` only active, `None` both.
    pub archived: Option<bool>,
}


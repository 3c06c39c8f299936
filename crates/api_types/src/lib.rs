//! JSON bodies exchanged with the HTTP API.
//!
//! Keys are camelCase. Monetary values are decimal strings on output and
//! accept strings or numbers on input. Required request fields are `Option`
//! so the server can answer a missing field with a descriptive 400 instead
//! of a generic deserialization error.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Deserializer for nullable update fields: an absent key stays `None`, an
/// explicit `null` becomes `Some(None)`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub mod canvas {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CanvasNew {
        pub name: Option<String>,
        pub description: Option<String>,
        pub canvas_type: Option<String>,
        pub photo_url: Option<String>,
        pub base_currency_id: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CanvasUpdate {
        pub name: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub canvas_type: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub photo_url: Option<Option<String>>,
        pub is_archived: Option<bool>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct CanvasQuery {
        pub archived: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Canvas {
        pub id: i32,
        pub name: String,
        pub description: Option<String>,
        pub photo_url: Option<String>,
        pub canvas_type: Option<String>,
        pub is_archived: bool,
        /// Set when the canvas is read through the caller's membership.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub is_owner: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub base_currency_id: Option<i32>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
        pub last_modified_at: DateTime<Utc>,
        pub last_modified_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CanvasResponse {
        pub canvas: Canvas,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CanvasList {
        pub canvases: Vec<Canvas>,
    }
}

pub mod member {
    use super::*;

    /// Identify the user either by `userId` or by `email`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MemberUpsert {
        pub user_id: Option<i32>,
        pub email: Option<String>,
        pub role_id: Option<i32>,
        pub base_currency_id: Option<i32>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Member {
        pub id: i32,
        pub canvas_id: i32,
        pub user_id: i32,
        pub role_id: Option<i32>,
        pub base_currency_id: i32,
        pub is_owner: bool,
        pub joined_at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub first_name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub last_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberResponse {
        pub member: Member,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberList {
        pub members: Vec<Member>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct InvitationNew {
        pub email: Option<String>,
        pub role_id: Option<i32>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct InvitationAccept {
        pub token: Option<String>,
    }

    /// The token is only present in the response to the owner who created
    /// the invitation.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Invitation {
        pub id: i32,
        pub canvas_id: i32,
        pub inviter_id: i32,
        pub invitee_email: String,
        pub role_id: Option<i32>,
        pub status: String,
        pub expires_at: Option<DateTime<Utc>>,
        pub accepted_at: Option<DateTime<Utc>>,
        pub created_at: DateTime<Utc>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub token: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationResponse {
        pub invitation: Invitation,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationList {
        pub invitations: Vec<Invitation>,
    }
}

pub mod category {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletCategory {
        pub id: i32,
        pub name: String,
        pub photo_url: Option<String>,
        pub is_system_category: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletCategoryList {
        pub wallet_categories: Vec<WalletCategory>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseCategory {
        pub id: i32,
        pub canvas_id: Option<i32>,
        pub parent_category_id: Option<i32>,
        pub name: String,
        pub photo_url: Option<String>,
        pub level: i32,
        pub is_system_category: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCategoryList {
        pub categories: Vec<ExpenseCategory>,
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ValueCategoryQuery {
        pub wallet_compatible: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ValueCategory {
        pub id: i32,
        pub canvas_id: Option<i32>,
        pub name: String,
        pub category_type: Option<String>,
        pub currency_id: Option<i32>,
        pub unit: Option<String>,
        pub is_fungible: bool,
        pub is_wallet_compatible: bool,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ValueCategoryList {
        pub categories: Vec<ValueCategory>,
    }
}

pub mod wallet {
    use super::*;
    use crate::{asset::Asset, category::WalletCategory};

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletNew {
        pub name: Option<String>,
        pub wallet_category_id: Option<i32>,
        pub owner_id: Option<i32>,
        pub wallet_number: Option<String>,
        pub entity_id: Option<i32>,
        pub description: Option<Value>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct WalletUpdate {
        pub name: Option<String>,
        pub wallet_category_id: Option<i32>,
        pub owner_id: Option<i32>,
        #[serde(default, deserialize_with = "double_option")]
        pub wallet_number: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub entity_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<Value>>,
        pub is_archived: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Wallet {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub wallet_category_id: i32,
        pub owner_id: i32,
        pub wallet_number: Option<String>,
        pub entity_id: Option<i32>,
        pub description: Option<Value>,
        pub is_archived: bool,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
        pub last_modified_at: DateTime<Utc>,
        pub last_modified_by: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<WalletCategory>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub assets: Option<Vec<Asset>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletResponse {
        pub wallet: Wallet,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WalletList {
        pub wallets: Vec<Wallet>,
    }
}

pub mod asset {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AssetNew {
        pub name: Option<String>,
        pub value_category_id: Option<i32>,
        pub wallet_id: Option<i32>,
        pub owner_id: Option<i32>,
        pub quantity: Option<Decimal>,
        pub purchase_price: Option<Decimal>,
        pub purchase_currency_id: Option<i32>,
        pub purchase_date: Option<DateTime<Utc>>,
        pub current_value: Option<Decimal>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Asset {
        pub id: i32,
        pub canvas_id: Option<i32>,
        pub name: String,
        pub value_category_id: i32,
        pub wallet_id: Option<i32>,
        pub owner_id: Option<i32>,
        pub quantity: Decimal,
        pub purchase_price: Option<Decimal>,
        pub purchase_currency_id: Option<i32>,
        pub purchase_date: Option<DateTime<Utc>>,
        pub current_value: Option<Decimal>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetResponse {
        pub asset: Asset,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetList {
        pub assets: Vec<Asset>,
    }
}

pub mod currency {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Currency {
        pub id: i32,
        pub code: String,
        pub name: String,
        pub symbol: String,
        #[serde(rename = "type")]
        pub kind: Option<String>,
        pub decimals: i32,
        pub photo_url: Option<String>,
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CurrencyList {
        pub currencies: Vec<Currency>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct RateQuery {
        pub from: Option<String>,
        pub to: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Rate {
        pub from: String,
        pub to: String,
        pub rate: Decimal,
    }
}

pub mod expense {
    use super::*;
    use crate::{category::ExpenseCategory, currency::Currency};

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseNew {
        pub name: Option<String>,
        pub expense_category_id: Option<i32>,
        pub currency_id: Option<i32>,
        pub entity_id: Option<i32>,
        pub is_recurring: Option<bool>,
        pub recurrence_pattern: Option<Value>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ExpenseUpdate {
        pub name: Option<String>,
        pub expense_category_id: Option<i32>,
        pub currency_id: Option<i32>,
        #[serde(default, deserialize_with = "double_option")]
        pub entity_id: Option<Option<i32>>,
        pub is_recurring: Option<bool>,
        #[serde(default, deserialize_with = "double_option")]
        pub recurrence_pattern: Option<Option<Value>>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<Value>>,
        #[serde(default, deserialize_with = "double_option")]
        pub photo_url: Option<Option<String>>,
        pub is_active: Option<bool>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Expense {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub expense_category_id: i32,
        pub currency_id: i32,
        pub entity_id: Option<i32>,
        pub is_recurring: bool,
        pub recurrence_pattern: Option<Value>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
        pub is_active: bool,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
        pub last_modified_at: DateTime<Utc>,
        pub last_modified_by: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<ExpenseCategory>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub currency: Option<Currency>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseResponse {
        pub expense: Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseList {
        pub expenses: Vec<Expense>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpentTransactionNew {
        pub origin_asset_id: Option<i32>,
        pub converted_transaction_id: Option<i32>,
        pub amount: Option<Decimal>,
        pub due_date: Option<DateTime<Utc>>,
        pub paid_date: Option<DateTime<Utc>>,
        pub status: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpentTransaction {
        pub id: i32,
        pub expense_id: i32,
        pub origin_asset_id: i32,
        pub converted_transaction_id: Option<i32>,
        pub amount: Decimal,
        pub due_date: Option<DateTime<Utc>>,
        pub paid_date: Option<DateTime<Utc>>,
        pub status: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpentTransactionResponse {
        pub spent_transaction: SpentTransaction,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpentTransactionList {
        pub spent_transactions: Vec<SpentTransaction>,
    }
}

pub mod income {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeResourceNew {
        pub name: Option<String>,
        pub income_resource_category_id: Option<i32>,
        pub default_value_category_id: Option<i32>,
        pub owner_id: Option<i32>,
        pub default_entity_id: Option<i32>,
        pub default_asset_id: Option<i32>,
        pub is_recurring: Option<bool>,
        pub recurrence_pattern: Option<Value>,
        pub photo_url: Option<String>,
        pub description: Option<Value>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeResourceUpdate {
        pub name: Option<String>,
        pub income_resource_category_id: Option<i32>,
        pub default_value_category_id: Option<i32>,
        pub owner_id: Option<i32>,
        #[serde(default, deserialize_with = "double_option")]
        pub default_entity_id: Option<Option<i32>>,
        #[serde(default, deserialize_with = "double_option")]
        pub default_asset_id: Option<Option<i32>>,
        pub is_recurring: Option<bool>,
        #[serde(default, deserialize_with = "double_option")]
        pub recurrence_pattern: Option<Option<Value>>,
        #[serde(default, deserialize_with = "double_option")]
        pub photo_url: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<Value>>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeResource {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub income_resource_category_id: i32,
        pub owner_id: i32,
        pub default_value_category_id: i32,
        pub default_entity_id: Option<i32>,
        pub default_asset_id: Option<i32>,
        pub is_recurring: bool,
        pub recurrence_pattern: Option<Value>,
        pub photo_url: Option<String>,
        pub description: Option<Value>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
        pub last_modified_at: DateTime<Utc>,
        pub last_modified_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeResourceResponse {
        pub income_resource: IncomeResource,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeResourceList {
        pub income_resources: Vec<IncomeResource>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeTransactionNew {
        pub destination_asset_id: Option<i32>,
        pub amount: Option<Decimal>,
        pub expected_date: Option<DateTime<Utc>>,
        pub received_date: Option<DateTime<Utc>>,
        pub status: Option<String>,
        pub notes: Option<String>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeTransactionUpdate {
        pub destination_asset_id: Option<i32>,
        pub amount: Option<Decimal>,
        #[serde(default, deserialize_with = "double_option")]
        pub expected_date: Option<Option<DateTime<Utc>>>,
        #[serde(default, deserialize_with = "double_option")]
        pub received_date: Option<Option<DateTime<Utc>>>,
        #[serde(default, deserialize_with = "double_option")]
        pub status: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub notes: Option<Option<String>>,
        #[serde(default, deserialize_with = "double_option")]
        pub description: Option<Option<Value>>,
        #[serde(default, deserialize_with = "double_option")]
        pub photo_url: Option<Option<String>>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeTransaction {
        pub id: i32,
        pub income_resource_id: Option<i32>,
        pub destination_asset_id: i32,
        pub amount: Decimal,
        pub expected_date: Option<DateTime<Utc>>,
        pub received_date: Option<DateTime<Utc>>,
        pub status: Option<String>,
        pub notes: Option<String>,
        pub description: Option<Value>,
        pub photo_url: Option<String>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
        pub last_modified_at: DateTime<Utc>,
        pub last_modified_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeTransactionResponse {
        pub transaction: IncomeTransaction,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeTransactionList {
        pub transactions: Vec<IncomeTransaction>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeCategoryChange {
        pub name: Option<String>,
        pub photo_url: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeCategory {
        pub id: i32,
        pub name: String,
        pub photo_url: Option<String>,
        pub is_system_category: bool,
        pub created_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeCategoryResponse {
        pub category: IncomeCategory,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeCategoryList {
        pub categories: Vec<IncomeCategory>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeForecastNew {
        pub period_type: Option<String>,
        pub period_start: Option<NaiveDate>,
        pub period_end: Option<NaiveDate>,
        pub forecasted_amount: Option<Decimal>,
        pub actual_amount: Option<Decimal>,
        pub currency_id: Option<i32>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct IncomeForecast {
        pub id: i32,
        pub income_resource_id: i32,
        pub period_type: Option<String>,
        pub period_start: NaiveDate,
        pub period_end: NaiveDate,
        pub forecasted_amount: Decimal,
        pub actual_amount: Option<Decimal>,
        pub currency_id: Option<i32>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeForecastResponse {
        pub forecast: IncomeForecast,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeForecastList {
        pub forecasts: Vec<IncomeForecast>,
    }
}

pub mod conversion {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ConversionNew {
        pub origin_asset_id: Option<i32>,
        pub destination_asset_id: Option<i32>,
        pub income_transaction_id: Option<i32>,
        pub parent_conversion_id: Option<i32>,
        pub conversion_date: Option<DateTime<Utc>>,
        pub origin_amount: Option<Decimal>,
        pub destination_amount: Option<Decimal>,
        pub exchange_rate: Option<Decimal>,
        pub transaction_fee: Option<Decimal>,
        pub fee_currency_id: Option<i32>,
        pub conversion_type: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Conversion {
        pub id: i32,
        pub origin_asset_id: i32,
        pub destination_asset_id: i32,
        pub income_transaction_id: Option<i32>,
        pub parent_conversion_id: Option<i32>,
        pub conversion_date: DateTime<Utc>,
        pub origin_amount: Decimal,
        pub destination_amount: Decimal,
        pub exchange_rate: Decimal,
        pub transaction_fee: Decimal,
        pub fee_currency_id: Option<i32>,
        pub conversion_type: Option<String>,
        pub notes: Option<String>,
        pub created_at: DateTime<Utc>,
        pub created_by: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ConversionResponse {
        pub conversion: Conversion,
    }

    /// Listing, or a chain ordered from the root hop to the requested one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ConversionList {
        pub conversions: Vec<Conversion>,
    }
}

pub mod entity {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct EntityNew {
        pub name: Option<String>,
        pub entity_type_id: Option<i32>,
        pub description: Option<Value>,
        pub contact_info: Option<Value>,
        pub photo_url: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Entity {
        pub id: i32,
        pub canvas_id: i32,
        pub entity_type_id: Option<i32>,
        pub name: String,
        pub description: Option<Value>,
        pub contact_info: Option<Value>,
        pub photo_url: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntityResponse {
        pub entity: Entity,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntityList {
        pub entities: Vec<Entity>,
    }
}

pub mod planning {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Debt {
        pub id: i32,
        pub canvas_id: i32,
        pub debt_type_id: i32,
        pub entity_id: i32,
        pub name: String,
        pub principal_amount: Decimal,
        pub currency_id: i32,
        pub interest_rate: Option<Decimal>,
        pub start_date: NaiveDate,
        pub due_date: Option<NaiveDate>,
        pub status: Option<String>,
        pub notes: Option<String>,
        pub paid_amount: Decimal,
        pub outstanding_amount: Decimal,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtList {
        pub debts: Vec<Debt>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct BudgetPeriod {
        pub id: i32,
        pub period_start: NaiveDate,
        pub period_end: NaiveDate,
        pub spent_amount: Decimal,
        pub remaining_amount: Option<Decimal>,
        pub status: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Budget {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub expense_category_id: Option<i32>,
        pub amount: Decimal,
        pub currency_id: i32,
        pub period_type: Option<String>,
        pub start_date: NaiveDate,
        pub end_date: Option<NaiveDate>,
        pub rollover_unused: bool,
        pub alert_threshold: Option<i32>,
        pub is_active: bool,
        pub tracking: Vec<BudgetPeriod>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetList {
        pub budgets: Vec<Budget>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialPlan {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub plan_type: Option<String>,
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub target_savings: Option<Decimal>,
        pub target_income: Option<Decimal>,
        pub target_expenses: Option<Decimal>,
        pub currency_id: Option<i32>,
        pub status: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialPlanList {
        pub financial_plans: Vec<FinancialPlan>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialGoal {
        pub id: i32,
        pub canvas_id: i32,
        pub financial_plan_id: Option<i32>,
        pub name: String,
        pub goal_type: Option<String>,
        pub target_amount: Decimal,
        pub current_amount: Decimal,
        pub currency_id: i32,
        pub target_date: Option<NaiveDate>,
        pub priority: i32,
        pub status: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct FinancialGoalList {
        pub financial_goals: Vec<FinancialGoal>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ToBuyItem {
        pub id: i32,
        pub canvas_id: i32,
        pub name: String,
        pub description: Option<String>,
        pub estimated_price: Option<Decimal>,
        pub currency_id: Option<i32>,
        pub priority: i32,
        pub category: Option<String>,
        pub target_purchase_date: Option<NaiveDate>,
        pub actual_purchase_date: Option<NaiveDate>,
        pub actual_price: Option<Decimal>,
        pub purchased_from_entity_id: Option<i32>,
        pub status: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ToBuyItemList {
        pub to_buy_items: Vec<ToBuyItem>,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignupRequest {
        pub email: Option<String>,
        pub password: Option<String>,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RefreshRequest {
        pub refresh_token: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EmailRequest {
        pub email: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ResetPasswordRequest {
        pub token: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Default, Deserialize)]
    pub struct TokenQuery {
        pub token: Option<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ChangePhotoRequest {
        pub photo_url: Option<String>,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Session {
        pub access_token: String,
        pub refresh_token: String,
        pub expires_in: Option<i64>,
        pub token_type: String,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: i32,
        pub email: String,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub photo_url: Option<String>,
        pub age: Option<i32>,
        pub phone: Option<String>,
        pub email_verified: bool,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserResponse {
        pub user: User,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub message: String,
        pub user: User,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub session: Option<Session>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionResponse {
        pub session: Session,
    }

    #[derive(Clone, Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Settings {
        pub timezone: String,
        pub language: String,
        pub date_format: String,
        pub default_currency_id: Option<i32>,
        pub theme: String,
        pub notification_enabled: bool,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SettingsUpdate {
        pub timezone: Option<String>,
        pub language: Option<String>,
        pub date_format: Option<String>,
        #[serde(default, deserialize_with = "double_option")]
        pub default_currency_id: Option<Option<i32>>,
        pub theme: Option<String>,
        pub notification_enabled: Option<bool>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettingsResponse {
        pub settings: Settings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_null_update_fields_differ() {
        let absent: canvas::CanvasUpdate = serde_json::from_str(r#"{"name":"x"}"#).unwrap();
        assert_eq!(absent.description, None);

        let cleared: canvas::CanvasUpdate =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: canvas::CanvasUpdate =
            serde_json::from_str(r#"{"description":"shared"}"#).unwrap();
        assert_eq!(set.description, Some(Some("shared".to_string())));
    }

    #[test]
    fn amounts_accept_numbers_and_strings() {
        let from_number: income::IncomeTransactionNew =
            serde_json::from_str(r#"{"destinationAssetId":1,"amount":12.5}"#).unwrap();
        let from_string: income::IncomeTransactionNew =
            serde_json::from_str(r#"{"destinationAssetId":1,"amount":"12.50"}"#).unwrap();
        assert_eq!(from_number.amount, from_string.amount);
        assert_eq!(from_number.destination_asset_id, Some(1));
    }

    #[test]
    fn amounts_serialize_as_strings() {
        let rate = currency::Rate {
            from: "USD".to_string(),
            to: "EUR".to_string(),
            rate: Decimal::new(92, 2),
        };
        let json = serde_json::to_value(&rate).unwrap();
        assert_eq!(json["rate"], serde_json::json!("0.92"));
    }

    #[test]
    fn currency_kind_uses_the_type_key() {
        let currency = currency::Currency {
            id: 1,
            code: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "₿".to_string(),
            kind: Some("crypto".to_string()),
            decimals: 8,
            photo_url: None,
            is_active: true,
        };
        let json = serde_json::to_value(&currency).unwrap();
        assert_eq!(json["type"], serde_json::json!("crypto"));
        assert_eq!(json["isActive"], serde_json::json!(true));
    }
}

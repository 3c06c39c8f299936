use rust_decimal::Decimal;
use sea_orm::{ActiveValue, DatabaseConnection, Value};

use crate::{EngineError, ResultEngine};

mod access;
mod assets;
mod canvases;
mod categories;
mod conversions;
mod counterparties;
mod currencies;
mod expenses;
mod income;
mod invitations;
mod members;
mod planning;
mod users;
mod wallets;

pub use canvases::CanvasMembership;
pub use expenses::ExpenseDetail;
pub use members::MemberWithUser;
pub use planning::{BudgetWithTracking, DebtSummary};
pub use wallets::WalletDetail;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// Stamp `last_modified_by`/`last_modified_at` on any audited active model.
macro_rules! touch {
    ($active:expr, $user_id:expr) => {{
        $active.last_modified_by = ::sea_orm::ActiveValue::Set(Some($user_id));
        $active.last_modified_at = ::sea_orm::ActiveValue::Set(::chrono::Utc::now());
    }};
}

pub(crate) use touch;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} name is required"
        )));
    }
    Ok(trimmed.to_string())
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

fn require_non_negative(amount: Decimal, label: &str) -> ResultEngine<Decimal> {
    if amount < Decimal::ZERO {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must not be negative"
        )));
    }
    Ok(amount)
}

/// Overwrite `slot` only when the caller supplied a value.
fn patch<V>(slot: &mut ActiveValue<V>, value: Option<V>)
where
    V: Into<Value>,
{
    if let Some(value) = value {
        *slot = ActiveValue::Set(value);
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_name_is_trimmed() {
        assert_eq!(
            normalize_required_name("  Cash  ", "wallet").unwrap(),
            "Cash".to_string()
        );
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            normalize_required_name("   ", "wallet"),
            Err(EngineError::InvalidInput("wallet name is required".to_string()))
        );
    }

    #[test]
    fn optional_text_drops_blanks() {
        assert_eq!(normalize_optional_text(Some("  ")), None);
        assert_eq!(normalize_optional_text(Some(" x ")), Some("x".to_string()));
        assert_eq!(normalize_optional_text(None), None);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(require_non_negative(Decimal::new(-1, 2), "amount").is_err());
        assert!(require_non_negative(Decimal::ZERO, "amount").is_ok());
        assert!(require_non_negative(Decimal::new(1050, 2), "amount").is_ok());
    }

    #[test]
    fn patch_only_sets_supplied_values() {
        let mut slot: ActiveValue<String> = ActiveValue::Unchanged("old".to_string());
        patch(&mut slot, None);
        assert_eq!(slot, ActiveValue::Unchanged("old".to_string()));
        patch(&mut slot, Some("new".to_string()));
        assert_eq!(slot, ActiveValue::Set("new".to_string()));
    }
}

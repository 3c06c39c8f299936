use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue, Database, DatabaseConnection, EntityTrait};

use engine::{
    Engine, EngineError, ExpenseUpdate, IncomeCategoryChange, MemberRef, NewAsset, NewCanvas,
    NewConversion, NewCounterparty, NewExchangeRate, NewExpense, NewIncomeForecast, NewIncomeResource,
    NewIncomeTransaction, NewMember, NewSpentTransaction, NewWallet, WalletUpdate, conversions,
    debt_payments, debts, income_forecasts, income_transactions,
};
use migration::MigratorTrait;

struct Fixture {
    engine: Engine,
    db: DatabaseConnection,
    alice: i32,
    bob: i32,
    canvas_id: i32,
}

async fn fixture() -> Fixture {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    let alice = engine
        .create_user("alice@example.com", Some("Alice"), None)
        .await
        .unwrap()
        .id;
    let bob = engine
        .create_user("bob@example.com", Some("Bob"), None)
        .await
        .unwrap()
        .id;
    let (canvas, _) = engine
        .create_canvas(alice, NewCanvas::new("Family"))
        .await
        .unwrap();
    Fixture {
        engine,
        db,
        alice,
        bob,
        canvas_id: canvas.id,
    }
}

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

/// Monetary columns round-trip through a float on SQLite.
fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(diff < dec("0.000001"), "{actual} != {expected}");
}

impl Fixture {
    async fn cash_wallet_category(&self) -> i32 {
        self.engine
            .wallet_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|category| category.name == "Cash")
            .unwrap()
            .id
    }

    async fn value_category(&self, name: &str) -> i32 {
        self.engine
            .value_categories(self.alice, self.canvas_id, None)
            .await
            .unwrap()
            .into_iter()
            .find(|category| category.name == name)
            .unwrap()
            .id
    }

    async fn asset(&self, name: &str) -> i32 {
        let value_category_id = self.value_category("Cash").await;
        self.engine
            .create_asset(
                self.alice,
                self.canvas_id,
                NewAsset {
                    name: name.to_string(),
                    value_category_id,
                    quantity: dec("100"),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .id
    }

    async fn salary(&self) -> i32 {
        let category_id = self
            .engine
            .income_categories()
            .await
            .unwrap()
            .into_iter()
            .find(|category| category.name == "Salary")
            .unwrap()
            .id;
        let value_category_id = self.value_category("Cash").await;
        self.engine
            .create_income_resource(
                self.alice,
                self.canvas_id,
                NewIncomeResource {
                    name: "Salary".to_string(),
                    income_resource_category_id: category_id,
                    default_value_category_id: value_category_id,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .id
    }

    fn conversion(&self, origin: i32, destination: i32, amounts: (&str, &str)) -> NewConversion {
        NewConversion {
            origin_asset_id: origin,
            destination_asset_id: destination,
            income_transaction_id: None,
            parent_conversion_id: None,
            conversion_date: Utc::now(),
            origin_amount: dec(amounts.0),
            destination_amount: dec(amounts.1),
            exchange_rate: None,
            transaction_fee: None,
            fee_currency_id: None,
            conversion_type: None,
            notes: None,
        }
    }
}

#[tokio::test]
async fn wallets_open_up_once_a_member_is_added() {
    let fx = fixture().await;

    let err = fx.engine.wallets(fx.bob, fx.canvas_id).await.unwrap_err();
    assert_eq!(err, EngineError::Forbidden("Access denied".to_string()));

    fx.engine
        .upsert_canvas_member(
            fx.alice,
            fx.canvas_id,
            NewMember {
                user: MemberRef::Id(fx.bob),
                role_id: None,
                base_currency_id: None,
            },
        )
        .await
        .unwrap();
    assert!(fx.engine.wallets(fx.bob, fx.canvas_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn nested_collections_of_unknown_canvases_are_forbidden() {
    let fx = fixture().await;

    let err = fx
        .engine
        .wallets(fx.alice, fx.canvas_id + 100)
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::Forbidden("Access denied".to_string()));
}

#[tokio::test]
async fn wallet_lifecycle_with_partial_update_and_archive() {
    let fx = fixture().await;
    let category_id = fx.cash_wallet_category().await;

    let wallet = fx
        .engine
        .create_wallet(
            fx.alice,
            fx.canvas_id,
            NewWallet {
                name: "Pocket".to_string(),
                wallet_category_id: category_id,
                wallet_number: Some("  ".to_string()),
                description: Some(serde_json::json!({"note": "daily"})),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(wallet.owner_id, fx.alice);
    assert_eq!(wallet.wallet_number, None);

    let updated = fx
        .engine
        .update_wallet(
            fx.alice,
            wallet.id,
            WalletUpdate {
                name: Some("Pocket money".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Pocket money");
    assert_eq!(updated.description, wallet.description);
    assert_eq!(updated.wallet_category_id, category_id);

    fx.engine.archive_wallet(fx.alice, wallet.id).await.unwrap();
    let detail = fx.engine.wallet(fx.alice, wallet.id).await.unwrap();
    assert!(detail.wallet.is_archived);
    assert_eq!(detail.category.map(|category| category.name).as_deref(), Some("Cash"));
    assert_eq!(fx.engine.wallets(fx.alice, fx.canvas_id).await.unwrap().len(), 1);

    assert_eq!(
        fx.engine.wallet(fx.bob, wallet.id).await.unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );
    assert_eq!(
        fx.engine.wallet(fx.alice, wallet.id + 100).await.unwrap_err(),
        EngineError::KeyNotFound("Wallet not found".to_string())
    );
}

#[tokio::test]
async fn wallet_owner_and_entity_must_belong_to_the_canvas() {
    let fx = fixture().await;
    let category_id = fx.cash_wallet_category().await;

    let err = fx
        .engine
        .create_wallet(
            fx.alice,
            fx.canvas_id,
            NewWallet {
                name: "Shared".to_string(),
                wallet_category_id: category_id,
                owner_id: Some(fx.bob),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));

    let (other, _) = fx
        .engine
        .create_canvas(fx.bob, NewCanvas::new("Bob's"))
        .await
        .unwrap();
    let foreign_entity = fx
        .engine
        .create_counterparty(
            fx.bob,
            other.id,
            NewCounterparty {
                name: "Bob's bank".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = fx
        .engine
        .create_wallet(
            fx.alice,
            fx.canvas_id,
            NewWallet {
                name: "Bank".to_string(),
                wallet_category_id: category_id,
                entity_id: Some(foreign_entity.id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidId("Invalid entity ID".to_string()));
}

#[tokio::test]
async fn assets_held_in_wallets_are_listed_with_the_canvas() {
    let fx = fixture().await;
    let category_id = fx.cash_wallet_category().await;
    let wallet = fx
        .engine
        .create_wallet(
            fx.alice,
            fx.canvas_id,
            NewWallet {
                name: "Pocket".to_string(),
                wallet_category_id: category_id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let value_category_id = fx.value_category("Cash").await;
    let asset = fx
        .engine
        .create_asset(
            fx.alice,
            fx.canvas_id,
            NewAsset {
                name: "Dollars".to_string(),
                value_category_id,
                wallet_id: Some(wallet.id),
                quantity: dec("12.5"),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = fx.engine.assets(fx.alice, fx.canvas_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_close(listed[0].quantity, dec("12.5"));

    let detail = fx.engine.wallet(fx.alice, wallet.id).await.unwrap();
    assert_eq!(detail.assets.len(), 1);
    assert_eq!(detail.assets[0].id, asset.id);

    let err = fx
        .engine
        .create_asset(
            fx.alice,
            fx.canvas_id,
            NewAsset {
                name: "Debt".to_string(),
                value_category_id,
                quantity: dec("-1"),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn expense_categories_from_other_canvases_are_rejected() {
    let fx = fixture().await;
    let usd = fx.engine.currency_by_code("USD").await.unwrap();
    let food = fx
        .engine
        .expense_categories(fx.alice, fx.canvas_id)
        .await
        .unwrap()
        .into_iter()
        .find(|category| category.name == "Food")
        .unwrap();

    let expense = fx
        .engine
        .create_expense(
            fx.alice,
            fx.canvas_id,
            NewExpense {
                name: "Groceries".to_string(),
                expense_category_id: food.id,
                currency_id: usd.id,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(expense.is_active);

    let err = fx
        .engine
        .create_expense(
            fx.alice,
            fx.canvas_id,
            NewExpense {
                name: "Ghost".to_string(),
                expense_category_id: 9999,
                currency_id: usd.id,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidId("Invalid expense category ID".to_string())
    );
}

#[tokio::test]
async fn expenses_deactivate_and_record_spending() {
    let fx = fixture().await;
    let usd = fx.engine.currency_by_code("USD").await.unwrap();
    let food = fx
        .engine
        .expense_categories(fx.alice, fx.canvas_id)
        .await
        .unwrap()
        .into_iter()
        .find(|category| category.name == "Food")
        .unwrap();
    let expense = fx
        .engine
        .create_expense(
            fx.alice,
            fx.canvas_id,
            NewExpense {
                name: "Groceries".to_string(),
                expense_category_id: food.id,
                currency_id: usd.id,
                is_recurring: true,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = fx
        .engine
        .update_expense(
            fx.alice,
            expense.id,
            ExpenseUpdate {
                photo_url: Some(Some("https://img/1.png".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.is_recurring);
    assert_eq!(updated.photo_url.as_deref(), Some("https://img/1.png"));

    let origin = fx.asset("Checking").await;
    let spent = fx
        .engine
        .create_spent_transaction(
            fx.alice,
            expense.id,
            NewSpentTransaction {
                origin_asset_id: origin,
                amount: dec("42.10"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(spent.expense_id, expense.id);
    let spending = fx.engine.spent_transactions(fx.alice, expense.id).await.unwrap();
    assert_eq!(spending.len(), 1);
    assert_close(spending[0].amount, dec("42.10"));

    fx.engine
        .deactivate_expense(fx.alice, expense.id)
        .await
        .unwrap();
    let detail = fx.engine.expense(fx.alice, expense.id).await.unwrap();
    assert!(!detail.expense.is_active);
    assert_eq!(detail.category.map(|category| category.id), Some(food.id));
    assert_eq!(detail.currency.map(|currency| currency.code).as_deref(), Some("USD"));
}

#[tokio::test]
async fn deleting_an_income_resource_removes_its_transactions_only() {
    let fx = fixture().await;
    let resource_id = fx.salary().await;
    let checking = fx.asset("Checking").await;
    let savings = fx.asset("Savings").await;

    let transaction = fx
        .engine
        .create_income_transaction(
            fx.alice,
            resource_id,
            NewIncomeTransaction {
                destination_asset_id: checking,
                amount: dec("3000"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let mut hop = fx.conversion(checking, savings, ("100", "100"));
    hop.income_transaction_id = Some(transaction.id);
    let conversion = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, hop)
        .await
        .unwrap();

    fx.engine
        .delete_income_resource(fx.alice, resource_id)
        .await
        .unwrap();

    assert_eq!(
        fx.engine.income_resource(fx.alice, resource_id).await.unwrap_err(),
        EngineError::KeyNotFound("Income resource not found".to_string())
    );
    assert!(
        income_transactions::Entity::find_by_id(transaction.id)
            .one(&fx.db)
            .await
            .unwrap()
            .is_none()
    );
    let kept = fx.engine.conversion(fx.alice, conversion.id).await.unwrap();
    assert_eq!(kept.income_transaction_id, None);
}

#[tokio::test]
async fn income_transactions_need_an_asset_of_the_same_canvas() {
    let fx = fixture().await;
    let resource_id = fx.salary().await;
    let (other, _) = fx
        .engine
        .create_canvas(fx.bob, NewCanvas::new("Bob's"))
        .await
        .unwrap();
    let value_category_id = fx.value_category("Cash").await;
    let foreign_asset = fx
        .engine
        .create_asset(
            fx.bob,
            other.id,
            NewAsset {
                name: "Bob cash".to_string(),
                value_category_id,
                quantity: dec("1"),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let err = fx
        .engine
        .create_income_transaction(
            fx.alice,
            resource_id,
            NewIncomeTransaction {
                destination_asset_id: foreign_asset.id,
                amount: dec("10"),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::InvalidId("Invalid asset ID".to_string()));

    let checking = fx.asset("Checking").await;
    let err = fx
        .engine
        .create_income_transaction(
            fx.alice,
            resource_id,
            NewIncomeTransaction {
                destination_asset_id: checking,
                amount: dec("-5"),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let transaction = fx
        .engine
        .create_income_transaction(
            fx.alice,
            resource_id,
            NewIncomeTransaction {
                destination_asset_id: checking,
                amount: dec("10"),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        fx.engine
            .income_transaction(fx.bob, transaction.id)
            .await
            .unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );
}

#[tokio::test]
async fn storage_rejects_negative_amounts_written_directly() {
    let fx = fixture().await;
    let checking = fx.asset("Checking").await;

    let now = Utc::now();
    let row = income_transactions::ActiveModel {
        destination_asset_id: ActiveValue::Set(checking),
        amount: ActiveValue::Set(dec("-1")),
        created_at: ActiveValue::Set(now),
        last_modified_at: ActiveValue::Set(now),
        ..Default::default()
    };
    assert!(row.insert(&fx.db).await.is_err());
}

#[tokio::test]
async fn conversion_chain_runs_from_root_to_leaf() {
    let fx = fixture().await;
    let dollars = fx.asset("Dollars").await;
    let euros = fx.asset("Euros").await;
    let pounds = fx.asset("Pounds").await;

    let first = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, fx.conversion(dollars, euros, ("100", "92")))
        .await
        .unwrap();
    assert_close(first.exchange_rate, dec("0.92"));

    let mut second_hop = fx.conversion(euros, pounds, ("92", "80"));
    second_hop.parent_conversion_id = Some(first.id);
    let second = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, second_hop)
        .await
        .unwrap();

    let chain = fx
        .engine
        .conversion_chain(fx.alice, second.id)
        .await
        .unwrap();
    let ids: Vec<i32> = chain.iter().map(|hop| hop.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let listed = fx.engine.conversions(fx.alice, fx.canvas_id).await.unwrap();
    assert_eq!(listed.len(), 2);

    let mut orphan = fx.conversion(dollars, euros, ("1", "1"));
    orphan.parent_conversion_id = Some(second.id + 100);
    let err = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, orphan)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidId("Invalid parent conversion ID".to_string())
    );
}

#[tokio::test]
async fn conversions_reject_non_positive_rates() {
    let fx = fixture().await;
    let dollars = fx.asset("Dollars").await;
    let euros = fx.asset("Euros").await;

    let err = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, fx.conversion(dollars, euros, ("0", "5")))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let mut explicit = fx.conversion(dollars, euros, ("10", "9"));
    explicit.exchange_rate = Some(Decimal::ZERO);
    let err = fx
        .engine
        .create_conversion(fx.alice, fx.canvas_id, explicit)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let now = Utc::now();
    let direct = conversions::ActiveModel {
        origin_asset_id: ActiveValue::Set(dollars),
        destination_asset_id: ActiveValue::Set(euros),
        conversion_date: ActiveValue::Set(now),
        origin_amount: ActiveValue::Set(dec("1")),
        destination_amount: ActiveValue::Set(dec("1")),
        exchange_rate: ActiveValue::Set(Decimal::ZERO),
        transaction_fee: ActiveValue::Set(Decimal::ZERO),
        created_at: ActiveValue::Set(now),
        last_modified_at: ActiveValue::Set(now),
        ..Default::default()
    };
    assert!(direct.insert(&fx.db).await.is_err());
}

#[tokio::test]
async fn exchange_rates_fall_back_to_the_inverse() {
    let fx = fixture().await;
    fx.engine
        .add_exchange_rate(NewExchangeRate {
            from: "USD".to_string(),
            to: "EUR".to_string(),
            rate: dec("0.8"),
            rate_date: Utc::now(),
            source: Some("manual".to_string()),
        })
        .await
        .unwrap();

    assert_close(fx.engine.exchange_rate("USD", "EUR").await.unwrap(), dec("0.8"));
    assert_close(fx.engine.exchange_rate("eur", "usd").await.unwrap(), dec("1.25"));
    assert_eq!(fx.engine.exchange_rate("GBP", "GBP").await.unwrap(), Decimal::ONE);
    assert!(matches!(
        fx.engine.exchange_rate("USD", "JPY").await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));

    let err = fx
        .engine
        .add_exchange_rate(NewExchangeRate {
            from: "USD".to_string(),
            to: "GBP".to_string(),
            rate: Decimal::ZERO,
            rate_date: Utc::now(),
            source: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn system_income_categories_are_immutable() {
    let fx = fixture().await;
    let salary = fx
        .engine
        .income_categories()
        .await
        .unwrap()
        .into_iter()
        .find(|category| category.name == "Salary")
        .unwrap();

    let err = fx
        .engine
        .update_income_category(
            fx.alice,
            salary.id,
            IncomeCategoryChange {
                name: "Wages".to_string(),
                photo_url: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("System categories cannot be modified".to_string())
    );
    let err = fx
        .engine
        .delete_income_category(fx.alice, salary.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("System categories cannot be deleted".to_string())
    );

    let custom = fx
        .engine
        .create_income_category(
            fx.alice,
            IncomeCategoryChange {
                name: "Royalties".to_string(),
                photo_url: None,
            },
        )
        .await
        .unwrap();
    assert!(!custom.is_system_category);
    assert_eq!(
        fx.engine
            .delete_income_category(fx.bob, custom.id)
            .await
            .unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );
    fx.engine
        .delete_income_category(fx.alice, custom.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn debts_report_paid_and_outstanding_amounts() {
    let fx = fixture().await;
    let usd = fx.engine.currency_by_code("USD").await.unwrap();
    let bank = fx
        .engine
        .create_counterparty(
            fx.alice,
            fx.canvas_id,
            NewCounterparty {
                name: "City Bank".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let now = Utc::now();
    let debt = debts::ActiveModel {
        canvas_id: ActiveValue::Set(fx.canvas_id),
        debt_type_id: ActiveValue::Set(1),
        entity_id: ActiveValue::Set(bank.id),
        name: ActiveValue::Set("Car loan".to_string()),
        principal_amount: ActiveValue::Set(dec("1000")),
        currency_id: ActiveValue::Set(usd.id),
        start_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        created_at: ActiveValue::Set(now),
        last_modified_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(&fx.db)
    .await
    .unwrap();
    for amount in ["200", "50"] {
        debt_payments::ActiveModel {
            debt_id: ActiveValue::Set(debt.id),
            amount: ActiveValue::Set(dec(amount)),
            payment_date: ActiveValue::Set(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
            created_at: ActiveValue::Set(now),
            last_modified_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&fx.db)
        .await
        .unwrap();
    }

    let summaries = fx.engine.debts(fx.alice, fx.canvas_id).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_close(summaries[0].paid_amount, dec("250"));
    assert_close(summaries[0].outstanding_amount, dec("750"));

    assert_eq!(
        fx.engine.debts(fx.bob, fx.canvas_id).await.unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );
    assert!(fx.engine.budgets(fx.alice, fx.canvas_id).await.unwrap().is_empty());
    assert!(fx.engine.to_buy_items(fx.alice, fx.canvas_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn income_forecasts_are_listed_by_period() {
    let fx = fixture().await;
    let resource_id = fx.salary().await;
    let forecast = |start: (i32, u32), amount: &str| NewIncomeForecast {
        period_type: Some("monthly".to_string()),
        period_start: NaiveDate::from_ymd_opt(start.0, start.1, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(start.0, start.1, 28).unwrap(),
        forecasted_amount: dec(amount),
        actual_amount: None,
        currency_id: None,
    };

    fx.engine
        .create_income_forecast(fx.alice, resource_id, forecast((2026, 3), "3100"))
        .await
        .unwrap();
    fx.engine
        .create_income_forecast(fx.alice, resource_id, forecast((2026, 2), "3000"))
        .await
        .unwrap();

    let listed = fx.engine.income_forecasts(fx.alice, resource_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(
        listed[0].period_start,
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    );
    assert_close(listed[0].forecasted_amount, dec("3000"));

    assert_eq!(
        fx.engine
            .income_forecasts(fx.bob, resource_id)
            .await
            .unwrap_err(),
        EngineError::Forbidden("Access denied".to_string())
    );

    let mut backwards = forecast((2026, 4), "10");
    backwards.period_end = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
    assert!(matches!(
        fx.engine
            .create_income_forecast(fx.alice, resource_id, backwards)
            .await
            .unwrap_err(),
        EngineError::InvalidInput(_)
    ));
    assert!(matches!(
        fx.engine
            .create_income_forecast(fx.alice, resource_id, forecast((2026, 5), "-1"))
            .await
            .unwrap_err(),
        EngineError::InvalidAmount(_)
    ));

    fx.engine
        .delete_income_resource(fx.alice, resource_id)
        .await
        .unwrap();
    assert!(
        income_forecasts::Entity::find()
            .all(&fx.db)
            .await
            .unwrap()
            .is_empty()
    );
}

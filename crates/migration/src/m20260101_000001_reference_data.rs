//! Reference data shared by every canvas: currencies, system roles, system
//! categories and lookup types.
//!
//! System rows carry `canvas_id = NULL` (where the table has one) and the
//! `is_system_*` flag, so canvas-scoped queries can merge them in.

use sea_orm::{ConnectionTrait, DbErr};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Currencies {
    Table,
    Code,
    Name,
    Symbol,
    Type,
    Decimals,
}

#[derive(Iden)]
enum Roles {
    Table,
    Name,
    IsSystemRole,
}

#[derive(Iden)]
enum WalletCategories {
    Table,
    Name,
    IsSystemCategory,
}

#[derive(Iden)]
enum IncomeResourceCategories {
    Table,
    Name,
    IsSystemCategory,
}

#[derive(Iden)]
enum ExpenseCategories {
    Table,
    Id,
    CanvasId,
    ParentCategoryId,
    Name,
    Level,
    IsSystemCategory,
}

#[derive(Iden)]
enum ValueCategories {
    Table,
    Name,
    CategoryType,
    Unit,
    IsFungible,
    IsWalletCompatible,
}

#[derive(Iden)]
enum EntityTypes {
    Table,
    Name,
}

#[derive(Iden)]
enum DebtTypes {
    Table,
    Name,
    IsReceivable,
}

const CURRENCIES: &[(&str, &str, &str, &str, i32)] = &[
    ("USD", "US Dollar", "$", "fiat", 2),
    ("EUR", "Euro", "€", "fiat", 2),
    ("GBP", "British Pound", "£", "fiat", 2),
    ("JPY", "Japanese Yen", "¥", "fiat", 0),
    ("CHF", "Swiss Franc", "CHF", "fiat", 2),
    ("IRR", "Iranian Rial", "﷼", "fiat", 0),
    ("BTC", "Bitcoin", "₿", "crypto", 8),
];

const ROLES: &[&str] = &["Owner", "Editor", "Viewer"];

const WALLET_CATEGORIES: &[&str] = &[
    "Bank Account",
    "Cash",
    "Credit Card",
    "Digital Wallet",
    "Investment Account",
];

const INCOME_CATEGORIES: &[&str] = &[
    "Salary",
    "Freelance",
    "Business",
    "Investment",
    "Rental",
    "Gift",
    "Other",
];

const EXPENSE_CATEGORIES: &[(&str, &[&str])] = &[
    ("Housing", &[]),
    ("Food", &["Groceries", "Restaurants"]),
    ("Transportation", &[]),
    ("Utilities", &[]),
    ("Health", &[]),
    ("Entertainment", &[]),
    ("Education", &[]),
    ("Shopping", &[]),
    ("Other", &[]),
];

/// `(name, category_type, unit, is_fungible, is_wallet_compatible)`
const VALUE_CATEGORIES: &[(&str, &str, Option<&str>, bool, bool)] = &[
    ("Cash", "currency", None, true, true),
    ("Property", "real_estate", Some("unit"), false, false),
    ("Stock", "security", Some("share"), true, false),
    ("Crypto", "crypto", Some("coin"), true, true),
    ("Gold", "commodity", Some("gram"), true, false),
];

const ENTITY_TYPES: &[&str] = &["Person", "Company", "Shop", "Bank"];

const DEBT_TYPES: &[(&str, bool)] = &[("Loan", false), ("Lent", true)];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut stmt = Query::insert()
            .into_table(Currencies::Table)
            .columns([
                Currencies::Code,
                Currencies::Name,
                Currencies::Symbol,
                Currencies::Type,
                Currencies::Decimals,
            ])
            .to_owned();
        for (code, name, symbol, kind, decimals) in CURRENCIES {
            stmt.values_panic([
                (*code).into(),
                (*name).into(),
                (*symbol).into(),
                (*kind).into(),
                (*decimals).into(),
            ]);
        }
        manager.exec_stmt(stmt).await?;

        let mut stmt = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::Name, Roles::IsSystemRole])
            .to_owned();
        for name in ROLES {
            stmt.values_panic([(*name).into(), true.into()]);
        }
        manager.exec_stmt(stmt).await?;

        let mut stmt = Query::insert()
            .into_table(WalletCategories::Table)
            .columns([WalletCategories::Name, WalletCategories::IsSystemCategory])
            .to_owned();
        for name in WALLET_CATEGORIES {
            stmt.values_panic([(*name).into(), true.into()]);
        }
        manager.exec_stmt(stmt).await?;

        let mut stmt = Query::insert()
            .into_table(IncomeResourceCategories::Table)
            .columns([
                IncomeResourceCategories::Name,
                IncomeResourceCategories::IsSystemCategory,
            ])
            .to_owned();
        for name in INCOME_CATEGORIES {
            stmt.values_panic([(*name).into(), true.into()]);
        }
        manager.exec_stmt(stmt).await?;

        // Parents first, children resolve their parent id afterwards.
        let mut stmt = Query::insert()
            .into_table(ExpenseCategories::Table)
            .columns([
                ExpenseCategories::Name,
                ExpenseCategories::Level,
                ExpenseCategories::IsSystemCategory,
            ])
            .to_owned();
        for (name, _) in EXPENSE_CATEGORIES {
            stmt.values_panic([(*name).into(), 0i32.into(), true.into()]);
        }
        manager.exec_stmt(stmt).await?;

        let db = manager.get_connection();
        let backend = db.get_database_backend();
        for (parent, children) in EXPENSE_CATEGORIES {
            if children.is_empty() {
                continue;
            }
            let lookup = Query::select()
                .column(ExpenseCategories::Id)
                .from(ExpenseCategories::Table)
                .and_where(Expr::col(ExpenseCategories::Name).eq(*parent))
                .and_where(Expr::col(ExpenseCategories::CanvasId).is_null())
                .to_owned();
            let row = db
                .query_one(backend.build(&lookup))
                .await?
                .ok_or_else(|| DbErr::Custom(format!("missing system category {parent}")))?;
            let parent_id: i32 = row.try_get("", "id")?;

            let mut stmt = Query::insert()
                .into_table(ExpenseCategories::Table)
                .columns([
                    ExpenseCategories::ParentCategoryId,
                    ExpenseCategories::Name,
                    ExpenseCategories::Level,
                    ExpenseCategories::IsSystemCategory,
                ])
                .to_owned();
            for child in *children {
                stmt.values_panic([parent_id.into(), (*child).into(), 1i32.into(), true.into()]);
            }
            manager.exec_stmt(stmt).await?;
        }

        let mut stmt = Query::insert()
            .into_table(ValueCategories::Table)
            .columns([
                ValueCategories::Name,
                ValueCategories::CategoryType,
                ValueCategories::Unit,
                ValueCategories::IsFungible,
                ValueCategories::IsWalletCompatible,
            ])
            .to_owned();
        for (name, kind, unit, fungible, wallet_compatible) in VALUE_CATEGORIES {
            stmt.values_panic([
                (*name).into(),
                (*kind).into(),
                unit.map(str::to_string).into(),
                (*fungible).into(),
                (*wallet_compatible).into(),
            ]);
        }
        manager.exec_stmt(stmt).await?;

        let mut stmt = Query::insert()
            .into_table(EntityTypes::Table)
            .columns([EntityTypes::Name])
            .to_owned();
        for name in ENTITY_TYPES {
            stmt.values_panic([(*name).into()]);
        }
        manager.exec_stmt(stmt).await?;

        let mut stmt = Query::insert()
            .into_table(DebtTypes::Table)
            .columns([DebtTypes::Name, DebtTypes::IsReceivable])
            .to_owned();
        for (name, receivable) in DEBT_TYPES {
            stmt.values_panic([(*name).into(), (*receivable).into()]);
        }
        manager.exec_stmt(stmt).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(Query::delete().from_table(DebtTypes::Table).to_owned())
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(EntityTypes::Table).to_owned())
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ValueCategories::Table)
                    .and_where(Expr::col(Alias::new("canvas_id")).is_null())
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ExpenseCategories::Table)
                    .and_where(Expr::col(ExpenseCategories::IsSystemCategory).eq(true))
                    .and_where(Expr::col(ExpenseCategories::Level).gt(0))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(ExpenseCategories::Table)
                    .and_where(Expr::col(ExpenseCategories::IsSystemCategory).eq(true))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(IncomeResourceCategories::Table)
                    .and_where(Expr::col(IncomeResourceCategories::IsSystemCategory).eq(true))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(WalletCategories::Table)
                    .and_where(Expr::col(WalletCategories::IsSystemCategory).eq(true))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Roles::Table)
                    .and_where(Expr::col(Roles::IsSystemRole).eq(true))
                    .to_owned(),
            )
            .await?;
        manager
            .exec_stmt(Query::delete().from_table(Currencies::Table).to_owned())
            .await?;
        Ok(())
    }
}

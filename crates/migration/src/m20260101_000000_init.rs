//! Initial schema migration.
//!
//! Creates every table of the finance model:
//!
//! - `users`, `user_settings`: accounts mirrored from the identity provider
//! - `currencies`, `currency_exchange_rates`: reference data
//! - `canvases`, `canvas_members`, `roles`: tenancy and access control
//! - `wallets`, `assets`, value/wallet categories and counterparties
//! - income resources and transactions, expenses and spent transactions
//! - `converted_transactions`: currency conversion chains
//! - debts, budgets, financial plans/goals and to-buy items
//!
//! Monetary columns are `DECIMAL(20, 8)`. Amounts carry `CHECK (>= 0)`,
//! exchange rates `CHECK (> 0)`.

use sea_orm::DatabaseBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Audit columns shared by every user-editable table.
#[derive(Iden, Clone, Copy)]
enum Audit {
    CreatedAt,
    CreatedBy,
    LastModifiedAt,
    LastModifiedBy,
}

#[derive(Iden, Clone, Copy)]
enum Users {
    Table,
    Id,
    Email,
    FirstName,
    LastName,
    PhotoUrl,
    Age,
    Phone,
    EmailVerified,
    ExternalId,
}

#[derive(Iden, Clone, Copy)]
enum UserSettings {
    Table,
    Id,
    UserId,
    Timezone,
    Language,
    DateFormat,
    DefaultCurrencyId,
    Theme,
    NotificationEnabled,
}

#[derive(Iden, Clone, Copy)]
enum Currencies {
    Table,
    Id,
    Code,
    Name,
    Symbol,
    Type,
    Decimals,
    PhotoUrl,
    IsActive,
}

#[derive(Iden, Clone, Copy)]
enum CurrencyExchangeRates {
    Table,
    Id,
    FromCurrencyId,
    ToCurrencyId,
    Rate,
    RateDate,
    Source,
}

#[derive(Iden, Clone, Copy)]
enum Roles {
    Table,
    Id,
    Name,
    IsSystemRole,
}

#[derive(Iden, Clone, Copy)]
enum Canvases {
    Table,
    Id,
    Name,
    Description,
    PhotoUrl,
    CanvasType,
    IsArchived,
}

#[derive(Iden, Clone, Copy)]
enum CanvasMembers {
    Table,
    Id,
    CanvasId,
    UserId,
    RoleId,
    BaseCurrencyId,
    IsOwner,
    JoinedAt,
}

#[derive(Iden, Clone, Copy)]
enum ValueCategories {
    Table,
    Id,
    CanvasId,
    Name,
    CategoryType,
    CurrencyId,
    Unit,
    IsFungible,
    IsWalletCompatible,
    PhotoUrl,
}

#[derive(Iden, Clone, Copy)]
enum EntityTypes {
    Table,
    Id,
    Name,
}

#[derive(Iden, Clone, Copy)]
enum Entities {
    Table,
    Id,
    CanvasId,
    EntityTypeId,
    Name,
    Description,
    ContactInfo,
    PhotoUrl,
}

#[derive(Iden, Clone, Copy)]
enum WalletCategories {
    Table,
    Id,
    Name,
    PhotoUrl,
    IsSystemCategory,
}

#[derive(Iden, Clone, Copy)]
enum Wallets {
    Table,
    Id,
    CanvasId,
    Name,
    WalletCategoryId,
    OwnerId,
    WalletNumber,
    EntityId,
    Description,
    IsArchived,
}

#[derive(Iden, Clone, Copy)]
enum Assets {
    Table,
    Id,
    CanvasId,
    Name,
    ValueCategoryId,
    WalletId,
    OwnerId,
    Quantity,
    PurchasePrice,
    PurchaseCurrencyId,
    PurchaseDate,
    CurrentValue,
    Description,
    PhotoUrl,
    IsActive,
}

#[derive(Iden, Clone, Copy)]
enum IncomeResourceCategories {
    Table,
    Id,
    Name,
    PhotoUrl,
    IsSystemCategory,
}

#[derive(Iden, Clone, Copy)]
enum IncomeResources {
    Table,
    Id,
    CanvasId,
    Name,
    IncomeResourceCategoryId,
    OwnerId,
    DefaultValueCategoryId,
    DefaultEntityId,
    DefaultAssetId,
    IsRecurring,
    RecurrencePattern,
    PhotoUrl,
    Description,
}

#[derive(Iden, Clone, Copy)]
enum IncomeTransactions {
    Table,
    Id,
    IncomeResourceId,
    DestinationAssetId,
    Amount,
    ExpectedDate,
    ReceivedDate,
    Status,
    Notes,
    Description,
    PhotoUrl,
}

#[derive(Iden, Clone, Copy)]
enum ExpenseCategories {
    Table,
    Id,
    CanvasId,
    ParentCategoryId,
    Name,
    PhotoUrl,
    Level,
    IsSystemCategory,
}

#[derive(Iden, Clone, Copy)]
enum Expenses {
    Table,
    Id,
    CanvasId,
    Name,
    ExpenseCategoryId,
    CurrencyId,
    EntityId,
    IsRecurring,
    RecurrencePattern,
    Description,
    PhotoUrl,
    IsActive,
}

#[derive(Iden, Clone, Copy)]
enum ConvertedTransactions {
    Table,
    Id,
    OriginAssetId,
    DestinationAssetId,
    IncomeTransactionId,
    ParentConversionId,
    ConversionDate,
    OriginAmount,
    DestinationAmount,
    ExchangeRate,
    TransactionFee,
    FeeCurrencyId,
    ConversionType,
    Notes,
}

#[derive(Iden, Clone, Copy)]
enum SpentTransactions {
    Table,
    Id,
    ExpenseId,
    OriginAssetId,
    ConvertedTransactionId,
    Amount,
    DueDate,
    PaidDate,
    Status,
    Notes,
}

#[derive(Iden, Clone, Copy)]
enum DebtTypes {
    Table,
    Id,
    Name,
    IsReceivable,
}

#[derive(Iden, Clone, Copy)]
enum Debts {
    Table,
    Id,
    CanvasId,
    DebtTypeId,
    EntityId,
    Name,
    PrincipalAmount,
    CurrencyId,
    InterestRate,
    StartDate,
    DueDate,
    Status,
    Notes,
}

#[derive(Iden, Clone, Copy)]
enum DebtPayments {
    Table,
    Id,
    DebtId,
    AssetId,
    Amount,
    PaymentType,
    PaymentDate,
    Notes,
}

#[derive(Iden, Clone, Copy)]
enum Budgets {
    Table,
    Id,
    CanvasId,
    Name,
    ExpenseCategoryId,
    Amount,
    CurrencyId,
    PeriodType,
    StartDate,
    EndDate,
    RolloverUnused,
    AlertThreshold,
    IsActive,
}

#[derive(Iden, Clone, Copy)]
enum BudgetTracking {
    Table,
    Id,
    BudgetId,
    PeriodStart,
    PeriodEnd,
    SpentAmount,
    RemainingAmount,
    Status,
}

#[derive(Iden, Clone, Copy)]
enum FinancialPlans {
    Table,
    Id,
    CanvasId,
    Name,
    PlanType,
    StartDate,
    EndDate,
    TargetSavings,
    TargetIncome,
    TargetExpenses,
    CurrencyId,
    Status,
}

#[derive(Iden, Clone, Copy)]
enum FinancialGoals {
    Table,
    Id,
    CanvasId,
    FinancialPlanId,
    Name,
    GoalType,
    TargetAmount,
    CurrentAmount,
    CurrencyId,
    TargetDate,
    Priority,
    Status,
}

#[derive(Iden, Clone, Copy)]
enum ToBuyItems {
    Table,
    Id,
    CanvasId,
    Name,
    Description,
    EstimatedPrice,
    CurrencyId,
    Priority,
    Category,
    TargetPurchaseDate,
    ActualPurchaseDate,
    ActualPrice,
    PurchasedFromEntityId,
    Status,
}

// ─────────────────────────────────────────────────────────────────────────────
// Column helpers
// ─────────────────────────────────────────────────────────────────────────────

pub(crate) fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// `DECIMAL(20, 8)` where the backend supports it. SQLite caps declared
/// precision at 16, so it gets an unsized decimal.
pub(crate) fn money_col<T: IntoIden>(backend: DatabaseBackend, col: T) -> ColumnDef {
    let mut col = ColumnDef::new(col);
    match backend {
        DatabaseBackend::Sqlite => col.decimal(),
        _ => col.decimal_len(20, 8),
    };
    col
}

pub(crate) fn fk<F, T>(name: &str, from: F, from_col: T, to: impl IntoIden + 'static, on_delete: ForeignKeyAction) -> ForeignKeyCreateStatement
where
    F: IntoIden + 'static,
    T: IntoIden + 'static,
{
    ForeignKey::create()
        .name(name)
        .from(from, from_col)
        .to(to, Alias::new("id"))
        .on_delete(on_delete)
        .to_owned()
}

/// Appends `created_at`, `created_by`, `last_modified_at`, `last_modified_by`
/// to `stmt`, with the user references pointing at `users.id`.
pub(crate) fn audit_columns<T>(stmt: &mut TableCreateStatement, table: T)
where
    T: Iden + Copy + 'static,
{
    let name = table.to_string();
    stmt.col(
        ColumnDef::new(Audit::CreatedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp()),
    )
    .col(ColumnDef::new(Audit::CreatedBy).integer())
    .col(
        ColumnDef::new(Audit::LastModifiedAt)
            .timestamp_with_time_zone()
            .not_null()
            .default(Expr::current_timestamp()),
    )
    .col(ColumnDef::new(Audit::LastModifiedBy).integer())
    .foreign_key(&mut fk(
        &format!("fk-{name}-created_by"),
        table,
        Audit::CreatedBy,
        Users::Table,
        ForeignKeyAction::NoAction,
    ))
    .foreign_key(&mut fk(
        &format!("fk-{name}-last_modified_by"),
        table,
        Audit::LastModifiedBy,
        Users::Table,
        ForeignKeyAction::NoAction,
    ));
}

fn canvas_fk<T>(table: T) -> ForeignKeyCreateStatement
where
    T: Iden + Copy + 'static,
{
    fk(
        &format!("fk-{}-canvas_id", table.to_string()),
        table,
        Alias::new("canvas_id"),
        Canvases::Table,
        ForeignKeyAction::NoAction,
    )
}

pub(crate) async fn index<T, C>(manager: &SchemaManager<'_>, table: T, cols: &[C], unique: bool) -> Result<(), DbErr>
where
    T: Iden + Copy + 'static,
    C: Iden + Copy + 'static,
{
    let name = format!(
        "idx-{}-{}{}",
        table.to_string(),
        cols.iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("-"),
        if unique { "-unique" } else { "" }
    );
    let mut stmt = Index::create();
    stmt.name(name).table(table);
    for col in cols {
        stmt.col(*col);
    }
    if unique {
        stmt.unique();
    }
    manager.create_index(stmt.to_owned()).await
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        let mut users = Table::create();
        users
            .table(Users::Table)
            .if_not_exists()
            .col(id_col(Users::Id))
            .col(ColumnDef::new(Users::Email).string_len(255).not_null().unique_key())
            .col(ColumnDef::new(Users::FirstName).string_len(100))
            .col(ColumnDef::new(Users::LastName).string_len(100))
            .col(ColumnDef::new(Users::PhotoUrl).text())
            .col(
                ColumnDef::new(Users::Age)
                    .integer()
                    .check(Expr::col(Users::Age).gt(0)),
            )
            .col(ColumnDef::new(Users::Phone).string_len(50))
            .col(
                ColumnDef::new(Users::EmailVerified)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Users::ExternalId).string_len(255).unique_key());
        audit_columns(&mut users, Users::Table);
        manager.create_table(users.to_owned()).await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Currencies and exchange rates
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(id_col(Currencies::Id))
                    .col(
                        ColumnDef::new(Currencies::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Currencies::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Currencies::Symbol).string_len(10).not_null())
                    .col(ColumnDef::new(Currencies::Type).string_len(50))
                    .col(
                        ColumnDef::new(Currencies::Decimals)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(ColumnDef::new(Currencies::PhotoUrl).text())
                    .col(
                        ColumnDef::new(Currencies::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CurrencyExchangeRates::Table)
                    .if_not_exists()
                    .col(id_col(CurrencyExchangeRates::Id))
                    .col(
                        ColumnDef::new(CurrencyExchangeRates::FromCurrencyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CurrencyExchangeRates::ToCurrencyId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        money_col(backend, CurrencyExchangeRates::Rate)
                            .not_null()
                            .check(Expr::col(CurrencyExchangeRates::Rate).gt(0)),
                    )
                    .col(
                        ColumnDef::new(CurrencyExchangeRates::RateDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CurrencyExchangeRates::Source).string_len(100))
                    .foreign_key(&mut fk(
                        "fk-currency_exchange_rates-from_currency_id",
                        CurrencyExchangeRates::Table,
                        CurrencyExchangeRates::FromCurrencyId,
                        Currencies::Table,
                        ForeignKeyAction::NoAction,
                    ))
                    .foreign_key(&mut fk(
                        "fk-currency_exchange_rates-to_currency_id",
                        CurrencyExchangeRates::Table,
                        CurrencyExchangeRates::ToCurrencyId,
                        Currencies::Table,
                        ForeignKeyAction::NoAction,
                    ))
                    .to_owned(),
            )
            .await?;
        index(
            manager,
            CurrencyExchangeRates::Table,
            &[
                CurrencyExchangeRates::FromCurrencyId,
                CurrencyExchangeRates::ToCurrencyId,
                CurrencyExchangeRates::RateDate,
            ],
            false,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. User settings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(UserSettings::Table)
                    .if_not_exists()
                    .col(id_col(UserSettings::Id))
                    .col(
                        ColumnDef::new(UserSettings::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserSettings::Timezone)
                            .string_len(100)
                            .not_null()
                            .default("UTC"),
                    )
                    .col(
                        ColumnDef::new(UserSettings::Language)
                            .string_len(10)
                            .not_null()
                            .default("en"),
                    )
                    .col(
                        ColumnDef::new(UserSettings::DateFormat)
                            .string_len(50)
                            .not_null()
                            .default("YYYY-MM-DD"),
                    )
                    .col(ColumnDef::new(UserSettings::DefaultCurrencyId).integer())
                    .col(
                        ColumnDef::new(UserSettings::Theme)
                            .string_len(20)
                            .not_null()
                            .default("dark"),
                    )
                    .col(
                        ColumnDef::new(UserSettings::NotificationEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(&mut fk(
                        "fk-user_settings-user_id",
                        UserSettings::Table,
                        UserSettings::UserId,
                        Users::Table,
                        ForeignKeyAction::Cascade,
                    ))
                    .foreign_key(&mut fk(
                        "fk-user_settings-default_currency_id",
                        UserSettings::Table,
                        UserSettings::DefaultCurrencyId,
                        Currencies::Table,
                        ForeignKeyAction::SetNull,
                    ))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Roles, canvases, memberships
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(id_col(Roles::Id))
                    .col(ColumnDef::new(Roles::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Roles::IsSystemRole)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        let mut canvases = Table::create();
        canvases
            .table(Canvases::Table)
            .if_not_exists()
            .col(id_col(Canvases::Id))
            .col(ColumnDef::new(Canvases::Name).string_len(255).not_null())
            .col(ColumnDef::new(Canvases::Description).text())
            .col(ColumnDef::new(Canvases::PhotoUrl).text())
            .col(ColumnDef::new(Canvases::CanvasType).string_len(50))
            .col(
                ColumnDef::new(Canvases::IsArchived)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        audit_columns(&mut canvases, Canvases::Table);
        manager.create_table(canvases.to_owned()).await?;

        let mut members = Table::create();
        members
            .table(CanvasMembers::Table)
            .if_not_exists()
            .col(id_col(CanvasMembers::Id))
            .col(ColumnDef::new(CanvasMembers::CanvasId).integer().not_null())
            .col(ColumnDef::new(CanvasMembers::UserId).integer().not_null())
            .col(ColumnDef::new(CanvasMembers::RoleId).integer())
            .col(
                ColumnDef::new(CanvasMembers::BaseCurrencyId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CanvasMembers::IsOwner)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(
                ColumnDef::new(CanvasMembers::JoinedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(&mut canvas_fk(CanvasMembers::Table))
            .foreign_key(&mut fk(
                "fk-canvas_members-user_id",
                CanvasMembers::Table,
                CanvasMembers::UserId,
                Users::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-canvas_members-role_id",
                CanvasMembers::Table,
                CanvasMembers::RoleId,
                Roles::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-canvas_members-base_currency_id",
                CanvasMembers::Table,
                CanvasMembers::BaseCurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut members, CanvasMembers::Table);
        manager.create_table(members.to_owned()).await?;
        index(
            manager,
            CanvasMembers::Table,
            &[CanvasMembers::CanvasId, CanvasMembers::UserId],
            true,
        )
        .await?;
        index(manager, CanvasMembers::Table, &[CanvasMembers::UserId], false).await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Value categories and counterparties
        // ───────────────────────────────────────────────────────────────────
        let mut value_categories = Table::create();
        value_categories
            .table(ValueCategories::Table)
            .if_not_exists()
            .col(id_col(ValueCategories::Id))
            .col(ColumnDef::new(ValueCategories::CanvasId).integer())
            .col(ColumnDef::new(ValueCategories::Name).string_len(255).not_null())
            .col(ColumnDef::new(ValueCategories::CategoryType).string_len(100))
            .col(ColumnDef::new(ValueCategories::CurrencyId).integer())
            .col(ColumnDef::new(ValueCategories::Unit).string_len(50))
            .col(
                ColumnDef::new(ValueCategories::IsFungible)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .col(
                ColumnDef::new(ValueCategories::IsWalletCompatible)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(ValueCategories::PhotoUrl).text())
            .foreign_key(&mut canvas_fk(ValueCategories::Table))
            .foreign_key(&mut fk(
                "fk-value_categories-currency_id",
                ValueCategories::Table,
                ValueCategories::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut value_categories, ValueCategories::Table);
        manager.create_table(value_categories.to_owned()).await?;

        manager
            .create_table(
                Table::create()
                    .table(EntityTypes::Table)
                    .if_not_exists()
                    .col(id_col(EntityTypes::Id))
                    .col(ColumnDef::new(EntityTypes::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        let mut entities = Table::create();
        entities
            .table(Entities::Table)
            .if_not_exists()
            .col(id_col(Entities::Id))
            .col(ColumnDef::new(Entities::CanvasId).integer().not_null())
            .col(ColumnDef::new(Entities::EntityTypeId).integer())
            .col(ColumnDef::new(Entities::Name).string_len(255).not_null())
            .col(ColumnDef::new(Entities::Description).json())
            .col(ColumnDef::new(Entities::ContactInfo).json())
            .col(ColumnDef::new(Entities::PhotoUrl).text())
            .foreign_key(&mut canvas_fk(Entities::Table))
            .foreign_key(&mut fk(
                "fk-entities-entity_type_id",
                Entities::Table,
                Entities::EntityTypeId,
                EntityTypes::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut entities, Entities::Table);
        manager.create_table(entities.to_owned()).await?;
        index(manager, Entities::Table, &[Entities::CanvasId], false).await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Wallets and assets
        // ───────────────────────────────────────────────────────────────────
        let mut wallet_categories = Table::create();
        wallet_categories
            .table(WalletCategories::Table)
            .if_not_exists()
            .col(id_col(WalletCategories::Id))
            .col(ColumnDef::new(WalletCategories::Name).string_len(255).not_null())
            .col(ColumnDef::new(WalletCategories::PhotoUrl).text())
            .col(
                ColumnDef::new(WalletCategories::IsSystemCategory)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        audit_columns(&mut wallet_categories, WalletCategories::Table);
        manager.create_table(wallet_categories.to_owned()).await?;

        let mut wallets = Table::create();
        wallets
            .table(Wallets::Table)
            .if_not_exists()
            .col(id_col(Wallets::Id))
            .col(ColumnDef::new(Wallets::CanvasId).integer().not_null())
            .col(ColumnDef::new(Wallets::Name).string_len(255).not_null())
            .col(ColumnDef::new(Wallets::WalletCategoryId).integer().not_null())
            .col(ColumnDef::new(Wallets::OwnerId).integer().not_null())
            .col(ColumnDef::new(Wallets::WalletNumber).string_len(255))
            .col(ColumnDef::new(Wallets::EntityId).integer())
            .col(ColumnDef::new(Wallets::Description).json())
            .col(
                ColumnDef::new(Wallets::IsArchived)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .foreign_key(&mut canvas_fk(Wallets::Table))
            .foreign_key(&mut fk(
                "fk-wallets-wallet_category_id",
                Wallets::Table,
                Wallets::WalletCategoryId,
                WalletCategories::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-wallets-owner_id",
                Wallets::Table,
                Wallets::OwnerId,
                Users::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-wallets-entity_id",
                Wallets::Table,
                Wallets::EntityId,
                Entities::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut wallets, Wallets::Table);
        manager.create_table(wallets.to_owned()).await?;
        index(manager, Wallets::Table, &[Wallets::CanvasId], false).await?;

        let mut assets = Table::create();
        assets
            .table(Assets::Table)
            .if_not_exists()
            .col(id_col(Assets::Id))
            .col(ColumnDef::new(Assets::CanvasId).integer())
            .col(ColumnDef::new(Assets::Name).string_len(255).not_null())
            .col(ColumnDef::new(Assets::ValueCategoryId).integer().not_null())
            .col(ColumnDef::new(Assets::WalletId).integer())
            .col(ColumnDef::new(Assets::OwnerId).integer())
            .col(
                money_col(backend, Assets::Quantity)
                    .not_null()
                    .default(0)
                    .check(Expr::col(Assets::Quantity).gte(0)),
            )
            .col(money_col(backend, Assets::PurchasePrice))
            .col(ColumnDef::new(Assets::PurchaseCurrencyId).integer())
            .col(ColumnDef::new(Assets::PurchaseDate).timestamp_with_time_zone())
            .col(money_col(backend, Assets::CurrentValue))
            .col(ColumnDef::new(Assets::Description).json())
            .col(ColumnDef::new(Assets::PhotoUrl).text())
            .col(
                ColumnDef::new(Assets::IsActive)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .foreign_key(&mut canvas_fk(Assets::Table))
            .foreign_key(&mut fk(
                "fk-assets-value_category_id",
                Assets::Table,
                Assets::ValueCategoryId,
                ValueCategories::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-assets-wallet_id",
                Assets::Table,
                Assets::WalletId,
                Wallets::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-assets-owner_id",
                Assets::Table,
                Assets::OwnerId,
                Users::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-assets-purchase_currency_id",
                Assets::Table,
                Assets::PurchaseCurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut assets, Assets::Table);
        manager.create_table(assets.to_owned()).await?;
        index(manager, Assets::Table, &[Assets::CanvasId], false).await?;
        index(manager, Assets::Table, &[Assets::WalletId], false).await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Income
        // ───────────────────────────────────────────────────────────────────
        let mut income_categories = Table::create();
        income_categories
            .table(IncomeResourceCategories::Table)
            .if_not_exists()
            .col(id_col(IncomeResourceCategories::Id))
            .col(
                ColumnDef::new(IncomeResourceCategories::Name)
                    .string_len(255)
                    .not_null(),
            )
            .col(ColumnDef::new(IncomeResourceCategories::PhotoUrl).text())
            .col(
                ColumnDef::new(IncomeResourceCategories::IsSystemCategory)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        audit_columns(&mut income_categories, IncomeResourceCategories::Table);
        manager.create_table(income_categories.to_owned()).await?;

        let mut income_resources = Table::create();
        income_resources
            .table(IncomeResources::Table)
            .if_not_exists()
            .col(id_col(IncomeResources::Id))
            .col(ColumnDef::new(IncomeResources::CanvasId).integer().not_null())
            .col(ColumnDef::new(IncomeResources::Name).string_len(255).not_null())
            .col(
                ColumnDef::new(IncomeResources::IncomeResourceCategoryId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(IncomeResources::OwnerId).integer().not_null())
            .col(
                ColumnDef::new(IncomeResources::DefaultValueCategoryId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(IncomeResources::DefaultEntityId).integer())
            .col(ColumnDef::new(IncomeResources::DefaultAssetId).integer())
            .col(
                ColumnDef::new(IncomeResources::IsRecurring)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(IncomeResources::RecurrencePattern).json())
            .col(ColumnDef::new(IncomeResources::PhotoUrl).text())
            .col(ColumnDef::new(IncomeResources::Description).json())
            .foreign_key(&mut canvas_fk(IncomeResources::Table))
            .foreign_key(&mut fk(
                "fk-income_resources-category_id",
                IncomeResources::Table,
                IncomeResources::IncomeResourceCategoryId,
                IncomeResourceCategories::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-income_resources-owner_id",
                IncomeResources::Table,
                IncomeResources::OwnerId,
                Users::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-income_resources-default_value_category_id",
                IncomeResources::Table,
                IncomeResources::DefaultValueCategoryId,
                ValueCategories::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-income_resources-default_entity_id",
                IncomeResources::Table,
                IncomeResources::DefaultEntityId,
                Entities::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-income_resources-default_asset_id",
                IncomeResources::Table,
                IncomeResources::DefaultAssetId,
                Assets::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut income_resources, IncomeResources::Table);
        manager.create_table(income_resources.to_owned()).await?;
        index(
            manager,
            IncomeResources::Table,
            &[IncomeResources::CanvasId],
            false,
        )
        .await?;

        let mut income_transactions = Table::create();
        income_transactions
            .table(IncomeTransactions::Table)
            .if_not_exists()
            .col(id_col(IncomeTransactions::Id))
            .col(ColumnDef::new(IncomeTransactions::IncomeResourceId).integer())
            .col(
                ColumnDef::new(IncomeTransactions::DestinationAssetId)
                    .integer()
                    .not_null(),
            )
            .col(
                money_col(backend, IncomeTransactions::Amount)
                    .not_null()
                    .check(Expr::col(IncomeTransactions::Amount).gte(0)),
            )
            .col(ColumnDef::new(IncomeTransactions::ExpectedDate).timestamp_with_time_zone())
            .col(ColumnDef::new(IncomeTransactions::ReceivedDate).timestamp_with_time_zone())
            .col(ColumnDef::new(IncomeTransactions::Status).string_len(50))
            .col(ColumnDef::new(IncomeTransactions::Notes).text())
            .col(ColumnDef::new(IncomeTransactions::Description).json())
            .col(ColumnDef::new(IncomeTransactions::PhotoUrl).text())
            .foreign_key(&mut fk(
                "fk-income_transactions-income_resource_id",
                IncomeTransactions::Table,
                IncomeTransactions::IncomeResourceId,
                IncomeResources::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-income_transactions-destination_asset_id",
                IncomeTransactions::Table,
                IncomeTransactions::DestinationAssetId,
                Assets::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut income_transactions, IncomeTransactions::Table);
        manager.create_table(income_transactions.to_owned()).await?;
        index(
            manager,
            IncomeTransactions::Table,
            &[IncomeTransactions::IncomeResourceId],
            false,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 8. Expenses
        // ───────────────────────────────────────────────────────────────────
        let mut expense_categories = Table::create();
        expense_categories
            .table(ExpenseCategories::Table)
            .if_not_exists()
            .col(id_col(ExpenseCategories::Id))
            .col(ColumnDef::new(ExpenseCategories::CanvasId).integer())
            .col(ColumnDef::new(ExpenseCategories::ParentCategoryId).integer())
            .col(
                ColumnDef::new(ExpenseCategories::Name)
                    .string_len(255)
                    .not_null(),
            )
            .col(ColumnDef::new(ExpenseCategories::PhotoUrl).text())
            .col(
                ColumnDef::new(ExpenseCategories::Level)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(
                ColumnDef::new(ExpenseCategories::IsSystemCategory)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .foreign_key(&mut canvas_fk(ExpenseCategories::Table))
            .foreign_key(&mut fk(
                "fk-expense_categories-parent_category_id",
                ExpenseCategories::Table,
                ExpenseCategories::ParentCategoryId,
                ExpenseCategories::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut expense_categories, ExpenseCategories::Table);
        manager.create_table(expense_categories.to_owned()).await?;

        let mut expenses = Table::create();
        expenses
            .table(Expenses::Table)
            .if_not_exists()
            .col(id_col(Expenses::Id))
            .col(ColumnDef::new(Expenses::CanvasId).integer().not_null())
            .col(ColumnDef::new(Expenses::Name).string_len(255).not_null())
            .col(ColumnDef::new(Expenses::ExpenseCategoryId).integer().not_null())
            .col(ColumnDef::new(Expenses::CurrencyId).integer().not_null())
            .col(ColumnDef::new(Expenses::EntityId).integer())
            .col(
                ColumnDef::new(Expenses::IsRecurring)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Expenses::RecurrencePattern).json())
            .col(ColumnDef::new(Expenses::Description).json())
            .col(ColumnDef::new(Expenses::PhotoUrl).text())
            .col(
                ColumnDef::new(Expenses::IsActive)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .foreign_key(&mut canvas_fk(Expenses::Table))
            .foreign_key(&mut fk(
                "fk-expenses-expense_category_id",
                Expenses::Table,
                Expenses::ExpenseCategoryId,
                ExpenseCategories::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-expenses-currency_id",
                Expenses::Table,
                Expenses::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-expenses-entity_id",
                Expenses::Table,
                Expenses::EntityId,
                Entities::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut expenses, Expenses::Table);
        manager.create_table(expenses.to_owned()).await?;
        index(manager, Expenses::Table, &[Expenses::CanvasId], false).await?;

        // ───────────────────────────────────────────────────────────────────
        // 9. Conversions and spending
        // ───────────────────────────────────────────────────────────────────
        let mut conversions = Table::create();
        conversions
            .table(ConvertedTransactions::Table)
            .if_not_exists()
            .col(id_col(ConvertedTransactions::Id))
            .col(
                ColumnDef::new(ConvertedTransactions::OriginAssetId)
                    .integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(ConvertedTransactions::DestinationAssetId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(ConvertedTransactions::IncomeTransactionId).integer())
            .col(ColumnDef::new(ConvertedTransactions::ParentConversionId).integer())
            .col(
                ColumnDef::new(ConvertedTransactions::ConversionDate)
                    .timestamp_with_time_zone()
                    .not_null(),
            )
            .col(
                money_col(backend, ConvertedTransactions::OriginAmount)
                    .not_null()
                    .check(Expr::col(ConvertedTransactions::OriginAmount).gte(0)),
            )
            .col(
                money_col(backend, ConvertedTransactions::DestinationAmount)
                    .not_null()
                    .check(Expr::col(ConvertedTransactions::DestinationAmount).gte(0)),
            )
            .col(
                money_col(backend, ConvertedTransactions::ExchangeRate)
                    .not_null()
                    .check(Expr::col(ConvertedTransactions::ExchangeRate).gt(0)),
            )
            .col(
                money_col(backend, ConvertedTransactions::TransactionFee)
                    .not_null()
                    .default(0)
                    .check(Expr::col(ConvertedTransactions::TransactionFee).gte(0)),
            )
            .col(ColumnDef::new(ConvertedTransactions::FeeCurrencyId).integer())
            .col(ColumnDef::new(ConvertedTransactions::ConversionType).string_len(50))
            .col(ColumnDef::new(ConvertedTransactions::Notes).text())
            .foreign_key(&mut fk(
                "fk-converted_transactions-origin_asset_id",
                ConvertedTransactions::Table,
                ConvertedTransactions::OriginAssetId,
                Assets::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-converted_transactions-destination_asset_id",
                ConvertedTransactions::Table,
                ConvertedTransactions::DestinationAssetId,
                Assets::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-converted_transactions-income_transaction_id",
                ConvertedTransactions::Table,
                ConvertedTransactions::IncomeTransactionId,
                IncomeTransactions::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-converted_transactions-parent_conversion_id",
                ConvertedTransactions::Table,
                ConvertedTransactions::ParentConversionId,
                ConvertedTransactions::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-converted_transactions-fee_currency_id",
                ConvertedTransactions::Table,
                ConvertedTransactions::FeeCurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut conversions, ConvertedTransactions::Table);
        manager.create_table(conversions.to_owned()).await?;
        index(
            manager,
            ConvertedTransactions::Table,
            &[ConvertedTransactions::ParentConversionId],
            false,
        )
        .await?;

        let mut spent = Table::create();
        spent
            .table(SpentTransactions::Table)
            .if_not_exists()
            .col(id_col(SpentTransactions::Id))
            .col(ColumnDef::new(SpentTransactions::ExpenseId).integer().not_null())
            .col(
                ColumnDef::new(SpentTransactions::OriginAssetId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(SpentTransactions::ConvertedTransactionId).integer())
            .col(
                money_col(backend, SpentTransactions::Amount)
                    .not_null()
                    .check(Expr::col(SpentTransactions::Amount).gte(0)),
            )
            .col(ColumnDef::new(SpentTransactions::DueDate).timestamp_with_time_zone())
            .col(ColumnDef::new(SpentTransactions::PaidDate).timestamp_with_time_zone())
            .col(ColumnDef::new(SpentTransactions::Status).string_len(50))
            .col(ColumnDef::new(SpentTransactions::Notes).text())
            .foreign_key(&mut fk(
                "fk-spent_transactions-expense_id",
                SpentTransactions::Table,
                SpentTransactions::ExpenseId,
                Expenses::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-spent_transactions-origin_asset_id",
                SpentTransactions::Table,
                SpentTransactions::OriginAssetId,
                Assets::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-spent_transactions-converted_transaction_id",
                SpentTransactions::Table,
                SpentTransactions::ConvertedTransactionId,
                ConvertedTransactions::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut spent, SpentTransactions::Table);
        manager.create_table(spent.to_owned()).await?;
        index(
            manager,
            SpentTransactions::Table,
            &[SpentTransactions::ExpenseId],
            false,
        )
        .await?;

        // ───────────────────────────────────────────────────────────────────
        // 10. Debts
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(DebtTypes::Table)
                    .if_not_exists()
                    .col(id_col(DebtTypes::Id))
                    .col(ColumnDef::new(DebtTypes::Name).string_len(255).not_null())
                    .col(
                        ColumnDef::new(DebtTypes::IsReceivable)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        let mut debts = Table::create();
        debts
            .table(Debts::Table)
            .if_not_exists()
            .col(id_col(Debts::Id))
            .col(ColumnDef::new(Debts::CanvasId).integer().not_null())
            .col(ColumnDef::new(Debts::DebtTypeId).integer().not_null())
            .col(ColumnDef::new(Debts::EntityId).integer().not_null())
            .col(ColumnDef::new(Debts::Name).string_len(255).not_null())
            .col(
                money_col(backend, Debts::PrincipalAmount)
                    .not_null()
                    .check(Expr::col(Debts::PrincipalAmount).gte(0)),
            )
            .col(ColumnDef::new(Debts::CurrencyId).integer().not_null())
            .col(ColumnDef::new(Debts::InterestRate).decimal_len(5, 2))
            .col(ColumnDef::new(Debts::StartDate).date().not_null())
            .col(ColumnDef::new(Debts::DueDate).date())
            .col(ColumnDef::new(Debts::Status).string_len(50))
            .col(ColumnDef::new(Debts::Notes).text())
            .foreign_key(&mut canvas_fk(Debts::Table))
            .foreign_key(&mut fk(
                "fk-debts-debt_type_id",
                Debts::Table,
                Debts::DebtTypeId,
                DebtTypes::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-debts-entity_id",
                Debts::Table,
                Debts::EntityId,
                Entities::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-debts-currency_id",
                Debts::Table,
                Debts::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut debts, Debts::Table);
        manager.create_table(debts.to_owned()).await?;

        let mut debt_payments = Table::create();
        debt_payments
            .table(DebtPayments::Table)
            .if_not_exists()
            .col(id_col(DebtPayments::Id))
            .col(ColumnDef::new(DebtPayments::DebtId).integer().not_null())
            .col(ColumnDef::new(DebtPayments::AssetId).integer())
            .col(
                money_col(backend, DebtPayments::Amount)
                    .not_null()
                    .check(Expr::col(DebtPayments::Amount).gte(0)),
            )
            .col(ColumnDef::new(DebtPayments::PaymentType).string_len(50))
            .col(ColumnDef::new(DebtPayments::PaymentDate).date().not_null())
            .col(ColumnDef::new(DebtPayments::Notes).text())
            .foreign_key(&mut fk(
                "fk-debt_payments-debt_id",
                DebtPayments::Table,
                DebtPayments::DebtId,
                Debts::Table,
                ForeignKeyAction::Cascade,
            ))
            .foreign_key(&mut fk(
                "fk-debt_payments-asset_id",
                DebtPayments::Table,
                DebtPayments::AssetId,
                Assets::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut debt_payments, DebtPayments::Table);
        manager.create_table(debt_payments.to_owned()).await?;

        // ───────────────────────────────────────────────────────────────────
        // 11. Budgets
        // ───────────────────────────────────────────────────────────────────
        let mut budgets = Table::create();
        budgets
            .table(Budgets::Table)
            .if_not_exists()
            .col(id_col(Budgets::Id))
            .col(ColumnDef::new(Budgets::CanvasId).integer().not_null())
            .col(ColumnDef::new(Budgets::Name).string_len(255).not_null())
            .col(ColumnDef::new(Budgets::ExpenseCategoryId).integer())
            .col(
                money_col(backend, Budgets::Amount)
                    .not_null()
                    .check(Expr::col(Budgets::Amount).gte(0)),
            )
            .col(ColumnDef::new(Budgets::CurrencyId).integer().not_null())
            .col(ColumnDef::new(Budgets::PeriodType).string_len(50))
            .col(ColumnDef::new(Budgets::StartDate).date().not_null())
            .col(ColumnDef::new(Budgets::EndDate).date())
            .col(
                ColumnDef::new(Budgets::RolloverUnused)
                    .boolean()
                    .not_null()
                    .default(false),
            )
            .col(ColumnDef::new(Budgets::AlertThreshold).integer())
            .col(
                ColumnDef::new(Budgets::IsActive)
                    .boolean()
                    .not_null()
                    .default(true),
            )
            .foreign_key(&mut canvas_fk(Budgets::Table))
            .foreign_key(&mut fk(
                "fk-budgets-expense_category_id",
                Budgets::Table,
                Budgets::ExpenseCategoryId,
                ExpenseCategories::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-budgets-currency_id",
                Budgets::Table,
                Budgets::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut budgets, Budgets::Table);
        manager.create_table(budgets.to_owned()).await?;

        manager
            .create_table(
                Table::create()
                    .table(BudgetTracking::Table)
                    .if_not_exists()
                    .col(id_col(BudgetTracking::Id))
                    .col(ColumnDef::new(BudgetTracking::BudgetId).integer().not_null())
                    .col(ColumnDef::new(BudgetTracking::PeriodStart).date().not_null())
                    .col(ColumnDef::new(BudgetTracking::PeriodEnd).date().not_null())
                    .col(money_col(backend, BudgetTracking::SpentAmount).not_null().default(0))
                    .col(money_col(backend, BudgetTracking::RemainingAmount))
                    .col(ColumnDef::new(BudgetTracking::Status).string_len(50))
                    .foreign_key(&mut fk(
                        "fk-budget_tracking-budget_id",
                        BudgetTracking::Table,
                        BudgetTracking::BudgetId,
                        Budgets::Table,
                        ForeignKeyAction::Cascade,
                    ))
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 12. Plans, goals, to-buy list
        // ───────────────────────────────────────────────────────────────────
        let mut plans = Table::create();
        plans
            .table(FinancialPlans::Table)
            .if_not_exists()
            .col(id_col(FinancialPlans::Id))
            .col(ColumnDef::new(FinancialPlans::CanvasId).integer().not_null())
            .col(ColumnDef::new(FinancialPlans::Name).string_len(255).not_null())
            .col(ColumnDef::new(FinancialPlans::PlanType).string_len(50))
            .col(ColumnDef::new(FinancialPlans::StartDate).date().not_null())
            .col(ColumnDef::new(FinancialPlans::EndDate).date().not_null())
            .col(money_col(backend, FinancialPlans::TargetSavings))
            .col(money_col(backend, FinancialPlans::TargetIncome))
            .col(money_col(backend, FinancialPlans::TargetExpenses))
            .col(ColumnDef::new(FinancialPlans::CurrencyId).integer())
            .col(ColumnDef::new(FinancialPlans::Status).string_len(50))
            .foreign_key(&mut canvas_fk(FinancialPlans::Table))
            .foreign_key(&mut fk(
                "fk-financial_plans-currency_id",
                FinancialPlans::Table,
                FinancialPlans::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut plans, FinancialPlans::Table);
        manager.create_table(plans.to_owned()).await?;

        let mut goals = Table::create();
        goals
            .table(FinancialGoals::Table)
            .if_not_exists()
            .col(id_col(FinancialGoals::Id))
            .col(ColumnDef::new(FinancialGoals::CanvasId).integer().not_null())
            .col(ColumnDef::new(FinancialGoals::FinancialPlanId).integer())
            .col(ColumnDef::new(FinancialGoals::Name).string_len(255).not_null())
            .col(ColumnDef::new(FinancialGoals::GoalType).string_len(50))
            .col(
                money_col(backend, FinancialGoals::TargetAmount)
                    .not_null()
                    .check(Expr::col(FinancialGoals::TargetAmount).gte(0)),
            )
            .col(money_col(backend, FinancialGoals::CurrentAmount).not_null().default(0))
            .col(ColumnDef::new(FinancialGoals::CurrencyId).integer().not_null())
            .col(ColumnDef::new(FinancialGoals::TargetDate).date())
            .col(
                ColumnDef::new(FinancialGoals::Priority)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(FinancialGoals::Status).string_len(50))
            .foreign_key(&mut canvas_fk(FinancialGoals::Table))
            .foreign_key(&mut fk(
                "fk-financial_goals-financial_plan_id",
                FinancialGoals::Table,
                FinancialGoals::FinancialPlanId,
                FinancialPlans::Table,
                ForeignKeyAction::SetNull,
            ))
            .foreign_key(&mut fk(
                "fk-financial_goals-currency_id",
                FinancialGoals::Table,
                FinancialGoals::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut goals, FinancialGoals::Table);
        manager.create_table(goals.to_owned()).await?;

        let mut to_buy = Table::create();
        to_buy
            .table(ToBuyItems::Table)
            .if_not_exists()
            .col(id_col(ToBuyItems::Id))
            .col(ColumnDef::new(ToBuyItems::CanvasId).integer().not_null())
            .col(ColumnDef::new(ToBuyItems::Name).string_len(255).not_null())
            .col(ColumnDef::new(ToBuyItems::Description).text())
            .col(money_col(backend, ToBuyItems::EstimatedPrice))
            .col(ColumnDef::new(ToBuyItems::CurrencyId).integer())
            .col(
                ColumnDef::new(ToBuyItems::Priority)
                    .integer()
                    .not_null()
                    .default(0),
            )
            .col(ColumnDef::new(ToBuyItems::Category).string_len(100))
            .col(ColumnDef::new(ToBuyItems::TargetPurchaseDate).date())
            .col(ColumnDef::new(ToBuyItems::ActualPurchaseDate).date())
            .col(money_col(backend, ToBuyItems::ActualPrice))
            .col(ColumnDef::new(ToBuyItems::PurchasedFromEntityId).integer())
            .col(ColumnDef::new(ToBuyItems::Status).string_len(50))
            .foreign_key(&mut canvas_fk(ToBuyItems::Table))
            .foreign_key(&mut fk(
                "fk-to_buy_items-currency_id",
                ToBuyItems::Table,
                ToBuyItems::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-to_buy_items-purchased_from_entity_id",
                ToBuyItems::Table,
                ToBuyItems::PurchasedFromEntityId,
                Entities::Table,
                ForeignKeyAction::SetNull,
            ));
        audit_columns(&mut to_buy, ToBuyItems::Table);
        manager.create_table(to_buy.to_owned()).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let drops = [
            Table::drop().table(ToBuyItems::Table).if_exists().to_owned(),
            Table::drop().table(FinancialGoals::Table).if_exists().to_owned(),
            Table::drop().table(FinancialPlans::Table).if_exists().to_owned(),
            Table::drop().table(BudgetTracking::Table).if_exists().to_owned(),
            Table::drop().table(Budgets::Table).if_exists().to_owned(),
            Table::drop().table(DebtPayments::Table).if_exists().to_owned(),
            Table::drop().table(Debts::Table).if_exists().to_owned(),
            Table::drop().table(DebtTypes::Table).if_exists().to_owned(),
            Table::drop().table(SpentTransactions::Table).if_exists().to_owned(),
            Table::drop().table(ConvertedTransactions::Table).if_exists().to_owned(),
            Table::drop().table(Expenses::Table).if_exists().to_owned(),
            Table::drop().table(ExpenseCategories::Table).if_exists().to_owned(),
            Table::drop().table(IncomeTransactions::Table).if_exists().to_owned(),
            Table::drop().table(IncomeResources::Table).if_exists().to_owned(),
            Table::drop().table(IncomeResourceCategories::Table).if_exists().to_owned(),
            Table::drop().table(Assets::Table).if_exists().to_owned(),
            Table::drop().table(Wallets::Table).if_exists().to_owned(),
            Table::drop().table(WalletCategories::Table).if_exists().to_owned(),
            Table::drop().table(Entities::Table).if_exists().to_owned(),
            Table::drop().table(EntityTypes::Table).if_exists().to_owned(),
            Table::drop().table(ValueCategories::Table).if_exists().to_owned(),
            Table::drop().table(CanvasMembers::Table).if_exists().to_owned(),
            Table::drop().table(Canvases::Table).if_exists().to_owned(),
            Table::drop().table(Roles::Table).if_exists().to_owned(),
            Table::drop().table(UserSettings::Table).if_exists().to_owned(),
            Table::drop().table(CurrencyExchangeRates::Table).if_exists().to_owned(),
            Table::drop().table(Currencies::Table).if_exists().to_owned(),
            Table::drop().table(Users::Table).if_exists().to_owned(),
        ];

        for stmt in drops {
            manager.drop_table(stmt).await?;
        }

        Ok(())
    }
}

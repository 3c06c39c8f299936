//! Pending canvas invitations and per-period income forecasts.
//!
//! - `canvas_invitations`: an owner invites an email address; the invitee
//!   redeems the token once to become a member.
//! - `income_forecasts`: expected vs. actual income of a resource for a
//!   date range.

use sea_orm_migration::prelude::*;

use crate::m20260101_000000_init::{audit_columns, fk, id_col, index, money_col};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden, Clone, Copy)]
enum Users {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Canvases {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Roles {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Currencies {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum IncomeResources {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum CanvasInvitations {
    Table,
    Id,
    CanvasId,
    InviterId,
    InviteeEmail,
    RoleId,
    InvitationToken,
    Status,
    ExpiresAt,
    AcceptedAt,
    CreatedAt,
}

#[derive(Iden, Clone, Copy)]
enum IncomeForecasts {
    Table,
    Id,
    IncomeResourceId,
    PeriodType,
    PeriodStart,
    PeriodEnd,
    ForecastedAmount,
    ActualAmount,
    CurrencyId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();

        let mut invitations = Table::create();
        invitations
            .table(CanvasInvitations::Table)
            .if_not_exists()
            .col(id_col(CanvasInvitations::Id))
            .col(ColumnDef::new(CanvasInvitations::CanvasId).integer().not_null())
            .col(ColumnDef::new(CanvasInvitations::InviterId).integer().not_null())
            .col(
                ColumnDef::new(CanvasInvitations::InviteeEmail)
                    .string_len(255)
                    .not_null(),
            )
            .col(ColumnDef::new(CanvasInvitations::RoleId).integer())
            .col(
                ColumnDef::new(CanvasInvitations::InvitationToken)
                    .string_len(255)
                    .unique_key(),
            )
            .col(
                ColumnDef::new(CanvasInvitations::Status)
                    .string_len(50)
                    .not_null()
                    .default("pending"),
            )
            .col(ColumnDef::new(CanvasInvitations::ExpiresAt).timestamp_with_time_zone())
            .col(ColumnDef::new(CanvasInvitations::AcceptedAt).timestamp_with_time_zone())
            .col(
                ColumnDef::new(CanvasInvitations::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(&mut fk(
                "fk-canvas_invitations-canvas_id",
                CanvasInvitations::Table,
                CanvasInvitations::CanvasId,
                Canvases::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-canvas_invitations-inviter_id",
                CanvasInvitations::Table,
                CanvasInvitations::InviterId,
                Users::Table,
                ForeignKeyAction::NoAction,
            ))
            .foreign_key(&mut fk(
                "fk-canvas_invitations-role_id",
                CanvasInvitations::Table,
                CanvasInvitations::RoleId,
                Roles::Table,
                ForeignKeyAction::NoAction,
            ));
        manager.create_table(invitations.to_owned()).await?;
        index(
            manager,
            CanvasInvitations::Table,
            &[CanvasInvitations::CanvasId],
            false,
        )
        .await?;

        let mut forecasts = Table::create();
        forecasts
            .table(IncomeForecasts::Table)
            .if_not_exists()
            .col(id_col(IncomeForecasts::Id))
            .col(
                ColumnDef::new(IncomeForecasts::IncomeResourceId)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(IncomeForecasts::PeriodType).string_len(50))
            .col(ColumnDef::new(IncomeForecasts::PeriodStart).date().not_null())
            .col(ColumnDef::new(IncomeForecasts::PeriodEnd).date().not_null())
            .col(
                money_col(backend, IncomeForecasts::ForecastedAmount)
                    .not_null()
                    .check(Expr::col(IncomeForecasts::ForecastedAmount).gte(0)),
            )
            .col(
                money_col(backend, IncomeForecasts::ActualAmount)
                    .check(Expr::col(IncomeForecasts::ActualAmount).gte(0)),
            )
            .col(ColumnDef::new(IncomeForecasts::CurrencyId).integer())
            .foreign_key(&mut fk(
                "fk-income_forecasts-income_resource_id",
                IncomeForecasts::Table,
                IncomeForecasts::IncomeResourceId,
                IncomeResources::Table,
                ForeignKeyAction::Cascade,
            ))
            .foreign_key(&mut fk(
                "fk-income_forecasts-currency_id",
                IncomeForecasts::Table,
                IncomeForecasts::CurrencyId,
                Currencies::Table,
                ForeignKeyAction::NoAction,
            ));
        audit_columns(&mut forecasts, IncomeForecasts::Table);
        manager.create_table(forecasts.to_owned()).await?;
        index(
            manager,
            IncomeForecasts::Table,
            &[IncomeForecasts::IncomeResourceId],
            false,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(IncomeForecasts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CanvasInvitations::Table).if_exists().to_owned())
            .await
    }
}

//! Expense and spent-transaction endpoints.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    Message,
    expense::{
        ExpenseList, ExpenseNew, ExpenseResponse, ExpenseUpdate, SpentTransactionList,
        SpentTransactionNew, SpentTransactionResponse,
    },
};
use engine::{NewExpense, NewSpentTransaction};

use crate::{
    AuthUser, ServerError, convert, extract::Json, missing_fields, parse_id, server::ServerState,
};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let expenses = state
        .engine
        .expenses(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::expense)
        .collect();

    Ok(Json(ExpenseList { expenses }))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let (Some(name), Some(expense_category_id), Some(currency_id)) = (
        payload.name.as_deref(),
        payload.expense_category_id,
        payload.currency_id,
    ) else {
        return Err(missing_fields(&[
            ("name", payload.name.is_some()),
            ("expenseCategoryId", payload.expense_category_id.is_some()),
            ("currencyId", payload.currency_id.is_some()),
        ]));
    };

    let expense = state
        .engine
        .create_expense(
            user.id(),
            canvas_id,
            NewExpense {
                name: name.to_string(),
                expense_category_id,
                currency_id,
                entity_id: payload.entity_id,
                is_recurring: payload.is_recurring.unwrap_or(false),
                recurrence_pattern: payload.recurrence_pattern,
                description: payload.description,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ExpenseResponse {
            expense: convert::expense(expense),
        }),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let expense_id = parse_id(&id, "expense")?;
    let detail = state.engine.expense(user.id(), expense_id).await?;

    let mut expense = convert::expense(detail.expense);
    expense.category = detail.category.map(convert::expense_category);
    expense.currency = detail.currency.map(convert::currency);
    Ok(Json(ExpenseResponse { expense }))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ExpenseUpdate>,
) -> Result<Json<ExpenseResponse>, ServerError> {
    let expense_id = parse_id(&id, "expense")?;
    let expense = state
        .engine
        .update_expense(
            user.id(),
            expense_id,
            engine::ExpenseUpdate {
                name: payload.name,
                expense_category_id: payload.expense_category_id,
                currency_id: payload.currency_id,
                entity_id: payload.entity_id,
                is_recurring: payload.is_recurring,
                recurrence_pattern: payload.recurrence_pattern,
                description: payload.description,
                photo_url: payload.photo_url,
                is_active: payload.is_active,
            },
        )
        .await?;

    Ok(Json(ExpenseResponse {
        expense: convert::expense(expense),
    }))
}

pub async fn deactivate(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let expense_id = parse_id(&id, "expense")?;
    state.engine.deactivate_expense(user.id(), expense_id).await?;
    Ok(Json(Message::new("Expense deactivated successfully")))
}

pub async fn list_spent(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SpentTransactionList>, ServerError> {
    let expense_id = parse_id(&id, "expense")?;
    let spent_transactions = state
        .engine
        .spent_transactions(user.id(), expense_id)
        .await?
        .into_iter()
        .map(convert::spent_transaction)
        .collect();

    Ok(Json(SpentTransactionList { spent_transactions }))
}

pub async fn create_spent(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SpentTransactionNew>,
) -> Result<(StatusCode, Json<SpentTransactionResponse>), ServerError> {
    let expense_id = parse_id(&id, "expense")?;
    let (Some(origin_asset_id), Some(amount)) = (payload.origin_asset_id, payload.amount) else {
        return Err(missing_fields(&[
            ("originAssetId", payload.origin_asset_id.is_some()),
            ("amount", payload.amount.is_some()),
        ]));
    };

    let spent = state
        .engine
        .create_spent_transaction(
            user.id(),
            expense_id,
            NewSpentTransaction {
                origin_asset_id,
                converted_transaction_id: payload.converted_transaction_id,
                amount,
                due_date: payload.due_date,
                paid_date: payload.paid_date,
                status: payload.status,
                notes: payload.notes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SpentTransactionResponse {
            spent_transaction: convert::spent_transaction(spent),
        }),
    ))
}

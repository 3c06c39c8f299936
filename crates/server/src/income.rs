//! Income resources, their transactions, and income categories.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    Message,
    income::{
        IncomeCategoryChange, IncomeCategoryList, IncomeCategoryResponse, IncomeForecastList,
        IncomeForecastNew, IncomeForecastResponse, IncomeResourceList, IncomeResourceNew,
        IncomeResourceResponse, IncomeResourceUpdate, IncomeTransactionList, IncomeTransactionNew,
        IncomeTransactionResponse, IncomeTransactionUpdate,
    },
};
use engine::{NewIncomeForecast, NewIncomeResource, NewIncomeTransaction};

use crate::{
    AuthUser, ServerError, convert, extract::Json, missing_fields, parse_id, required,
    server::ServerState,
};

pub async fn list_resources(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IncomeResourceList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let income_resources = state
        .engine
        .income_resources(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::income_resource)
        .collect();

    Ok(Json(IncomeResourceList { income_resources }))
}

pub async fn create_resource(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeResourceNew>,
) -> Result<(StatusCode, Json<IncomeResourceResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let (Some(name), Some(category_id), Some(value_category_id)) = (
        payload.name.as_deref(),
        payload.income_resource_category_id,
        payload.default_value_category_id,
    ) else {
        return Err(missing_fields(&[
            ("name", payload.name.is_some()),
            (
                "incomeResourceCategoryId",
                payload.income_resource_category_id.is_some(),
            ),
            (
                "defaultValueCategoryId",
                payload.default_value_category_id.is_some(),
            ),
        ]));
    };

    let resource = state
        .engine
        .create_income_resource(
            user.id(),
            canvas_id,
            NewIncomeResource {
                name: name.to_string(),
                income_resource_category_id: category_id,
                default_value_category_id: value_category_id,
                owner_id: payload.owner_id,
                default_entity_id: payload.default_entity_id,
                default_asset_id: payload.default_asset_id,
                is_recurring: payload.is_recurring.unwrap_or(false),
                recurrence_pattern: payload.recurrence_pattern,
                photo_url: payload.photo_url,
                description: payload.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IncomeResourceResponse {
            income_resource: convert::income_resource(resource),
        }),
    ))
}

pub async fn get_resource(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IncomeResourceResponse>, ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let resource = state.engine.income_resource(user.id(), resource_id).await?;
    Ok(Json(IncomeResourceResponse {
        income_resource: convert::income_resource(resource),
    }))
}

pub async fn update_resource(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeResourceUpdate>,
) -> Result<Json<IncomeResourceResponse>, ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let resource = state
        .engine
        .update_income_resource(
            user.id(),
            resource_id,
            engine::IncomeResourceUpdate {
                name: payload.name,
                income_resource_category_id: payload.income_resource_category_id,
                default_value_category_id: payload.default_value_category_id,
                owner_id: payload.owner_id,
                default_entity_id: payload.default_entity_id,
                default_asset_id: payload.default_asset_id,
                is_recurring: payload.is_recurring,
                recurrence_pattern: payload.recurrence_pattern,
                photo_url: payload.photo_url,
                description: payload.description,
            },
        )
        .await?;

    Ok(Json(IncomeResourceResponse {
        income_resource: convert::income_resource(resource),
    }))
}

/// Hard delete; the resource's transactions go with it.
pub async fn delete_resource(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    state
        .engine
        .delete_income_resource(user.id(), resource_id)
        .await?;
    Ok(Json(Message::new("Income resource deleted successfully")))
}

pub async fn list_transactions(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IncomeTransactionList>, ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let transactions = state
        .engine
        .income_transactions(user.id(), resource_id)
        .await?
        .into_iter()
        .map(convert::income_transaction)
        .collect();

    Ok(Json(IncomeTransactionList { transactions }))
}

pub async fn create_transaction(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeTransactionNew>,
) -> Result<(StatusCode, Json<IncomeTransactionResponse>), ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let (Some(destination_asset_id), Some(amount)) =
        (payload.destination_asset_id, payload.amount)
    else {
        return Err(missing_fields(&[
            ("destinationAssetId", payload.destination_asset_id.is_some()),
            ("amount", payload.amount.is_some()),
        ]));
    };

    let transaction = state
        .engine
        .create_income_transaction(
            user.id(),
            resource_id,
            NewIncomeTransaction {
                destination_asset_id,
                amount,
                expected_date: payload.expected_date,
                received_date: payload.received_date,
                status: payload.status,
                notes: payload.notes,
                description: payload.description,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IncomeTransactionResponse {
            transaction: convert::income_transaction(transaction),
        }),
    ))
}

pub async fn get_transaction(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IncomeTransactionResponse>, ServerError> {
    let transaction_id = parse_id(&id, "income transaction")?;
    let transaction = state
        .engine
        .income_transaction(user.id(), transaction_id)
        .await?;
    Ok(Json(IncomeTransactionResponse {
        transaction: convert::income_transaction(transaction),
    }))
}

pub async fn update_transaction(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeTransactionUpdate>,
) -> Result<Json<IncomeTransactionResponse>, ServerError> {
    let transaction_id = parse_id(&id, "income transaction")?;
    let transaction = state
        .engine
        .update_income_transaction(
            user.id(),
            transaction_id,
            engine::IncomeTransactionUpdate {
                destination_asset_id: payload.destination_asset_id,
                amount: payload.amount,
                expected_date: payload.expected_date,
                received_date: payload.received_date,
                status: payload.status,
                notes: payload.notes,
                description: payload.description,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok(Json(IncomeTransactionResponse {
        transaction: convert::income_transaction(transaction),
    }))
}

pub async fn delete_transaction(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let transaction_id = parse_id(&id, "income transaction")?;
    state
        .engine
        .delete_income_transaction(user.id(), transaction_id)
        .await?;
    Ok(Json(Message::new("Income transaction deleted successfully")))
}

pub async fn list_categories(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<IncomeCategoryList>, ServerError> {
    let categories = state
        .engine
        .income_categories()
        .await?
        .into_iter()
        .map(convert::income_category)
        .collect();

    Ok(Json(IncomeCategoryList { categories }))
}

pub async fn create_category(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<IncomeCategoryChange>,
) -> Result<(StatusCode, Json<IncomeCategoryResponse>), ServerError> {
    let name = required(payload.name, "Category name is required")?;
    let category = state
        .engine
        .create_income_category(
            user.id(),
            engine::IncomeCategoryChange {
                name,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IncomeCategoryResponse {
            category: convert::income_category(category),
        }),
    ))
}

pub async fn update_category(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeCategoryChange>,
) -> Result<Json<IncomeCategoryResponse>, ServerError> {
    let category_id = parse_id(&id, "category")?;
    let name = required(payload.name, "Category name is required")?;
    let category = state
        .engine
        .update_income_category(
            user.id(),
            category_id,
            engine::IncomeCategoryChange {
                name,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok(Json(IncomeCategoryResponse {
        category: convert::income_category(category),
    }))
}

pub async fn delete_category(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let category_id = parse_id(&id, "category")?;
    state
        .engine
        .delete_income_category(user.id(), category_id)
        .await?;
    Ok(Json(Message::new("Category deleted successfully")))
}

pub async fn list_forecasts(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<IncomeForecastList>, ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let forecasts = state
        .engine
        .income_forecasts(user.id(), resource_id)
        .await?
        .into_iter()
        .map(convert::income_forecast)
        .collect();

    Ok(Json(IncomeForecastList { forecasts }))
}

pub async fn create_forecast(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<IncomeForecastNew>,
) -> Result<(StatusCode, Json<IncomeForecastResponse>), ServerError> {
    let resource_id = parse_id(&id, "income resource")?;
    let (Some(period_start), Some(period_end), Some(forecasted_amount)) = (
        payload.period_start,
        payload.period_end,
        payload.forecasted_amount,
    ) else {
        return Err(missing_fields(&[
            ("periodStart", payload.period_start.is_some()),
            ("periodEnd", payload.period_end.is_some()),
            ("forecastedAmount", payload.forecasted_amount.is_some()),
        ]));
    };

    let forecast = state
        .engine
        .create_income_forecast(
            user.id(),
            resource_id,
            NewIncomeForecast {
                period_type: payload.period_type,
                period_start,
                period_end,
                forecasted_amount,
                actual_amount: payload.actual_amount,
                currency_id: payload.currency_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(IncomeForecastResponse {
            forecast: convert::income_forecast(forecast),
        }),
    ))
}

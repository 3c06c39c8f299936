//! Read-mostly endpoints: currencies and rates, categories, counterparties
//! and planning data.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    category::{ExpenseCategoryList, ValueCategoryList, ValueCategoryQuery, WalletCategoryList},
    currency::{CurrencyList, Rate, RateQuery},
    entity::{EntityList, EntityNew, EntityResponse},
    planning::{BudgetList, DebtList, FinancialGoalList, FinancialPlanList, ToBuyItemList},
};
use engine::NewCounterparty;

use crate::{
    AuthUser, ServerError, convert,
    extract::{Json, Query},
    missing_fields, parse_id,
    server::ServerState,
};

pub async fn currencies(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<CurrencyList>, ServerError> {
    let currencies = state
        .engine
        .currencies()
        .await?
        .into_iter()
        .map(convert::currency)
        .collect();

    Ok(Json(CurrencyList { currencies }))
}

pub async fn rate(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Query(query): Query<RateQuery>,
) -> Result<Json<Rate>, ServerError> {
    let (Some(from), Some(to)) = (query.from.as_deref(), query.to.as_deref()) else {
        return Err(missing_fields(&[
            ("from", query.from.is_some()),
            ("to", query.to.is_some()),
        ]));
    };
    let rate = state.engine.exchange_rate(from, to).await?;

    Ok(Json(Rate {
        from: from.trim().to_uppercase(),
        to: to.trim().to_uppercase(),
        rate,
    }))
}

pub async fn wallet_categories(
    Extension(_user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<WalletCategoryList>, ServerError> {
    let wallet_categories = state
        .engine
        .wallet_categories()
        .await?
        .into_iter()
        .map(convert::wallet_category)
        .collect();

    Ok(Json(WalletCategoryList { wallet_categories }))
}

pub async fn expense_categories(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ExpenseCategoryList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let categories = state
        .engine
        .expense_categories(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::expense_category)
        .collect();

    Ok(Json(ExpenseCategoryList { categories }))
}

pub async fn value_categories(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ValueCategoryQuery>,
) -> Result<Json<ValueCategoryList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let categories = state
        .engine
        .value_categories(user.id(), canvas_id, query.wallet_compatible)
        .await?
        .into_iter()
        .map(convert::value_category)
        .collect();

    Ok(Json(ValueCategoryList { categories }))
}

pub async fn entities(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<EntityList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let entities = state
        .engine
        .counterparties(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::entity)
        .collect();

    Ok(Json(EntityList { entities }))
}

pub async fn create_entity(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EntityNew>,
) -> Result<(StatusCode, Json<EntityResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let Some(name) = payload.name else {
        return Err(missing_fields(&[("name", false)]));
    };

    let entity = state
        .engine
        .create_counterparty(
            user.id(),
            canvas_id,
            NewCounterparty {
                name,
                entity_type_id: payload.entity_type_id,
                description: payload.description,
                contact_info: payload.contact_info,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EntityResponse {
            entity: convert::entity(entity),
        }),
    ))
}

pub async fn debts(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<DebtList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let debts = state
        .engine
        .debts(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::debt)
        .collect();

    Ok(Json(DebtList { debts }))
}

pub async fn budgets(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<BudgetList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let budgets = state
        .engine
        .budgets(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::budget)
        .collect();

    Ok(Json(BudgetList { budgets }))
}

pub async fn financial_plans(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<FinancialPlanList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let financial_plans = state
        .engine
        .financial_plans(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::financial_plan)
        .collect();

    Ok(Json(FinancialPlanList { financial_plans }))
}

pub async fn financial_goals(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<FinancialGoalList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let financial_goals = state
        .engine
        .financial_goals(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::financial_goal)
        .collect();

    Ok(Json(FinancialGoalList { financial_goals }))
}

pub async fn to_buy_items(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ToBuyItemList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let to_buy_items = state
        .engine
        .to_buy_items(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::to_buy_item)
        .collect();

    Ok(Json(ToBuyItemList { to_buy_items }))
}

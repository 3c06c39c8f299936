//! Asset endpoints.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use api_types::asset::{AssetList, AssetNew, AssetResponse};
use engine::NewAsset;

use crate::{
    AuthUser, ServerError, convert, extract::Json, missing_fields, parse_id, server::ServerState,
};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AssetList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let assets = state
        .engine
        .assets(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::asset)
        .collect();

    Ok(Json(AssetList { assets }))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AssetNew>,
) -> Result<(StatusCode, Json<AssetResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let (Some(name), Some(value_category_id)) =
        (payload.name.as_deref(), payload.value_category_id)
    else {
        return Err(missing_fields(&[
            ("name", payload.name.is_some()),
            ("valueCategoryId", payload.value_category_id.is_some()),
        ]));
    };

    let asset = state
        .engine
        .create_asset(
            user.id(),
            canvas_id,
            NewAsset {
                name: name.to_string(),
                value_category_id,
                wallet_id: payload.wallet_id,
                owner_id: payload.owner_id,
                quantity: payload.quantity.unwrap_or(Decimal::ZERO),
                purchase_price: payload.purchase_price,
                purchase_currency_id: payload.purchase_currency_id,
                purchase_date: payload.purchase_date,
                current_value: payload.current_value,
                description: payload.description,
                photo_url: payload.photo_url,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AssetResponse {
            asset: convert::asset(asset),
        }),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<AssetResponse>, ServerError> {
    let asset_id = parse_id(&id, "asset")?;
    let asset = state.engine.asset(user.id(), asset_id).await?;
    Ok(Json(AssetResponse {
        asset: convert::asset(asset),
    }))
}

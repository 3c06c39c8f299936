//! Currency conversion endpoints.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::conversion::{ConversionList, ConversionNew, ConversionResponse};
use engine::NewConversion;

use crate::{
    AuthUser, ServerError, convert, extract::Json, missing_fields, parse_id, server::ServerState,
};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ConversionList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let conversions = state
        .engine
        .conversions(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::conversion)
        .collect();

    Ok(Json(ConversionList { conversions }))
}

/// Record a conversion hop. The exchange rate is derived from the two
/// amounts when the body omits it.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ConversionNew>,
) -> Result<(StatusCode, Json<ConversionResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let (
        Some(origin_asset_id),
        Some(destination_asset_id),
        Some(conversion_date),
        Some(origin_amount),
        Some(destination_amount),
    ) = (
        payload.origin_asset_id,
        payload.destination_asset_id,
        payload.conversion_date,
        payload.origin_amount,
        payload.destination_amount,
    )
    else {
        return Err(missing_fields(&[
            ("originAssetId", payload.origin_asset_id.is_some()),
            ("destinationAssetId", payload.destination_asset_id.is_some()),
            ("conversionDate", payload.conversion_date.is_some()),
            ("originAmount", payload.origin_amount.is_some()),
            ("destinationAmount", payload.destination_amount.is_some()),
        ]));
    };

    let conversion = state
        .engine
        .create_conversion(
            user.id(),
            canvas_id,
            NewConversion {
                origin_asset_id,
                destination_asset_id,
                income_transaction_id: payload.income_transaction_id,
                parent_conversion_id: payload.parent_conversion_id,
                conversion_date,
                origin_amount,
                destination_amount,
                exchange_rate: payload.exchange_rate,
                transaction_fee: payload.transaction_fee,
                fee_currency_id: payload.fee_currency_id,
                conversion_type: payload.conversion_type,
                notes: payload.notes,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ConversionResponse {
            conversion: convert::conversion(conversion),
        }),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ConversionResponse>, ServerError> {
    let conversion_id = parse_id(&id, "conversion")?;
    let conversion = state.engine.conversion(user.id(), conversion_id).await?;
    Ok(Json(ConversionResponse {
        conversion: convert::conversion(conversion),
    }))
}

pub async fn chain(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<ConversionList>, ServerError> {
    let conversion_id = parse_id(&id, "conversion")?;
    let conversions = state
        .engine
        .conversion_chain(user.id(), conversion_id)
        .await?
        .into_iter()
        .map(convert::conversion)
        .collect();

    Ok(Json(ConversionList { conversions }))
}

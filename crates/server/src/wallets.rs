//! Wallets API endpoints.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    Message,
    wallet::{WalletList, WalletNew, WalletResponse, WalletUpdate},
};
use engine::NewWallet;

use crate::{
    AuthUser, ServerError, convert, extract::Json, missing_fields, parse_id, server::ServerState,
};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<WalletList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let wallets = state
        .engine
        .wallets(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::wallet)
        .collect();

    Ok(Json(WalletList { wallets }))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WalletNew>,
) -> Result<(StatusCode, Json<WalletResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let (Some(name), Some(wallet_category_id)) =
        (payload.name.as_deref(), payload.wallet_category_id)
    else {
        return Err(missing_fields(&[
            ("name", payload.name.is_some()),
            ("walletCategoryId", payload.wallet_category_id.is_some()),
        ]));
    };

    let wallet = state
        .engine
        .create_wallet(
            user.id(),
            canvas_id,
            NewWallet {
                name: name.to_string(),
                wallet_category_id,
                owner_id: payload.owner_id,
                wallet_number: payload.wallet_number,
                entity_id: payload.entity_id,
                description: payload.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(WalletResponse {
            wallet: convert::wallet(wallet),
        }),
    ))
}

/// A wallet together with its category and the assets it holds.
pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<WalletResponse>, ServerError> {
    let wallet_id = parse_id(&id, "wallet")?;
    let detail = state.engine.wallet(user.id(), wallet_id).await?;

    let mut wallet = convert::wallet(detail.wallet);
    wallet.category = detail.category.map(convert::wallet_category);
    wallet.assets = Some(detail.assets.into_iter().map(convert::asset).collect());
    Ok(Json(WalletResponse { wallet }))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<WalletUpdate>,
) -> Result<Json<WalletResponse>, ServerError> {
    let wallet_id = parse_id(&id, "wallet")?;
    let wallet = state
        .engine
        .update_wallet(
            user.id(),
            wallet_id,
            engine::WalletUpdate {
                name: payload.name,
                wallet_category_id: payload.wallet_category_id,
                owner_id: payload.owner_id,
                wallet_number: payload.wallet_number,
                entity_id: payload.entity_id,
                description: payload.description,
                is_archived: payload.is_archived,
            },
        )
        .await?;

    Ok(Json(WalletResponse {
        wallet: convert::wallet(wallet),
    }))
}

pub async fn archive(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let wallet_id = parse_id(&id, "wallet")?;
    state.engine.archive_wallet(user.id(), wallet_id).await?;
    Ok(Json(Message::new("Wallet archived successfully")))
}

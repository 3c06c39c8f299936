//! Canvas API endpoints

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    Message,
    canvas::{CanvasList, CanvasNew, CanvasQuery, CanvasResponse, CanvasUpdate},
};
use engine::{CanvasFilter, NewCanvas};

use crate::{
    AuthUser, ServerError, convert,
    extract::{Json, Query},
    parse_id, required,
    server::ServerState,
};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Query(query): Query<CanvasQuery>,
) -> Result<Json<CanvasList>, ServerError> {
    let canvases = state
        .engine
        .list_canvases(
            user.id(),
            CanvasFilter {
                archived: query.archived,
            },
        )
        .await?
        .into_iter()
        .map(convert::canvas_membership)
        .collect();

    Ok(Json(CanvasList { canvases }))
}

/// Create a canvas; the caller becomes its owner.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<CanvasNew>,
) -> Result<(StatusCode, Json<CanvasResponse>), ServerError> {
    let name = required(payload.name, "Canvas name is required")?;
    let (canvas, owner) = state
        .engine
        .create_canvas(
            user.id(),
            NewCanvas {
                name,
                description: payload.description,
                photo_url: payload.photo_url,
                canvas_type: payload.canvas_type,
                base_currency_id: payload.base_currency_id,
            },
        )
        .await?;

    let mut canvas = convert::canvas(canvas);
    canvas.is_owner = Some(owner.is_owner);
    canvas.base_currency_id = Some(owner.base_currency_id);
    Ok((StatusCode::CREATED, Json(CanvasResponse { canvas })))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CanvasResponse>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let canvas = state.engine.canvas(user.id(), canvas_id).await?;

    Ok(Json(CanvasResponse {
        canvas: convert::canvas_membership(canvas),
    }))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CanvasUpdate>,
) -> Result<Json<CanvasResponse>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let canvas = state
        .engine
        .update_canvas(
            user.id(),
            canvas_id,
            engine::CanvasUpdate {
                name: payload.name,
                description: payload.description,
                photo_url: payload.photo_url,
                canvas_type: payload.canvas_type,
                is_archived: payload.is_archived,
            },
        )
        .await?;

    Ok(Json(CanvasResponse {
        canvas: convert::canvas(canvas),
    }))
}

/// Canvases are archived, never removed.
pub async fn archive(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Message>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    state.engine.archive_canvas(user.id(), canvas_id).await?;
    Ok(Json(Message::new("Canvas archived successfully")))
}

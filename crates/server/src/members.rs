//! Canvas membership endpoints (owner-only writes).

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};

use api_types::{
    Message,
    member::{MemberList, MemberResponse, MemberUpsert},
};
use engine::{MemberRef, NewMember};

use crate::{AuthUser, ServerError, convert, extract::Json, parse_id, server::ServerState};

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<MemberList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let members = state
        .engine
        .canvas_members(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::member_with_user)
        .collect();

    Ok(Json(MemberList { members }))
}

/// Add a member, or update the role and base currency of an existing one.
pub async fn upsert(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MemberUpsert>,
) -> Result<(StatusCode, Json<MemberResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let member_ref = match (payload.user_id, payload.email) {
        (Some(user_id), _) => MemberRef::Id(user_id),
        (None, Some(email)) => MemberRef::Email(email),
        (None, None) => {
            return Err(ServerError::BadRequest(
                "userId or email is required".to_string(),
            ));
        }
    };

    let (member, created) = state
        .engine
        .upsert_canvas_member(
            user.id(),
            canvas_id,
            NewMember {
                user: member_ref,
                role_id: payload.role_id,
                base_currency_id: payload.base_currency_id,
            },
        )
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(MemberResponse {
            member: convert::member(member),
        }),
    ))
}

pub async fn remove(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<Json<Message>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let member_user_id = parse_id(&member_id, "user")?;
    state
        .engine
        .remove_canvas_member(user.id(), canvas_id, member_user_id)
        .await?;
    Ok(Json(Message::new("Member removed successfully")))
}

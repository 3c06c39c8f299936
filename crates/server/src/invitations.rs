//! Canvas invitations: the owner invites an address, the invitee accepts
//! with the emailed token while signed in.

use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use api_types::member::{
    InvitationAccept, InvitationList, InvitationNew, InvitationResponse, MemberResponse,
};
use engine::NewInvitation;

use crate::{
    AuthUser, ServerError, convert, extract::Json, parse_id, required, server::ServerState,
};

const INVITATION_TTL_DAYS: i64 = 7;

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<InvitationList>, ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let invitations = state
        .engine
        .canvas_invitations(user.id(), canvas_id)
        .await?
        .into_iter()
        .map(convert::invitation)
        .collect();

    Ok(Json(InvitationList { invitations }))
}

/// Create an invitation and mail its link. A failed delivery is logged; the
/// token is returned to the owner either way.
pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<InvitationNew>,
) -> Result<(StatusCode, Json<InvitationResponse>), ServerError> {
    let canvas_id = parse_id(&id, "canvas")?;
    let email = required(payload.email, "Email is required")?;

    let token = Uuid::new_v4().to_string();
    let invitation = state
        .engine
        .create_invitation(
            user.id(),
            canvas_id,
            NewInvitation {
                email,
                role_id: payload.role_id,
                token: token.clone(),
                expires_at: Utc::now() + Duration::days(INVITATION_TTL_DAYS),
            },
        )
        .await?;

    let canvas = state.engine.canvas(user.id(), canvas_id).await?;
    let link = format!(
        "{}/invitations/accept?token={token}",
        state.config.app_url.trim_end_matches('/')
    );
    if let Err(err) = state
        .notifier
        .send_invitation(&invitation.invitee_email, &canvas.canvas.name, &link)
        .await
    {
        tracing::warn!(canvas_id, "failed to send invitation: {err}");
    }

    let mut body = convert::invitation(invitation);
    body.token = Some(token);
    Ok((StatusCode::CREATED, Json(InvitationResponse { invitation: body })))
}

pub async fn accept(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<InvitationAccept>,
) -> Result<Json<MemberResponse>, ServerError> {
    let token = required(payload.token, "Invitation token is required")?;
    let member = state.engine.accept_invitation(user.id(), &token).await?;

    Ok(Json(MemberResponse {
        member: convert::member(member),
    }))
}

//! Account endpoints under `/api/auth`.
//!
//! Credentials live at the identity provider; every successful sign-up or
//! sign-in is mirrored into the `users` table. Verification and reset links
//! carry one-shot tokens from the [`TokenStore`](crate::tokens::TokenStore).

use axum::{Extension, extract::State, http::StatusCode};

use api_types::{
    Message,
    auth::{
        AuthResponse, ChangePhotoRequest, EmailRequest, LoginRequest, RefreshRequest,
        ResetPasswordRequest, SessionResponse, SettingsResponse, SettingsUpdate, SignupRequest,
        TokenQuery, UserResponse,
    },
};

use crate::{
    AuthUser, ServerError, convert,
    extract::{Json, Query},
    identity::{IdentityError, SignupProfile},
    missing_fields,
    notify::NotifyError,
    required,
    server::ServerState,
    tokens::{RedeemError, TokenGrant, TokenKind},
};

const MIN_PASSWORD_LEN: usize = 8;
const RESET_NEUTRAL: &str =
    "If an account with that email exists, a password reset link has been sent.";
const RESEND_NEUTRAL: &str =
    "If an account with that email exists and is unverified, a verification email has been sent.";

fn check_password(password: &str) -> Result<(), ServerError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServerError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}

/// Provider refusals become a 400 carrying the provider's reason.
fn rejected_as_bad_request(err: IdentityError) -> ServerError {
    match err {
        IdentityError::Rejected(msg) => ServerError::BadRequest(msg),
        other => other.into(),
    }
}

fn link(state: &ServerState, page: &str, token: &str) -> String {
    format!(
        "{}/{page}?token={token}",
        state.config.app_url.trim_end_matches('/')
    )
}

async fn send_verification(state: &ServerState, grant: TokenGrant) -> Result<(), NotifyError> {
    let email = grant.email.clone();
    let token = state.tokens.issue(TokenKind::Verification, grant).await;
    state
        .notifier
        .send_verification(&email, &link(state, "verify-email", &token))
        .await
}

fn redeem_error(err: RedeemError, kind: TokenKind) -> ServerError {
    let msg = match (kind, err) {
        (TokenKind::Verification, RedeemError::Unknown) => "Invalid or expired verification token",
        (TokenKind::Verification, RedeemError::Expired) => "Verification token has expired",
        (TokenKind::PasswordReset, RedeemError::Unknown) => "Invalid or expired reset token",
        (TokenKind::PasswordReset, RedeemError::Expired) => "Reset token has expired",
    };
    ServerError::BadRequest(msg.to_string())
}

pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ServerError> {
    let (Some(email), Some(password), Some(first_name), Some(last_name)) = (
        payload.email.as_deref(),
        payload.password.as_deref(),
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
    ) else {
        return Err(missing_fields(&[
            ("email", payload.email.is_some()),
            ("password", payload.password.is_some()),
            ("firstName", payload.first_name.is_some()),
            ("lastName", payload.last_name.is_some()),
        ]));
    };
    check_password(password)?;

    let profile = SignupProfile {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
    };
    let account = state
        .identity
        .sign_up(email.trim(), password, &profile)
        .await
        .map_err(rejected_as_bad_request)?;

    let mut identity = account.identity();
    identity.first_name = identity.first_name.or(Some(profile.first_name));
    identity.last_name = identity.last_name.or(Some(profile.last_name));
    let user = state.engine.resolve_user(identity).await?;

    let grant = TokenGrant {
        user_id: account.id,
        email: user.email.clone(),
    };
    // Delivery failure does not undo the sign-up.
    if let Err(err) = send_verification(&state, grant).await {
        tracing::error!("failed to send verification email: {err}");
    }

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
            user: convert::user(user),
            session: None,
        }),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ServerError> {
    let (Some(email), Some(password)) = (payload.email.as_deref(), payload.password.as_deref())
    else {
        return Err(ServerError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    let (account, session) = match state.identity.sign_in(email.trim(), password).await {
        Ok(signed_in) => signed_in,
        Err(IdentityError::Rejected(_)) => {
            return Err(ServerError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }
        Err(IdentityError::EmailNotConfirmed) => {
            return Err(ServerError::Forbidden("Email not verified".to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    let user = state.engine.resolve_user(account.identity()).await?;
    if !user.email_verified {
        return Err(ServerError::Forbidden("Email not verified".to_string()));
    }

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: convert::user(user),
        session: Some(convert::session(session)),
    }))
}

pub async fn refresh(
    State(state): State<ServerState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<SessionResponse>, ServerError> {
    let refresh_token = required(payload.refresh_token, "Refresh token is required")?;
    let session = match state.identity.refresh(&refresh_token).await {
        Ok(session) => session,
        Err(IdentityError::Rejected(_)) => {
            return Err(ServerError::Unauthorized(
                "Invalid or expired refresh token".to_string(),
            ));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(Json(SessionResponse {
        session: convert::session(session),
    }))
}

pub async fn logout(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<Message>, ServerError> {
    if let Some(token) = user.access_token.as_deref() {
        state.identity.sign_out(token).await?;
    }
    Ok(Json(Message::new("Logged out successfully")))
}

pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(payload): Json<EmailRequest>,
) -> Result<Json<Message>, ServerError> {
    let email = required(payload.email, "Email is required")?;
    let account = match state.identity.find_user_by_email(&email).await {
        Ok(Some(account)) => account,
        Ok(None) => return Ok(Json(Message::new(RESET_NEUTRAL))),
        Err(err) => {
            tracing::error!("password reset lookup failed: {err}");
            return Ok(Json(Message::new(RESET_NEUTRAL)));
        }
    };

    let grant = TokenGrant {
        user_id: account.id,
        email: account.email.clone(),
    };
    let token = state.tokens.issue(TokenKind::PasswordReset, grant).await;
    state
        .notifier
        .send_password_reset(&account.email, &link(&state, "reset-password", &token))
        .await
        .map_err(|err| {
            ServerError::Internal(format!("failed to send password reset email: {err}"))
        })?;

    Ok(Json(Message::new(RESET_NEUTRAL)))
}

/// The token is only consumed once the provider has accepted the new
/// password, so a provider failure leaves it usable for a retry.
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<Message>, ServerError> {
    let (Some(token), Some(password)) = (payload.token.as_deref(), payload.password.as_deref())
    else {
        return Err(ServerError::BadRequest(
            "Token and new password are required".to_string(),
        ));
    };
    check_password(password)?;

    let grant = state
        .tokens
        .peek(TokenKind::PasswordReset, token)
        .await
        .map_err(|err| redeem_error(err, TokenKind::PasswordReset))?;
    state
        .identity
        .set_password(&grant.user_id, password)
        .await
        .map_err(rejected_as_bad_request)?;
    state
        .tokens
        .redeem(TokenKind::PasswordReset, token)
        .await
        .map_err(|err| redeem_error(err, TokenKind::PasswordReset))?;

    Ok(Json(Message::new("Password reset successfully")))
}

pub async fn verify_email(
    State(state): State<ServerState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Message>, ServerError> {
    let token = required(query.token, "Verification token is required")?;
    let grant = state
        .tokens
        .peek(TokenKind::Verification, &token)
        .await
        .map_err(|err| redeem_error(err, TokenKind::Verification))?;
    state
        .identity
        .confirm_email(&grant.user_id)
        .await
        .map_err(rejected_as_bad_request)?;
    state
        .tokens
        .redeem(TokenKind::Verification, &token)
        .await
        .map_err(|err| redeem_error(err, TokenKind::Verification))?;

    if let Some(user) = state.engine.user_by_email(&grant.email).await? {
        state.engine.set_email_verified(user.id).await?;
    }

    Ok(Json(Message::new("Email verified successfully")))
}

pub async fn resend_verification(
    State(state): State<ServerState>,
    Json(payload): Json<EmailRequest>,
) -> Result<Json<Message>, ServerError> {
    let email = required(payload.email, "Email is required")?;
    let account = state
        .identity
        .find_user_by_email(&email)
        .await
        .map_err(|err| ServerError::Internal(format!("failed to check user status: {err}")))?;
    let Some(account) = account else {
        return Ok(Json(Message::new(RESEND_NEUTRAL)));
    };
    if account.email_confirmed {
        return Err(ServerError::BadRequest(
            "Email is already verified".to_string(),
        ));
    }

    send_verification(
        &state,
        TokenGrant {
            user_id: account.id,
            email: account.email,
        },
    )
    .await
    .map_err(|err| ServerError::Internal(format!("failed to send verification email: {err}")))?;

    Ok(Json(Message::new(RESEND_NEUTRAL)))
}

pub async fn user_info(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse {
        user: convert::user(user.user),
    })
}

pub async fn change_photo(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<ChangePhotoRequest>,
) -> Result<Json<Message>, ServerError> {
    let photo_url = required(payload.photo_url, "Photo URL is required")?;
    if let Some(external_id) = user.user.external_id.as_deref() {
        state.identity.update_photo(external_id, &photo_url).await?;
    }
    state
        .engine
        .update_user_photo(user.id(), Some(photo_url))
        .await?;

    Ok(Json(Message::new("Photo updated successfully")))
}

pub async fn settings(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<SettingsResponse>, ServerError> {
    let settings = state.engine.user_settings(user.id()).await?;
    Ok(Json(SettingsResponse {
        settings: convert::settings(settings),
    }))
}

pub async fn update_settings(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> Result<Json<SettingsResponse>, ServerError> {
    let settings = state
        .engine
        .update_user_settings(
            user.id(),
            engine::SettingsUpdate {
                timezone: payload.timezone,
                language: payload.language,
                date_format: payload.date_format,
                default_currency_id: payload.default_currency_id,
                theme: payload.theme,
                notification_enabled: payload.notification_enabled,
            },
        )
        .await?;

    Ok(Json(SettingsResponse {
        settings: convert::settings(settings),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password("seven77").is_err());
        assert!(check_password("eight888").is_ok());
    }

    #[test]
    fn redeem_errors_name_the_token() {
        match redeem_error(RedeemError::Expired, TokenKind::PasswordReset) {
            ServerError::BadRequest(msg) => assert_eq!(msg, "Reset token has expired"),
            _ => panic!("expected a bad request"),
        }
        match redeem_error(RedeemError::Unknown, TokenKind::Verification) {
            ServerError::BadRequest(msg) => {
                assert_eq!(msg, "Invalid or expired verification token");
            }
            _ => panic!("expected a bad request"),
        }
    }
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use api_types::ErrorBody;
pub use server::{AuthUser, ServerConfig, ServerState, router, run, run_with_listener};

mod assets;
mod auth;
mod canvases;
mod conversions;
mod convert;
mod expenses;
mod extract;
pub mod identity;
mod income;
mod invitations;
mod members;
pub mod notify;
mod reference;
mod server;
pub mod tokens;
mod wallets;

pub enum ServerError {
    Engine(EngineError),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    /// Detail is logged, never returned to the client.
    Internal(String),
}

const INTERNAL_ERROR: &str = "internal server error";

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidInput(_) | EngineError::InvalidId(_) | EngineError::InvalidAmount(_) => {
            StatusCode::BAD_REQUEST
        }
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            INTERNAL_ERROR.to_string()
        }
        EngineError::ExistingKey(key) => {
            tracing::error!("unexpected duplicate key: {key}");
            INTERNAL_ERROR.to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::BadRequest(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized(err) => (StatusCode::UNAUTHORIZED, err),
            ServerError::Forbidden(err) => (StatusCode::FORBIDDEN, err),
            ServerError::Internal(err) => {
                tracing::error!("{err}");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<identity::IdentityError> for ServerError {
    fn from(value: identity::IdentityError) -> Self {
        Self::Internal(format!("identity provider: {value}"))
    }
}

/// Parse a path segment as a numeric id, answering 400 `Invalid <label> ID`.
fn parse_id(raw: &str, label: &str) -> Result<i32, ServerError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServerError::BadRequest(format!("Invalid {label} ID")))
}

/// 400 naming every required body field flagged as absent.
fn missing_fields(fields: &[(&str, bool)]) -> ServerError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    ServerError::BadRequest(format!("Missing required fields: {}", missing.join(", ")))
}

/// Unwrap a required body field or answer 400 with `message`.
fn required<T>(value: Option<T>, message: &str) -> Result<T, ServerError> {
    value.ok_or_else(|| ServerError::BadRequest(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        for err in [
            EngineError::InvalidInput("x".to_string()),
            EngineError::InvalidId("x".to_string()),
            EngineError::InvalidAmount("x".to_string()),
        ] {
            let res = ServerError::from(err).into_response();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn duplicate_key_is_an_internal_error() {
        let res = ServerError::from(EngineError::ExistingKey("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn plain_variants_map_to_their_status() {
        assert_eq!(
            ServerError::BadRequest("bad".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServerError::Unauthorized("no".to_string()).into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ServerError::Forbidden("no".to_string()).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ServerError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_fields_are_named() {
        match missing_fields(&[("name", true), ("expenseCategoryId", false), ("currencyId", false)]) {
            ServerError::BadRequest(msg) => {
                assert_eq!(msg, "Missing required fields: expenseCategoryId, currencyId");
            }
            _ => panic!("expected a bad request"),
        }
    }

    #[test]
    fn path_ids_must_be_positive_integers() {
        assert_eq!(parse_id("12", "wallet").ok(), Some(12));
        for raw in ["abc", "0", "-3", "1.5", ""] {
            match parse_id(raw, "wallet") {
                Err(ServerError::BadRequest(msg)) => assert_eq!(msg, "Invalid wallet ID"),
                _ => panic!("{raw} should be rejected"),
            }
        }
    }
}

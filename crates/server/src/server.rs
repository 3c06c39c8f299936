use axum::{
    Json, Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use std::{sync::Arc, time::Duration};

use crate::{
    ServerError, assets, auth, canvases, conversions, expenses,
    identity::{IdentityError, IdentityProvider},
    income, invitations, members,
    notify::Notifier,
    reference,
    tokens::{self, TokenStore},
    wallets,
};
use engine::{Engine, User};

const TOKEN_PRUNE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// Frontend base URL used to build verification and reset links.
    pub app_url: String,
    /// Only read when built with the `dev-auth-bypass` feature.
    pub bypass_user_id: Option<i32>,
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
    pub identity: Arc<dyn IdentityProvider>,
    pub tokens: Arc<dyn TokenStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<ServerConfig>,
}

/// The caller, resolved once per request by the auth middleware.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user: User,
    /// `None` when the request was let through by the auth bypass.
    pub access_token: Option<String>,
}

impl AuthUser {
    pub fn id(&self) -> i32 {
        self.user.id
    }
}

#[cfg(feature = "dev-auth-bypass")]
async fn bypass_user(state: &ServerState) -> Result<Option<User>, ServerError> {
    let Some(user_id) = state.config.bypass_user_id else {
        return Ok(None);
    };
    tracing::warn!(user_id, "authentication bypassed");
    state
        .engine
        .user(user_id)
        .await
        .map(Some)
        .map_err(|_| ServerError::Unauthorized("Bypass user not found".to_string()))
}

#[cfg(not(feature = "dev-auth-bypass"))]
async fn bypass_user(_state: &ServerState) -> Result<Option<User>, ServerError> {
    Ok(None)
}

async fn authenticate(
    State(state): State<ServerState>,
    header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let auth_user = match header {
        Ok(TypedHeader(Authorization(bearer))) => {
            let token = bearer.token();
            let account = match state.identity.verify_token(token).await {
                Ok(account) => account,
                Err(IdentityError::Unavailable(err)) => {
                    return Err(ServerError::Internal(format!("authentication failed: {err}")));
                }
                Err(_) => return Err(ServerError::Unauthorized("Invalid token".to_string())),
            };
            AuthUser {
                user: state.engine.resolve_user(account.identity()).await?,
                access_token: Some(token.to_string()),
            }
        }
        Err(rejection) if rejection.is_missing() => match bypass_user(&state).await? {
            Some(user) => AuthUser {
                user,
                access_token: None,
            },
            None => {
                return Err(ServerError::Unauthorized(
                    "Missing authorization header".to_string(),
                ));
            }
        },
        Err(_) => return Err(ServerError::Unauthorized("Invalid token".to_string())),
    };

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}

async fn health(State(state): State<ServerState>) -> Result<Json<Value>, ServerError> {
    state
        .db
        .ping()
        .await
        .map_err(|err| ServerError::Internal(format!("database ping failed: {err}")))?;
    Ok(Json(json!({ "ok": true, "service": "eboom" })))
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/api/canvases", get(canvases::list).post(canvases::create))
        .route(
            "/api/canvases/{id}",
            get(canvases::get)
                .put(canvases::update)
                .delete(canvases::archive),
        )
        .route(
            "/api/canvases/{id}/members",
            get(members::list).post(members::upsert),
        )
        .route(
            "/api/canvases/{id}/members/{user_id}",
            axum::routing::delete(members::remove),
        )
        .route(
            "/api/canvases/{id}/invitations",
            get(invitations::list).post(invitations::create),
        )
        .route("/api/invitations/accept", post(invitations::accept))
        .route(
            "/api/canvases/{id}/wallets",
            get(wallets::list).post(wallets::create),
        )
        .route(
            "/api/canvases/{id}/assets",
            get(assets::list).post(assets::create),
        )
        .route(
            "/api/canvases/{id}/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/canvases/{id}/income-resources",
            get(income::list_resources).post(income::create_resource),
        )
        .route(
            "/api/canvases/{id}/conversions",
            get(conversions::list).post(conversions::create),
        )
        .route(
            "/api/canvases/{id}/entities",
            get(reference::entities).post(reference::create_entity),
        )
        .route(
            "/api/canvases/{id}/expense-categories",
            get(reference::expense_categories),
        )
        .route(
            "/api/canvases/{id}/value-categories",
            get(reference::value_categories),
        )
        .route("/api/canvases/{id}/debts", get(reference::debts))
        .route("/api/canvases/{id}/budgets", get(reference::budgets))
        .route(
            "/api/canvases/{id}/financial-plans",
            get(reference::financial_plans),
        )
        .route(
            "/api/canvases/{id}/financial-goals",
            get(reference::financial_goals),
        )
        .route("/api/canvases/{id}/to-buy-items", get(reference::to_buy_items))
        .route(
            "/api/wallets/{id}",
            get(wallets::get)
                .put(wallets::update)
                .delete(wallets::archive),
        )
        .route("/api/assets/{id}", get(assets::get))
        .route(
            "/api/expenses/{id}",
            get(expenses::get)
                .put(expenses::update)
                .delete(expenses::deactivate),
        )
        .route(
            "/api/expenses/{id}/spent-transactions",
            get(expenses::list_spent).post(expenses::create_spent),
        )
        .route(
            "/api/income/categories",
            get(income::list_categories).post(income::create_category),
        )
        .route(
            "/api/income/categories/{id}",
            axum::routing::put(income::update_category).delete(income::delete_category),
        )
        .route(
            "/api/income/resources/{id}",
            get(income::get_resource)
                .put(income::update_resource)
                .delete(income::delete_resource),
        )
        .route(
            "/api/income/resources/{id}/transactions",
            get(income::list_transactions).post(income::create_transaction),
        )
        .route(
            "/api/income/resources/{id}/forecasts",
            get(income::list_forecasts).post(income::create_forecast),
        )
        .route(
            "/api/income/transactions/{id}",
            get(income::get_transaction)
                .put(income::update_transaction)
                .delete(income::delete_transaction),
        )
        .route("/api/conversions/{id}", get(conversions::get))
        .route("/api/conversions/{id}/chain", get(conversions::chain))
        .route("/api/currency", get(reference::currencies))
        .route("/api/currency/rate", get(reference::rate))
        .route("/api/wallet-categories", get(reference::wallet_categories))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/user-info", get(auth::user_info))
        .route("/api/auth/change-photo", post(auth::change_photo))
        .route(
            "/api/auth/settings",
            get(auth::settings).put(auth::update_settings),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/", get(health))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/forgot-password", post(auth::forgot_password))
        .route("/api/auth/reset-password", post(auth::reset_password))
        .route("/api/auth/verify-email", get(auth::verify_email))
        .route(
            "/api/auth/resend-verification",
            post(auth::resend_verification),
        )
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(state: ServerState, bind: &str) {
    let listener = match tokio::net::TcpListener::bind(bind).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {bind}: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(state, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let pruner = tokens::spawn_pruner(state.tokens.clone(), TOKEN_PRUNE_INTERVAL);
    let result = axum::serve(listener, router(state)).await;
    pruner.abort();
    result
}

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::Engine;
use migration::MigratorTrait;
use server::{
    ServerConfig, ServerState,
    identity::{IdentityError, IdentityProvider, ProviderSession, ProviderUser, SignupProfile},
    notify::{Notifier, NotifyError},
    router,
    tokens::MemoryTokenStore,
};

const APP_URL: &str = "http://app.test";

#[derive(Clone)]
struct Account {
    id: String,
    password: String,
    confirmed: bool,
}

/// In-memory provider: access tokens are `token-<email>`, refresh tokens
/// `refresh-<email>`.
#[derive(Default)]
struct FakeIdentity {
    accounts: Mutex<HashMap<String, Account>>,
    /// While set, account changes fail as if the provider were down.
    unavailable: AtomicBool,
}

impl FakeIdentity {
    fn add(&self, email: &str, password: &str, confirmed: bool) {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                id: format!("ext-{email}"),
                password: password.to_string(),
                confirmed,
            },
        );
    }

    fn user(email: &str, account: &Account) -> ProviderUser {
        ProviderUser {
            id: account.id.clone(),
            email: email.to_string(),
            email_confirmed: account.confirmed,
            first_name: None,
            last_name: None,
            photo_url: None,
        }
    }

    fn session(email: &str) -> ProviderSession {
        ProviderSession {
            access_token: format!("token-{email}"),
            refresh_token: format!("refresh-{email}"),
            expires_in: Some(3600),
            token_type: "bearer".to_string(),
        }
    }

    fn by_id(&self, user_id: &str, f: impl FnOnce(&mut Account)) -> Result<(), IdentityError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(IdentityError::Unavailable("connection refused".to_string()));
        }
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .values_mut()
            .find(|account| account.id == user_id)
            .ok_or_else(|| IdentityError::Rejected("User not found".to_string()))?;
        f(account);
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify_token(&self, access_token: &str) -> Result<ProviderUser, IdentityError> {
        let email = access_token
            .strip_prefix("token-")
            .ok_or_else(|| IdentityError::Rejected("invalid JWT".to_string()))?;
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(email)
            .ok_or_else(|| IdentityError::Rejected("invalid JWT".to_string()))?;
        Ok(Self::user(email, account))
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _profile: &SignupProfile,
    ) -> Result<ProviderUser, IdentityError> {
        if self.accounts.lock().unwrap().contains_key(email) {
            return Err(IdentityError::Rejected("User already registered".to_string()));
        }
        self.add(email, password, false);
        let accounts = self.accounts.lock().unwrap();
        Ok(Self::user(email, &accounts[email]))
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(ProviderUser, ProviderSession), IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts
            .get(email)
            .filter(|account| account.password == password)
            .ok_or_else(|| IdentityError::Rejected("Invalid login credentials".to_string()))?;
        if !account.confirmed {
            return Err(IdentityError::EmailNotConfirmed);
        }
        Ok((Self::user(email, account), Self::session(email)))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError> {
        refresh_token
            .strip_prefix("refresh-")
            .filter(|email| self.accounts.lock().unwrap().contains_key(*email))
            .map(Self::session)
            .ok_or_else(|| IdentityError::Rejected("Invalid Refresh Token".to_string()))
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), IdentityError> {
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<ProviderUser>, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(email).map(|account| Self::user(email, account)))
    }

    async fn set_password(&self, user_id: &str, password: &str) -> Result<(), IdentityError> {
        self.by_id(user_id, |account| account.password = password.to_string())
    }

    async fn confirm_email(&self, user_id: &str) -> Result<(), IdentityError> {
        self.by_id(user_id, |account| account.confirmed = true)
    }

    async fn update_photo(&self, user_id: &str, _photo_url: &str) -> Result<(), IdentityError> {
        self.by_id(user_id, |_| {})
    }
}

#[derive(Default)]
struct CapturingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl CapturingNotifier {
    /// Token carried by the last link sent to `email`.
    fn last_token(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .and_then(|(_, link)| link.split_once("token=").map(|(_, t)| t.to_string()))
    }
}

#[async_trait]
impl Notifier for CapturingNotifier {
    async fn send_verification(&self, email: &str, link: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), link.to_string()));
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, link: &str) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), link.to_string()));
        Ok(())
    }

    async fn send_invitation(
        &self,
        email: &str,
        _canvas_name: &str,
        link: &str,
    ) -> Result<(), NotifyError> {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_string(), link.to_string()));
        Ok(())
    }
}

struct TestApp {
    app: Router,
    identity: Arc<FakeIdentity>,
    notifier: Arc<CapturingNotifier>,
}

async fn test_app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    let identity = Arc::new(FakeIdentity::default());
    let notifier = Arc::new(CapturingNotifier::default());
    let state = ServerState {
        engine: Arc::new(engine),
        db,
        identity: identity.clone(),
        tokens: Arc::new(MemoryTokenStore::default()),
        notifier: notifier.clone(),
        config: Arc::new(ServerConfig {
            app_url: APP_URL.to_string(),
            bypass_user_id: None,
        }),
    };

    TestApp {
        app: router(state),
        identity,
        notifier,
    }
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn bearer(email: &str) -> String {
    format!("Bearer token-{email}")
}

async fn create_canvas(app: &Router, owner: &str, name: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/canvases",
        Some(&bearer(owner)),
        Some(json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["canvas"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_check_reports_ok() {
    let t = test_app().await;
    let (status, body) = send(&t.app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], json!(true));
}

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let t = test_app().await;

    let (status, body) = send(&t.app, Method::GET, "/api/canvases", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");

    let (status, body) = send(
        &t.app,
        Method::GET,
        "/api/canvases",
        Some("Bearer nonsense"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");

    let (status, body) = send(
        &t.app,
        Method::GET,
        "/api/canvases",
        Some("Basic dXNlcjpwYXNz"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn wallets_become_visible_once_the_user_is_added_as_member() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    t.identity.add("bob@example.com", "password-b", true);

    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;
    let wallets_uri = format!("/api/canvases/{canvas_id}/wallets");

    let (status, _) = send(
        &t.app,
        Method::GET,
        &wallets_uri,
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &t.app,
        Method::POST,
        &format!("/api/canvases/{canvas_id}/members"),
        Some(&bearer("alice@example.com")),
        Some(json!({ "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = send(
        &t.app,
        Method::GET,
        &wallets_uri,
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "wallets": [] }));
}

#[tokio::test]
async fn missing_canvas_is_404_and_foreign_canvas_is_403() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    t.identity.add("bob@example.com", "password-b", true);
    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;

    let (status, _) = send(
        &t.app,
        Method::GET,
        "/api/canvases/999999",
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &t.app,
        Method::GET,
        &format!("/api/canvases/{canvas_id}"),
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn non_numeric_ids_are_rejected() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);

    let (status, body) = send(
        &t.app,
        Method::GET,
        "/api/wallets/abc",
        Some(&bearer("alice@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid wallet ID");
}

#[tokio::test]
async fn expense_creation_names_missing_fields() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;

    let (status, body) = send(
        &t.app,
        Method::POST,
        &format!("/api/canvases/{canvas_id}/expenses"),
        Some(&bearer("alice@example.com")),
        Some(json!({ "name": "Rent" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: expenseCategoryId, currencyId"
    );
}

#[tokio::test]
async fn signup_requires_email_verification_before_login() {
    let t = test_app().await;
    let credentials = json!({ "email": "carol@example.com", "password": "long-enough" });

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "email": "carol@example.com",
            "password": "long-enough",
            "firstName": "Carol",
            "lastName": "Doe",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["user"]["email"], "carol@example.com");
    assert_eq!(body["user"]["emailVerified"], json!(false));

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(credentials.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Email not verified");

    let token = t.notifier.last_token("carol@example.com").unwrap();
    let verify_uri = format!("/api/auth/verify-email?token={token}");
    let (status, _) = send(&t.app, Method::GET, &verify_uri, None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&t.app, Method::GET, &verify_uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(credentials),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["emailVerified"], json!(true));
    assert_eq!(
        body["session"]["accessToken"],
        json!("token-carol@example.com")
    );
}

#[tokio::test]
async fn short_passwords_fail_signup() {
    let t = test_app().await;
    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/signup",
        None,
        Some(json!({
            "email": "dan@example.com",
            "password": "short",
            "firstName": "Dan",
            "lastName": "Roe",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_reset_tokens_work_once() {
    let t = test_app().await;
    t.identity.add("erin@example.com", "old-password", true);

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "nobody@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(t.notifier.last_token("nobody@example.com").is_none());

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "erin@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = t.notifier.last_token("erin@example.com").unwrap();

    let reset = json!({ "token": token, "password": "new-password" });
    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/reset-password",
        None,
        Some(reset.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/auth/reset-password",
        None,
        Some(reset),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or expired reset token");

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "erin@example.com", "password": "old-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "erin@example.com", "password": "new-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn settings_are_created_on_first_read() {
    let t = test_app().await;
    t.identity.add("frank@example.com", "password-f", true);

    let (status, body) = send(
        &t.app,
        Method::GET,
        "/api/auth/settings",
        Some(&bearer("frank@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["settings"]["timezone"], "UTC");

    let (status, body) = send(
        &t.app,
        Method::PUT,
        "/api/auth/settings",
        Some(&bearer("frank@example.com")),
        Some(json!({ "theme": "dark" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["settings"]["theme"], "dark");
    assert_eq!(body["settings"]["timezone"], "UTC");
}

#[tokio::test]
async fn malformed_bodies_and_queries_answer_a_json_400() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;

    let (status, body) = send(
        &t.app,
        Method::POST,
        &format!("/api/canvases/{canvas_id}/expenses"),
        Some(&bearer("alice@example.com")),
        Some(json!({ "expenseCategoryId": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/canvases")
        .header(header::AUTHORIZATION, bearer("alice@example.com"))
        .body(Body::from(json!({ "name": "Plain" }).to_string()))
        .unwrap();
    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string(), "{body}");

    let (status, body) = send(
        &t.app,
        Method::GET,
        "/api/canvases?archived=maybe",
        Some(&bearer("alice@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn reset_token_survives_a_provider_failure() {
    let t = test_app().await;
    t.identity.add("gina@example.com", "old-password", true);

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/forgot-password",
        None,
        Some(json!({ "email": "gina@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = t.notifier.last_token("gina@example.com").unwrap();
    let reset = json!({ "token": token, "password": "new-password" });

    t.identity.unavailable.store(true, Ordering::SeqCst);
    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/reset-password",
        None,
        Some(reset.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    t.identity.unavailable.store(false, Ordering::SeqCst);
    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/auth/reset-password",
        None,
        Some(reset.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/auth/reset-password",
        None,
        Some(reset),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invitations_make_the_invitee_a_member() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    t.identity.add("bob@example.com", "password-b", true);
    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;
    let invitations_uri = format!("/api/canvases/{canvas_id}/invitations");

    let (status, body) = send(
        &t.app,
        Method::POST,
        &invitations_uri,
        Some(&bearer("alice@example.com")),
        Some(json!({ "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["invitation"]["status"], "pending");
    let token = body["invitation"]["token"].as_str().unwrap().to_string();
    assert_eq!(t.notifier.last_token("bob@example.com"), Some(token.clone()));

    let (status, _) = send(
        &t.app,
        Method::GET,
        &invitations_uri,
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/invitations/accept",
        Some(&bearer("bob@example.com")),
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["member"]["canvasId"], json!(canvas_id));
    assert_eq!(body["member"]["isOwner"], json!(false));

    let (status, _) = send(
        &t.app,
        Method::GET,
        &format!("/api/canvases/{canvas_id}/wallets"),
        Some(&bearer("bob@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &t.app,
        Method::GET,
        &invitations_uri,
        Some(&bearer("alice@example.com")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["invitations"][0]["status"], "accepted");
    assert!(body["invitations"][0].get("token").is_none());

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/invitations/accept",
        Some(&bearer("bob@example.com")),
        Some(json!({ "token": token })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn income_forecasts_are_created_under_a_resource() {
    let t = test_app().await;
    t.identity.add("alice@example.com", "password-a", true);
    let alice = bearer("alice@example.com");
    let canvas_id = create_canvas(&t.app, "alice@example.com", "Home").await;

    let (_, body) = send(&t.app, Method::GET, "/api/income/categories", Some(&alice), None).await;
    let salary = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|category| category["name"] == "Salary")
        .unwrap()["id"]
        .clone();
    let (_, body) = send(
        &t.app,
        Method::GET,
        &format!("/api/canvases/{canvas_id}/value-categories"),
        Some(&alice),
        None,
    )
    .await;
    let cash = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .find(|category| category["name"] == "Cash")
        .unwrap()["id"]
        .clone();
    let (status, body) = send(
        &t.app,
        Method::POST,
        &format!("/api/canvases/{canvas_id}/income-resources"),
        Some(&alice),
        Some(json!({
            "name": "Salary",
            "incomeResourceCategoryId": salary,
            "defaultValueCategoryId": cash,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let resource_id = body["incomeResource"]["id"].as_i64().unwrap();
    let forecasts_uri = format!("/api/income/resources/{resource_id}/forecasts");

    let (status, body) = send(
        &t.app,
        Method::POST,
        &forecasts_uri,
        Some(&alice),
        Some(json!({ "periodStart": "2026-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Missing required fields: periodEnd, forecastedAmount"
    );

    let (status, body) = send(
        &t.app,
        Method::POST,
        &forecasts_uri,
        Some(&alice),
        Some(json!({
            "periodType": "monthly",
            "periodStart": "2026-01-01",
            "periodEnd": "2026-01-31",
            "forecastedAmount": "3000",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["forecast"]["periodEnd"], "2026-01-31");

    let (status, body) = send(&t.app, Method::GET, &forecasts_uri, Some(&alice), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["forecasts"].as_array().unwrap().len(), 1);
}

//! External identity provider.
//!
//! Passwords and access tokens never touch the database: the provider owns
//! them, and the server mirrors each provider account into a `users` row
//! keyed by the provider's subject id. [`GoTrueProvider`] talks to a GoTrue
//! compatible REST API (`/auth/v1/...`).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use engine::UserIdentity;

#[derive(Debug, Error)]
pub enum IdentityError {
    /// Bad credentials, unknown or expired token, or a refused request.
    #[error("{0}")]
    Rejected(String),
    #[error("email not confirmed")]
    EmailNotConfirmed,
    #[error("{0}")]
    Unavailable(String),
}

/// An account as the provider reports it.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
    pub email_confirmed: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
}

impl ProviderUser {
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            external_id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email_verified: self.email_confirmed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: Option<i64>,
    pub token_type: String,
}

#[derive(Clone, Debug)]
pub struct SignupProfile {
    pub first_name: String,
    pub last_name: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token to the account it was issued for.
    async fn verify_token(&self, access_token: &str) -> Result<ProviderUser, IdentityError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &SignupProfile,
    ) -> Result<ProviderUser, IdentityError>;

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(ProviderUser, ProviderSession), IdentityError>;

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<ProviderUser>, IdentityError>;

    async fn set_password(&self, user_id: &str, password: &str) -> Result<(), IdentityError>;

    async fn confirm_email(&self, user_id: &str) -> Result<(), IdentityError>;

    async fn update_photo(&self, user_id: &str, photo_url: &str) -> Result<(), IdentityError>;
}

const ADMIN_PAGE_SIZE: usize = 200;

/// [`IdentityProvider`] backed by a GoTrue server (e.g. Supabase auth).
#[derive(Clone, Debug)]
pub struct GoTrueProvider {
    client: Client,
    base_url: String,
    api_key: String,
    service_key: String,
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueMetadata {
    first_name: Option<String>,
    last_name: Option<String>,
    photo_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_confirmed_at: Option<String>,
    #[serde(default)]
    user_metadata: Option<GoTrueMetadata>,
}

impl From<GoTrueUser> for ProviderUser {
    fn from(value: GoTrueUser) -> Self {
        let metadata = value.user_metadata.unwrap_or_default();
        Self {
            id: value.id,
            email: value.email.unwrap_or_default(),
            email_confirmed: value.email_confirmed_at.is_some(),
            first_name: metadata.first_name,
            last_name: metadata.last_name,
            photo_url: metadata.photo_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    user: Option<GoTrueUser>,
}

impl GoTrueSession {
    fn split(self) -> (Option<GoTrueUser>, ProviderSession) {
        let session = ProviderSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_in: self.expires_in,
            token_type: self.token_type.unwrap_or_else(|| "bearer".to_string()),
        };
        (self.user, session)
    }
}

#[derive(Debug, Deserialize)]
struct GoTrueUserPage {
    #[serde(default)]
    users: Vec<GoTrueUser>,
}

#[derive(Debug, Default, Deserialize)]
struct GoTrueError {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

impl GoTrueError {
    fn text(&self) -> Option<String> {
        self.msg
            .clone()
            .or_else(|| self.message.clone())
            .or_else(|| self.error_description.clone())
            .or_else(|| self.error.clone())
    }
}

impl GoTrueProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        service_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            service_key: service_key.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.base_url)
    }

    fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.service_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, IdentityError> {
        let response = request
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|err| IdentityError::Unavailable(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: GoTrueError = response.json().await.unwrap_or_default();
        let message = body.text().unwrap_or_else(|| status.to_string());
        if body.error_code.as_deref() == Some("email_not_confirmed")
            || message.to_lowercase().contains("email not confirmed")
        {
            return Err(IdentityError::EmailNotConfirmed);
        }
        if status.is_client_error() {
            Err(IdentityError::Rejected(message))
        } else {
            Err(IdentityError::Unavailable(format!("{status}: {message}")))
        }
    }

    async fn json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, IdentityError> {
        response
            .json()
            .await
            .map_err(|err| IdentityError::Unavailable(format!("malformed response: {err}")))
    }

    async fn update_user(&self, user_id: &str, body: Value) -> Result<(), IdentityError> {
        let request = self
            .client
            .put(self.url(&format!("/admin/users/{user_id}")))
            .json(&body);
        self.send(self.admin(request)).await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for GoTrueProvider {
    async fn verify_token(&self, access_token: &str) -> Result<ProviderUser, IdentityError> {
        let request = self.client.get(self.url("/user")).bearer_auth(access_token);
        let user: GoTrueUser = Self::json(self.send(request).await?).await?;
        Ok(user.into())
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: &SignupProfile,
    ) -> Result<ProviderUser, IdentityError> {
        let request = self.client.post(self.url("/signup")).json(&json!({
            "email": email,
            "password": password,
            "data": {
                "first_name": profile.first_name,
                "last_name": profile.last_name,
            },
        }));
        // With auto-confirm the provider answers with a session wrapping the user.
        let body: Value = Self::json(self.send(request).await?).await?;
        let user = match body {
            Value::Object(mut map) if map.get("user").is_some_and(Value::is_object) => {
                map.remove("user").unwrap_or_default()
            }
            other => other,
        };
        let user: GoTrueUser = serde_json::from_value(user)
            .map_err(|err| IdentityError::Unavailable(format!("malformed response: {err}")))?;
        Ok(user.into())
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(ProviderUser, ProviderSession), IdentityError> {
        let request = self
            .client
            .post(self.url("/token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));
        let session: GoTrueSession = Self::json(self.send(request).await?).await?;
        let (user, session) = session.split();
        let user = user.ok_or_else(|| {
            IdentityError::Unavailable("session without user".to_string())
        })?;
        Ok((user.into(), session))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, IdentityError> {
        let request = self
            .client
            .post(self.url("/token?grant_type=refresh_token"))
            .json(&json!({ "refresh_token": refresh_token }));
        let session: GoTrueSession = Self::json(self.send(request).await?).await?;
        Ok(session.split().1)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), IdentityError> {
        let request = self.client.post(self.url("/logout")).bearer_auth(access_token);
        self.send(request).await?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<ProviderUser>, IdentityError> {
        let wanted = email.trim().to_lowercase();
        let mut page = 1;
        loop {
            let request = self.client.get(self.url("/admin/users")).query(&[
                ("page", page.to_string()),
                ("per_page", ADMIN_PAGE_SIZE.to_string()),
            ]);
            let batch: GoTrueUserPage = Self::json(self.send(self.admin(request)).await?).await?;
            let fetched = batch.users.len();
            if let Some(user) = batch.users.into_iter().find(|user| {
                user.email
                    .as_deref()
                    .is_some_and(|email| email.to_lowercase() == wanted)
            }) {
                return Ok(Some(user.into()));
            }
            if fetched < ADMIN_PAGE_SIZE {
                return Ok(None);
            }
            page += 1;
        }
    }

    async fn set_password(&self, user_id: &str, password: &str) -> Result<(), IdentityError> {
        self.update_user(user_id, json!({ "password": password }))
            .await
    }

    async fn confirm_email(&self, user_id: &str) -> Result<(), IdentityError> {
        self.update_user(user_id, json!({ "email_confirm": true }))
            .await
    }

    async fn update_photo(&self, user_id: &str, photo_url: &str) -> Result<(), IdentityError> {
        self.update_user(user_id, json!({ "user_metadata": { "photo_url": photo_url } }))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gotrue_user_maps_metadata_and_confirmation() {
        let user: GoTrueUser = serde_json::from_value(json!({
            "id": "3f1c",
            "email": "ana@example.com",
            "email_confirmed_at": "2026-01-02T10:00:00Z",
            "user_metadata": { "first_name": "Ana", "photo_url": "https://img/ana.png" },
        }))
        .unwrap();
        let user = ProviderUser::from(user);
        assert!(user.email_confirmed);
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert_eq!(user.last_name, None);

        let identity = user.identity();
        assert_eq!(identity.external_id, "3f1c");
        assert!(identity.email_verified);
    }

    #[test]
    fn unconfirmed_user_without_metadata() {
        let user: GoTrueUser =
            serde_json::from_value(json!({ "id": "9", "email": "x@example.com" })).unwrap();
        let user = ProviderUser::from(user);
        assert!(!user.email_confirmed);
        assert_eq!(user.photo_url, None);
    }

    #[test]
    fn error_text_prefers_msg_then_description() {
        let err: GoTrueError = serde_json::from_value(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials",
        }))
        .unwrap();
        assert_eq!(err.text().as_deref(), Some("Invalid login credentials"));

        let err: GoTrueError =
            serde_json::from_value(json!({ "msg": "User already registered", "code": 422 }))
                .unwrap();
        assert_eq!(err.text().as_deref(), Some("User already registered"));
    }

    #[test]
    fn provider_url_is_normalized() {
        let provider = GoTrueProvider::new("https://auth.example.com/", "anon", "service");
        assert_eq!(provider.url("/user"), "https://auth.example.com/auth/v1/user");
    }
}

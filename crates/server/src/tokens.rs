//! One-shot tokens for email verification and password reset.

use std::{collections::HashMap, sync::Arc, time::Duration as StdDuration};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    Verification,
    PasswordReset,
}

impl TokenKind {
    pub fn default_ttl(self) -> Duration {
        match self {
            TokenKind::Verification => Duration::hours(24),
            TokenKind::PasswordReset => Duration::hours(1),
        }
    }
}

/// The provider account a token was issued for.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenGrant {
    pub user_id: String,
    pub email: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum RedeemError {
    #[error("unknown token")]
    Unknown,
    #[error("expired token")]
    Expired,
}

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn issue(&self, kind: TokenKind, grant: TokenGrant) -> String;

    /// Look a token up without consuming it.
    async fn peek(&self, kind: TokenKind, token: &str) -> Result<TokenGrant, RedeemError>;

    /// Consume a token. A token can be redeemed once.
    async fn redeem(&self, kind: TokenKind, token: &str) -> Result<TokenGrant, RedeemError>;

    /// Drop expired entries, returning how many were removed.
    async fn prune(&self) -> usize;
}

#[derive(Debug)]
struct Entry {
    grant: TokenGrant,
    expires_at: DateTime<Utc>,
}

/// Process-local [`TokenStore`]; tokens do not survive a restart.
#[derive(Debug)]
pub struct MemoryTokenStore {
    verification_ttl: Duration,
    reset_ttl: Duration,
    entries: Mutex<HashMap<(TokenKind, String), Entry>>,
}

impl Default for MemoryTokenStore {
    fn default() -> Self {
        Self::with_ttl(
            TokenKind::Verification.default_ttl(),
            TokenKind::PasswordReset.default_ttl(),
        )
    }
}

impl MemoryTokenStore {
    pub fn with_ttl(verification_ttl: Duration, reset_ttl: Duration) -> Self {
        Self {
            verification_ttl,
            reset_ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Verification => self.verification_ttl,
            TokenKind::PasswordReset => self.reset_ttl,
        }
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn issue(&self, kind: TokenKind, grant: TokenGrant) -> String {
        let token = Uuid::new_v4().to_string();
        let entry = Entry {
            grant,
            expires_at: Utc::now() + self.ttl(kind),
        };
        self.entries.lock().await.insert((kind, token.clone()), entry);
        token
    }

    async fn peek(&self, kind: TokenKind, token: &str) -> Result<TokenGrant, RedeemError> {
        let entries = self.entries.lock().await;
        let entry = entries
            .get(&(kind, token.to_string()))
            .ok_or(RedeemError::Unknown)?;
        if entry.expires_at <= Utc::now() {
            return Err(RedeemError::Expired);
        }
        Ok(entry.grant.clone())
    }

    async fn redeem(&self, kind: TokenKind, token: &str) -> Result<TokenGrant, RedeemError> {
        let entry = self
            .entries
            .lock()
            .await
            .remove(&(kind, token.to_string()))
            .ok_or(RedeemError::Unknown)?;
        if entry.expires_at <= Utc::now() {
            return Err(RedeemError::Expired);
        }
        Ok(entry.grant)
    }

    async fn prune(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }
}

/// Prune `store` every `every` until the runtime shuts down.
pub fn spawn_pruner(store: Arc<dyn TokenStore>, every: StdDuration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = store.prune().await;
            if removed > 0 {
                tracing::debug!("pruned {removed} expired tokens");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grant() -> TokenGrant {
        TokenGrant {
            user_id: "sub-1".to_string(),
            email: "ana@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn tokens_redeem_once() {
        let store = MemoryTokenStore::default();
        let token = store.issue(TokenKind::Verification, grant()).await;

        assert_eq!(store.redeem(TokenKind::Verification, &token).await, Ok(grant()));
        assert_eq!(
            store.redeem(TokenKind::Verification, &token).await,
            Err(RedeemError::Unknown)
        );
    }

    #[tokio::test]
    async fn peeking_leaves_the_token_redeemable() {
        let store = MemoryTokenStore::default();
        let token = store.issue(TokenKind::PasswordReset, grant()).await;

        assert_eq!(store.peek(TokenKind::PasswordReset, &token).await, Ok(grant()));
        assert_eq!(store.peek(TokenKind::PasswordReset, &token).await, Ok(grant()));
        assert_eq!(store.redeem(TokenKind::PasswordReset, &token).await, Ok(grant()));
        assert_eq!(
            store.peek(TokenKind::PasswordReset, &token).await,
            Err(RedeemError::Unknown)
        );
    }

    #[tokio::test]
    async fn tokens_are_bound_to_their_kind() {
        let store = MemoryTokenStore::default();
        let token = store.issue(TokenKind::PasswordReset, grant()).await;

        assert_eq!(
            store.redeem(TokenKind::Verification, &token).await,
            Err(RedeemError::Unknown)
        );
        assert!(store.redeem(TokenKind::PasswordReset, &token).await.is_ok());
    }

    #[tokio::test]
    async fn expired_tokens_are_rejected_and_pruned() {
        let store = MemoryTokenStore::with_ttl(Duration::hours(24), Duration::seconds(-1));
        let stale = store.issue(TokenKind::PasswordReset, grant()).await;
        store.issue(TokenKind::PasswordReset, grant()).await;
        let fresh = store.issue(TokenKind::Verification, grant()).await;

        assert_eq!(
            store.redeem(TokenKind::PasswordReset, &stale).await,
            Err(RedeemError::Expired)
        );
        assert_eq!(store.prune().await, 1);
        assert!(store.redeem(TokenKind::Verification, &fresh).await.is_ok());
    }

    #[test]
    fn default_lifetimes() {
        assert_eq!(TokenKind::Verification.default_ttl(), Duration::hours(24));
        assert_eq!(TokenKind::PasswordReset.default_ttl(), Duration::hours(1));
    }
}

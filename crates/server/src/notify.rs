//! Delivery of account links (verification, password reset) and canvas
//! invitations.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("notification failed: {0}")]
pub struct NotifyError(pub String);

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_verification(&self, email: &str, link: &str) -> Result<(), NotifyError>;

    async fn send_password_reset(&self, email: &str, link: &str) -> Result<(), NotifyError>;

    async fn send_invitation(
        &self,
        email: &str,
        canvas_name: &str,
        link: &str,
    ) -> Result<(), NotifyError>;
}

/// Writes links to the log instead of sending mail.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_verification(&self, email: &str, link: &str) -> Result<(), NotifyError> {
        tracing::info!(%email, %link, "verification link issued");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, link: &str) -> Result<(), NotifyError> {
        tracing::info!(%email, %link, "password reset link issued");
        Ok(())
    }

    async fn send_invitation(
        &self,
        email: &str,
        canvas_name: &str,
        link: &str,
    ) -> Result<(), NotifyError> {
        tracing::info!(%email, canvas = %canvas_name, %link, "canvas invitation issued");
        Ok(())
    }
}

//! Email background job.
//!
//! Provides email sending functionality via background jobs.
//! In development mode, emails are logged. In production, configure
//! SMTP settings via environment variables.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;

use apalis_sql::postgres::PostgresStorage;

use crate::errors::{AppError, AppResult};

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text or HTML)
    pub body: String,
    /// Optional sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    /// Create a new email job
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Subscription confirmation message with the single-use token link.
    pub fn subscription_confirmation(to: impl Into<String>, confirm_url: &str) -> Self {
        Self::new(
            to,
            "Confirm your newsletter subscription",
            format!(
                "Thanks for subscribing to the club newsletter!\n\n\
                 Please confirm your subscription by opening this link:\n{}\n\n\
                 If you did not request this, you can ignore this message.",
                confirm_url
            ),
        )
    }

    /// Password reset request message.
    pub fn password_reset(to: impl Into<String>, reset_url: &str) -> Self {
        Self::new(
            to,
            "Reset your password",
            format!(
                "A password reset was requested for your account.\n\n\
                 Open this link to choose a new password:\n{}\n\n\
                 The link expires in one hour.",
                reset_url
            ),
        )
    }
}

/// Outbound mail dispatch used by the subscription and auth flows.
/// Fire-and-forget: callers log failures instead of failing the command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, job: EmailJob) -> AppResult<()>;
}

/// Mailer that enqueues onto the apalis Postgres queue, drained by the
/// `jobs work` command.
pub struct QueueMailer {
    storage: PostgresStorage<EmailJob>,
}

impl QueueMailer {
    pub fn new(storage: PostgresStorage<EmailJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Mailer for QueueMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        use apalis::prelude::*;

        let mut storage = self.storage.clone();
        storage
            .push(job)
            .await
            .map_err(|e| AppError::unavailable(format!("Failed to enqueue email: {}", e)))?;

        Ok(())
    }
}

/// Email configuration from environment.
/// Note: Some fields are currently unused pending lettre integration.
#[allow(dead_code)]
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_port: u16,
    smtp_user: Option<String>,
    smtp_pass: Option<String>,
    smtp_from: String,
    smtp_tls: bool,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
            smtp_tls: env::var("SMTP_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();
    let from = job.from.as_deref().unwrap_or(&config.smtp_from);

    tracing::info!(
        to = %job.to,
        from = %from,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // Production mode would send via SMTP (lettre); not wired up yet.
    tracing::warn!(
        "SMTP is configured but no transport is installed. \
         Add lettre to Cargo.toml to enable real email sending."
    );

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    tracing::info!(to = %job.to, "Email processed successfully");
    Ok(())
}

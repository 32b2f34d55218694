//! Subscription gateway: token-based double opt-in.
//!
//! Subscribing issues a fresh single-use confirmation token; subscribing
//! again before confirming rotates it, so the older link stops working.
//! Confirmation clears the token and is idempotent for an already
//! confirmed subscriber.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::domain::{SubscribeRequest, Subscriber};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::SubscriberRepository;
use crate::jobs::{EmailJob, Mailer};

/// Result of a confirmation call.
#[derive(Debug, Clone)]
pub struct ConfirmOutcome {
    pub subscriber: Subscriber,
    /// True when the token had already been used up by a prior call.
    pub already_confirmed: bool,
}

/// Subscription service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    /// Subscribe an email. Confirmed subscribers are rejected with a
    /// conflict; unconfirmed ones have their details refreshed and their
    /// token rotated. A confirmation message is dispatched fire-and-forget.
    async fn subscribe(&self, request: SubscribeRequest) -> AppResult<Subscriber>;

    /// Redeem a confirmation token.
    async fn confirm(&self, token: &str) -> AppResult<ConfirmOutcome>;
}

/// Concrete implementation of `SubscriptionService`.
pub struct SubscriptionGateway {
    subscribers: Arc<dyn SubscriberRepository>,
    mailer: Arc<dyn Mailer>,
    config: Config,
}

impl SubscriptionGateway {
    pub fn new(
        subscribers: Arc<dyn SubscriberRepository>,
        mailer: Arc<dyn Mailer>,
        config: Config,
    ) -> Self {
        Self {
            subscribers,
            mailer,
            config,
        }
    }

    async fn dispatch_confirmation(&self, email: &str, token: &str) {
        let confirm_url = format!(
            "{}/confirm-subscription?token={}",
            self.config.site_url, token
        );
        let job = EmailJob::subscription_confirmation(email, &confirm_url);

        // Fire-and-forget: a queue hiccup must not fail the subscription
        if let Err(e) = self.mailer.send(job).await {
            tracing::warn!(error = %e, "Failed to enqueue confirmation email");
        }
    }
}

#[async_trait]
impl SubscriptionService for SubscriptionGateway {
    async fn subscribe(&self, request: SubscribeRequest) -> AppResult<Subscriber> {
        request
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let confirm_token = Uuid::new_v4().to_string();

        let subscriber = match self.subscribers.find_by_email(&request.email).await? {
            Some(existing) if existing.confirmed => {
                return Err(AppError::conflict(
                    "Email already subscribed and confirmed",
                ));
            }
            Some(existing) => {
                // Unconfirmed re-subscribe: update details, rotate token
                self.subscribers
                    .refresh(existing.id, request, confirm_token.clone())
                    .await?
            }
            None => {
                self.subscribers
                    .create(request, confirm_token.clone())
                    .await?
            }
        };

        self.dispatch_confirmation(&subscriber.email, &confirm_token)
            .await;

        tracing::info!(subscriber = %subscriber.id, "Subscription created or refreshed");

        Ok(subscriber)
    }

    async fn confirm(&self, token: &str) -> AppResult<ConfirmOutcome> {
        if token.is_empty() {
            return Err(AppError::InvalidToken);
        }

        let subscriber = self
            .subscribers
            .find_by_token(token)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if subscriber.confirmed {
            return Ok(ConfirmOutcome {
                subscriber,
                already_confirmed: true,
            });
        }

        let subscriber = self.subscribers.confirm(subscriber.id).await?;

        tracing::info!(subscriber = %subscriber.id, "Subscription confirmed");

        Ok(ConfirmOutcome {
            subscriber,
            already_confirmed: false,
        })
    }
}

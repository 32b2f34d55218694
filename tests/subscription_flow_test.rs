//! Subscription double-opt-in flow tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use chronicle::config::Config;
use chronicle::domain::{SubscribeRequest, Subscriber};
use chronicle::errors::{AppError, AppResult};
use chronicle::infra::repositories::SubscriberRepository;
use chronicle::jobs::{EmailJob, Mailer};
use chronicle::services::{SubscriptionGateway, SubscriptionService};

#[derive(Default)]
struct InMemorySubscribers {
    rows: Mutex<Vec<Subscriber>>,
}

#[async_trait]
impl SubscriberRepository for InMemorySubscribers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.email == email)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Subscriber>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.confirm_token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(
        &self,
        request: SubscribeRequest,
        confirm_token: String,
    ) -> AppResult<Subscriber> {
        let subscriber = Subscriber {
            id: Uuid::new_v4(),
            email: request.email,
            name: request.name,
            phone: request.phone,
            department: request.department,
            semester: request.semester,
            confirmed: false,
            confirm_token: Some(confirm_token),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(subscriber.clone());
        Ok(subscriber)
    }

    async fn refresh(
        &self,
        id: Uuid,
        request: SubscribeRequest,
        confirm_token: String,
    ) -> AppResult<Subscriber> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;
        row.name = request.name;
        row.phone = request.phone;
        row.department = request.department;
        row.semester = request.semester;
        row.confirm_token = Some(confirm_token);
        Ok(row.clone())
    }

    async fn confirm(&self, id: Uuid) -> AppResult<Subscriber> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(AppError::NotFound)?;
        row.confirmed = true;
        row.confirm_token = None;
        Ok(row.clone())
    }
}

/// Mailer fake that records what would have been sent.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<EmailJob>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, job: EmailJob) -> AppResult<()> {
        self.sent.lock().unwrap().push(job);
        Ok(())
    }
}

fn config() -> Config {
    std::env::set_var("JWT_SECRET", "test-secret-key-minimum-32-chars!!!!");
    Config::from_env()
}

fn request(email: &str) -> SubscribeRequest {
    SubscribeRequest {
        email: email.to_string(),
        name: "A. Student".to_string(),
        phone: "1234567890".to_string(),
        department: "Computer Engineering".to_string(),
        semester: Some(4),
    }
}

struct Harness {
    service: SubscriptionGateway,
    subscribers: Arc<InMemorySubscribers>,
    mailer: Arc<RecordingMailer>,
}

fn harness() -> Harness {
    let subscribers = Arc::new(InMemorySubscribers::default());
    let mailer = Arc::new(RecordingMailer::default());
    let service = SubscriptionGateway::new(subscribers.clone(), mailer.clone(), config());

    Harness {
        service,
        subscribers,
        mailer,
    }
}

#[tokio::test]
async fn subscribe_then_confirm_round_trip() {
    let h = harness();

    h.service.subscribe(request("a@x.com")).await.unwrap();

    let stored = h
        .subscribers
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.confirmed);
    let token = stored.confirm_token.clone().unwrap();

    // The confirmation mail embeds the token link
    let sent = h.mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].body.contains(&token));

    let outcome = h.service.confirm(&token).await.unwrap();
    assert!(!outcome.already_confirmed);
    assert!(outcome.subscriber.confirmed);

    // Token is single-use: it was cleared on confirmation
    let stored = h
        .subscribers
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.confirm_token.is_none());
}

#[tokio::test]
async fn resubscribe_invalidates_previous_token() {
    let h = harness();

    h.service.subscribe(request("a@x.com")).await.unwrap();
    let old_token = h
        .subscribers
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .confirm_token
        .unwrap();

    h.service.subscribe(request("a@x.com")).await.unwrap();

    // Old link stopped working; the fresh one confirms
    let result = h.service.confirm(&old_token).await;
    assert!(matches!(result.unwrap_err(), AppError::InvalidToken));

    let new_token = h
        .subscribers
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .confirm_token
        .unwrap();
    assert_ne!(new_token, old_token);
    assert!(h.service.confirm(&new_token).await.is_ok());
}

#[tokio::test]
async fn confirmed_email_is_rejected_with_conflict() {
    let h = harness();

    h.service.subscribe(request("a@x.com")).await.unwrap();
    let token = h
        .subscribers
        .find_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap()
        .confirm_token
        .unwrap();
    h.service.confirm(&token).await.unwrap();

    let result = h.service.subscribe(request("a@x.com")).await;
    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn unknown_or_empty_token_is_invalid() {
    let h = harness();

    assert!(matches!(
        h.service.confirm("no-such-token").await.unwrap_err(),
        AppError::InvalidToken
    ));
    assert!(matches!(
        h.service.confirm("").await.unwrap_err(),
        AppError::InvalidToken
    ));
}

#[tokio::test]
async fn invalid_email_is_rejected_before_any_write() {
    let h = harness();

    let result = h.service.subscribe(request("not-an-email")).await;
    assert!(matches!(result.unwrap_err(), AppError::Validation(_)));

    assert!(h.subscribers.rows.lock().unwrap().is_empty());
    assert!(h.mailer.sent.lock().unwrap().is_empty());
}

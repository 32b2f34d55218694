//! Trending ranking window tests.
//!
//! A newsletter outside the trailing window never ranks, no matter how
//! many likes it holds; inside the window, likes rank and recency breaks
//! ties.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use chronicle::domain::{
    Department, DepartmentIssue, EntityKind, Feedback, Issue, Newsletter, Notice, Reaction,
    ReactionCounts, ReactionKind, Submission, SubmissionStatus,
};
use chronicle::errors::{AppError, AppResult};
use chronicle::infra::repositories::{
    DepartmentIssueRepository, DepartmentRepository, FeedbackRepository, IssueRepository,
    NewsletterRepository, NoticeRepository, ReactionRepository, SubmissionFilter,
    SubmissionRepository, UpsertDepartmentIssue, UpsertIssue,
};
use chronicle::services::{QueryEngine, QueryService};

/// Newsletter store honoring the published + created-within-window filter.
#[derive(Default)]
struct InMemoryNewsletters {
    rows: Mutex<Vec<Newsletter>>,
}

#[async_trait]
impl NewsletterRepository for InMemoryNewsletters {
    async fn list_published(&self) -> AppResult<Vec<Newsletter>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_published)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Newsletter>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn published_since(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<Newsletter>> {
        let mut rows: Vec<Newsletter> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_published && n.created_at >= cutoff)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn latest_published(&self, limit: u64) -> AppResult<Vec<Newsletter>> {
        let mut rows: Vec<Newsletter> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_published)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn count_published(&self) -> AppResult<u64> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.is_published)
            .count() as u64)
    }

    async fn set_published(&self, _id: Uuid, _is_published: bool) -> AppResult<Newsletter> {
        Err(AppError::internal("not used in this test"))
    }
}

/// Reaction store serving fixed like tallies.
#[derive(Default)]
struct FixedLikes {
    likes: Mutex<HashMap<Uuid, u64>>,
}

#[async_trait]
impl ReactionRepository for FixedLikes {
    async fn toggle(
        &self,
        _user_id: Uuid,
        _entity_type: EntityKind,
        _entity_id: Uuid,
        _kind: ReactionKind,
    ) -> AppResult<Option<Reaction>> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_for_user(
        &self,
        _user_id: Uuid,
        _entity_type: EntityKind,
        _entity_id: Uuid,
    ) -> AppResult<Option<Reaction>> {
        Ok(None)
    }

    async fn counts_for(
        &self,
        _entity_type: EntityKind,
        _entity_id: Uuid,
    ) -> AppResult<ReactionCounts> {
        Ok(ReactionCounts::default())
    }

    async fn like_counts(
        &self,
        _entity_type: EntityKind,
        entity_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, u64>> {
        let likes = self.likes.lock().unwrap();
        Ok(entity_ids
            .into_iter()
            .filter_map(|id| likes.get(&id).map(|n| (id, *n)))
            .collect())
    }
}

// Inert fakes for the read paths this test never touches.

struct NullIssues;

#[async_trait]
impl IssueRepository for NullIssues {
    async fn list(&self) -> AppResult<Vec<Issue>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Issue>> {
        Ok(None)
    }

    async fn latest_published(&self) -> AppResult<Option<Issue>> {
        Ok(None)
    }

    async fn upsert_by_period(&self, _payload: UpsertIssue) -> AppResult<Issue> {
        Err(AppError::internal("not used in this test"))
    }

    async fn set_published_at(
        &self,
        _id: Uuid,
        _published_at: Option<DateTime<Utc>>,
    ) -> AppResult<Issue> {
        Err(AppError::internal("not used in this test"))
    }
}

struct NullDepartmentIssues;

#[async_trait]
impl DepartmentIssueRepository for NullDepartmentIssues {
    async fn list_for_issue(&self, _issue_id: Uuid) -> AppResult<Vec<DepartmentIssue>> {
        Ok(Vec::new())
    }

    async fn list_for_department(&self, _department_id: Uuid) -> AppResult<Vec<DepartmentIssue>> {
        Ok(Vec::new())
    }

    async fn upsert(&self, _payload: UpsertDepartmentIssue) -> AppResult<DepartmentIssue> {
        Err(AppError::internal("not used in this test"))
    }
}

struct NullSubmissions;

#[async_trait]
impl SubmissionRepository for NullSubmissions {
    async fn create(
        &self,
        _payload: chronicle::domain::NewSubmission,
    ) -> AppResult<Submission> {
        Err(AppError::internal("not used in this test"))
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Submission>> {
        Ok(None)
    }

    async fn list(&self, _filter: SubmissionFilter) -> AppResult<Vec<Submission>> {
        Ok(Vec::new())
    }

    async fn latest(&self, _limit: u64) -> AppResult<Vec<Submission>> {
        Ok(Vec::new())
    }

    async fn spotlight(&self, _limit: u64) -> AppResult<Vec<Submission>> {
        Ok(Vec::new())
    }

    async fn update_status(
        &self,
        _id: Uuid,
        _status: SubmissionStatus,
        _moderated_by: Uuid,
    ) -> AppResult<Submission> {
        Err(AppError::internal("not used in this test"))
    }

    async fn set_pinned(&self, _id: Uuid, _pinned: bool) -> AppResult<Submission> {
        Err(AppError::internal("not used in this test"))
    }

    async fn delete(&self, _id: Uuid) -> AppResult<()> {
        Err(AppError::internal("not used in this test"))
    }

    async fn count_with_status(&self, _status: SubmissionStatus) -> AppResult<u64> {
        Ok(0)
    }

    async fn count_with_status_since(
        &self,
        _status: SubmissionStatus,
        _cutoff: DateTime<Utc>,
    ) -> AppResult<u64> {
        Ok(0)
    }
}

struct NullNotices;

#[async_trait]
impl NoticeRepository for NullNotices {
    async fn list_active(
        &self,
        _now: DateTime<Utc>,
        _limit: Option<u64>,
    ) -> AppResult<Vec<Notice>> {
        Ok(Vec::new())
    }
}

struct NullFeedback;

#[async_trait]
impl FeedbackRepository for NullFeedback {
    async fn create(
        &self,
        _user_id: Option<Uuid>,
        _rating: i16,
        _review: Option<String>,
    ) -> AppResult<Feedback> {
        Err(AppError::internal("not used in this test"))
    }

    async fn latest(&self, _limit: u64) -> AppResult<Vec<Feedback>> {
        Ok(Vec::new())
    }

    async fn ratings(&self) -> AppResult<Vec<i16>> {
        Ok(Vec::new())
    }
}

struct NullDepartments;

#[async_trait]
impl DepartmentRepository for NullDepartments {
    async fn list(&self) -> AppResult<Vec<Department>> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: Uuid) -> AppResult<Option<Department>> {
        Ok(None)
    }

    async fn find_by_slug(&self, _slug: &str) -> AppResult<Option<Department>> {
        Ok(None)
    }
}

fn newsletter(days_ago: i64) -> Newsletter {
    let created = Utc::now() - Duration::days(days_ago);
    Newsletter {
        id: Uuid::new_v4(),
        title: format!("Issue from {} days ago", days_ago),
        description: None,
        year: 2025,
        month: 6,
        issue_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        pdf_url: None,
        is_published: true,
        created_by: None,
        created_at: created,
        updated_at: created,
    }
}

fn engine(
    newsletters: Arc<InMemoryNewsletters>,
    reactions: Arc<FixedLikes>,
) -> QueryEngine {
    QueryEngine::new(
        Arc::new(NullIssues),
        Arc::new(NullDepartmentIssues),
        newsletters,
        Arc::new(NullSubmissions),
        Arc::new(NullNotices),
        reactions,
        Arc::new(NullFeedback),
        Arc::new(NullDepartments),
    )
}

#[tokio::test]
async fn old_newsletter_never_trends_despite_more_likes() {
    let newsletters = Arc::new(InMemoryNewsletters::default());
    let reactions = Arc::new(FixedLikes::default());

    let recent = newsletter(5);
    let ancient = newsletter(45);
    reactions.likes.lock().unwrap().insert(recent.id, 2);
    // The out-of-window newsletter is far more liked
    reactions.likes.lock().unwrap().insert(ancient.id, 100);
    newsletters
        .rows
        .lock()
        .unwrap()
        .extend([recent.clone(), ancient.clone()]);

    let engine = engine(newsletters, reactions);
    let ranked = engine.trending_newsletters(30, 3).await.unwrap();

    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].newsletter.id, recent.id);
    assert_eq!(ranked[0].like_count, 2);
}

#[tokio::test]
async fn unpublished_newsletters_never_trend() {
    let newsletters = Arc::new(InMemoryNewsletters::default());
    let reactions = Arc::new(FixedLikes::default());

    let mut draft = newsletter(2);
    draft.is_published = false;
    reactions.likes.lock().unwrap().insert(draft.id, 10);
    newsletters.rows.lock().unwrap().push(draft);

    let engine = engine(newsletters, reactions);
    let ranked = engine.trending_newsletters(30, 3).await.unwrap();

    assert!(ranked.is_empty());
}

#[tokio::test]
async fn likes_rank_and_recency_breaks_ties() {
    let newsletters = Arc::new(InMemoryNewsletters::default());
    let reactions = Arc::new(FixedLikes::default());

    let newest = newsletter(1);
    let liked = newsletter(10);
    let older = newsletter(20);
    reactions.likes.lock().unwrap().insert(liked.id, 7);
    // `newest` and `older` tie at zero likes; recency orders them
    newsletters
        .rows
        .lock()
        .unwrap()
        .extend([newest.clone(), liked.clone(), older.clone()]);

    let engine = engine(newsletters, reactions);
    let ranked = engine.trending_newsletters(30, 3).await.unwrap();

    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].newsletter.id, liked.id);
    assert_eq!(ranked[1].newsletter.id, newest.id);
    assert_eq!(ranked[2].newsletter.id, older.id);
}

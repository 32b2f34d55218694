//! Aggregation and query service.
//!
//! Pure read-side computations over the repositories; every result is
//! deterministic given a repository snapshot.

use async_trait::async_trait;
use chrono::{Datelike, Duration, TimeZone, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::container::parallel;
use crate::config::{
    ACTIVITY_FEEDBACK_CAP, ACTIVITY_NEWSLETTERS_CAP, ACTIVITY_SUBMISSIONS_CAP,
};
use crate::domain::{
    merge_recent, ActivityItem, ActivityKind, Department, DepartmentIssue, EntityKind, Issue,
    Newsletter, Notice, RankedNewsletter, Submission, SubmissionStatus,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    DepartmentIssueRepository, DepartmentRepository, FeedbackRepository, IssueRepository,
    NewsletterRepository, NoticeRepository, ReactionRepository, SubmissionFilter,
    SubmissionRepository,
};

/// Site-wide counters shown on the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Stats {
    pub total_newsletters: u64,
    pub total_submissions: u64,
    pub this_month_submissions: u64,
    /// Mean feedback rating rounded to one decimal; 0 with no feedback.
    pub average_rating: f64,
}

/// Query service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Most recent published issue by calendar period; never a draft.
    async fn current_issue(&self) -> AppResult<Option<Issue>>;

    /// Newsletters created in the trailing window ranked by like count,
    /// ties broken by most recent creation.
    async fn trending_newsletters(
        &self,
        window_days: i64,
        limit: usize,
    ) -> AppResult<Vec<RankedNewsletter>>;

    /// Approved, pinned submissions, newest first.
    async fn spotlight_submissions(&self, limit: u64) -> AppResult<Vec<Submission>>;

    /// Public students listing: approved submissions only, optionally
    /// filtered by department or category.
    async fn approved_submissions(
        &self,
        department: Option<String>,
        category: Option<String>,
    ) -> AppResult<Vec<Submission>>;

    /// Currently visible notice board entries, pinned first.
    async fn active_notices(&self, limit: Option<u64>) -> AppResult<Vec<Notice>>;

    /// Heterogeneous feed merged from recent submissions, published
    /// newsletters, and feedback.
    async fn recent_activity(&self, limit: usize) -> AppResult<Vec<ActivityItem>>;

    async fn stats(&self) -> AppResult<Stats>;

    /// Department reference data, alphabetical.
    async fn departments(&self) -> AppResult<Vec<Department>>;

    async fn department_by_slug(&self, slug: String) -> AppResult<Option<Department>>;

    /// All issues, newest calendar period first (drafts included; the
    /// admin dashboard needs them).
    async fn issues(&self) -> AppResult<Vec<Issue>>;

    /// Department contributions attached to one issue.
    async fn department_issues(&self, issue_id: uuid::Uuid) -> AppResult<Vec<DepartmentIssue>>;

    /// Published newsletter archive, newest period first.
    async fn newsletter_archive(&self) -> AppResult<Vec<Newsletter>>;
}

/// Concrete implementation of `QueryService`.
pub struct QueryEngine {
    issues: Arc<dyn IssueRepository>,
    department_issues: Arc<dyn DepartmentIssueRepository>,
    newsletters: Arc<dyn NewsletterRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    notices: Arc<dyn NoticeRepository>,
    reactions: Arc<dyn ReactionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    departments: Arc<dyn DepartmentRepository>,
}

impl QueryEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        issues: Arc<dyn IssueRepository>,
        department_issues: Arc<dyn DepartmentIssueRepository>,
        newsletters: Arc<dyn NewsletterRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        notices: Arc<dyn NoticeRepository>,
        reactions: Arc<dyn ReactionRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        departments: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            issues,
            department_issues,
            newsletters,
            submissions,
            notices,
            reactions,
            feedback,
            departments,
        }
    }

    /// Mean rating rounded to one decimal; 0 with no feedback rather than
    /// a division by zero.
    fn average_rating(ratings: &[i16]) -> f64 {
        if ratings.is_empty() {
            return 0.0;
        }
        let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
        let mean = sum as f64 / ratings.len() as f64;
        (mean * 10.0).round() / 10.0
    }
}

#[async_trait]
impl QueryService for QueryEngine {
    async fn current_issue(&self) -> AppResult<Option<Issue>> {
        self.issues.latest_published().await
    }

    async fn trending_newsletters(
        &self,
        window_days: i64,
        limit: usize,
    ) -> AppResult<Vec<RankedNewsletter>> {
        let cutoff = Utc::now() - Duration::days(window_days);
        let newsletters = self.newsletters.published_since(cutoff).await?;

        let ids = newsletters.iter().map(|n| n.id).collect::<Vec<_>>();
        let likes = self
            .reactions
            .like_counts(EntityKind::Newsletter, ids)
            .await?;

        let mut ranked: Vec<RankedNewsletter> = newsletters
            .into_iter()
            .map(|newsletter| {
                let like_count = likes.get(&newsletter.id).copied().unwrap_or(0);
                RankedNewsletter {
                    newsletter,
                    like_count,
                }
            })
            .collect();

        // Input is newest-first; the stable sort keeps that order as the
        // tie-break within equal like counts.
        ranked.sort_by(|a, b| b.like_count.cmp(&a.like_count));
        ranked.truncate(limit);

        Ok(ranked)
    }

    async fn spotlight_submissions(&self, limit: u64) -> AppResult<Vec<Submission>> {
        self.submissions.spotlight(limit).await
    }

    async fn approved_submissions(
        &self,
        department: Option<String>,
        category: Option<String>,
    ) -> AppResult<Vec<Submission>> {
        self.submissions
            .list(SubmissionFilter {
                status: Some(SubmissionStatus::Approved),
                department,
                category,
            })
            .await
    }

    async fn active_notices(&self, limit: Option<u64>) -> AppResult<Vec<Notice>> {
        self.notices.list_active(Utc::now(), limit).await
    }

    async fn recent_activity(&self, limit: usize) -> AppResult<Vec<ActivityItem>> {
        let (submissions, newsletters, feedback) = parallel::join3(
            self.submissions.latest(ACTIVITY_SUBMISSIONS_CAP),
            self.newsletters.latest_published(ACTIVITY_NEWSLETTERS_CAP),
            self.feedback.latest(ACTIVITY_FEEDBACK_CAP),
        )
        .await?;

        let mut items = Vec::with_capacity(submissions.len() + newsletters.len() + feedback.len());

        items.extend(submissions.into_iter().map(|s| ActivityItem {
            id: s.id,
            kind: ActivityKind::Submission,
            title: s.title,
            timestamp: s.created_at,
            status: Some(s.status),
        }));
        items.extend(newsletters.into_iter().map(|n| ActivityItem {
            id: n.id,
            kind: ActivityKind::Newsletter,
            title: n.title,
            timestamp: n.created_at,
            status: None,
        }));
        items.extend(feedback.into_iter().map(|f| ActivityItem {
            id: f.id,
            kind: ActivityKind::Feedback,
            title: format!("{} star rating", f.rating),
            timestamp: f.created_at,
            status: None,
        }));

        Ok(merge_recent(items, limit))
    }

    async fn stats(&self) -> AppResult<Stats> {
        let now = Utc::now();
        let month_start = Utc
            .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
            .single()
            .ok_or_else(|| AppError::internal("Failed to compute start of month"))?;

        let (total_newsletters, total_submissions, this_month_submissions, ratings) =
            parallel::join4(
                self.newsletters.count_published(),
                self.submissions.count_with_status(SubmissionStatus::Approved),
                self.submissions
                    .count_with_status_since(SubmissionStatus::Approved, month_start),
                self.feedback.ratings(),
            )
            .await?;

        Ok(Stats {
            total_newsletters,
            total_submissions,
            this_month_submissions,
            average_rating: Self::average_rating(&ratings),
        })
    }

    async fn departments(&self) -> AppResult<Vec<Department>> {
        self.departments.list().await
    }

    async fn department_by_slug(&self, slug: String) -> AppResult<Option<Department>> {
        self.departments.find_by_slug(&slug).await
    }

    async fn issues(&self) -> AppResult<Vec<Issue>> {
        self.issues.list().await
    }

    async fn department_issues(&self, issue_id: uuid::Uuid) -> AppResult<Vec<DepartmentIssue>> {
        self.department_issues.list_for_issue(issue_id).await
    }

    async fn newsletter_archive(&self) -> AppResult<Vec<Newsletter>> {
        self.newsletters.list_published().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Newsletter;
    use crate::infra::repositories::{
        MockDepartmentIssueRepository, MockDepartmentRepository, MockFeedbackRepository,
        MockIssueRepository, MockNewsletterRepository, MockNoticeRepository,
        MockReactionRepository, MockSubmissionRepository,
    };
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn newsletter(id: Uuid, hours_ago: i64) -> Newsletter {
        let created = Utc::now() - Duration::hours(hours_ago);
        Newsletter {
            id,
            title: format!("Newsletter {}", hours_ago),
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
        issues: MockIssueRepository,
        newsletters: MockNewsletterRepository,
        submissions: MockSubmissionRepository,
        notices: MockNoticeRepository,
        reactions: MockReactionRepository,
        feedback: MockFeedbackRepository,
    ) -> QueryEngine {
        QueryEngine::new(
            Arc::new(issues),
            Arc::new(MockDepartmentIssueRepository::new()),
            Arc::new(newsletters),
            Arc::new(submissions),
            Arc::new(notices),
            Arc::new(reactions),
            Arc::new(feedback),
            Arc::new(MockDepartmentRepository::new()),
        )
    }

    #[tokio::test]
    async fn trending_ranks_by_likes_with_recency_tiebreak() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        let mut newsletters = MockNewsletterRepository::new();
        newsletters.expect_published_since().returning(move |_| {
            Ok(vec![
                newsletter(first, 1),
                newsletter(second, 2),
                newsletter(third, 3),
            ])
        });

        let mut reactions = MockReactionRepository::new();
        reactions.expect_like_counts().returning(move |_, _| {
            let mut counts = HashMap::new();
            counts.insert(third, 5);
            counts.insert(second, 2);
            // `first` has no likes but is newest
            Ok(counts)
        });

        let engine = engine(
            MockIssueRepository::new(),
            newsletters,
            MockSubmissionRepository::new(),
            MockNoticeRepository::new(),
            reactions,
            MockFeedbackRepository::new(),
        );

        let ranked = engine.trending_newsletters(30, 3).await.unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].newsletter.id, third);
        assert_eq!(ranked[1].newsletter.id, second);
        assert_eq!(ranked[2].newsletter.id, first);
    }

    #[tokio::test]
    async fn trending_truncates_to_limit() {
        let mut newsletters = MockNewsletterRepository::new();
        newsletters.expect_published_since().returning(|_| {
            Ok((0..5).map(|i| newsletter(Uuid::new_v4(), i)).collect())
        });

        let mut reactions = MockReactionRepository::new();
        reactions
            .expect_like_counts()
            .returning(|_, _| Ok(HashMap::new()));

        let engine = engine(
            MockIssueRepository::new(),
            newsletters,
            MockSubmissionRepository::new(),
            MockNoticeRepository::new(),
            reactions,
            MockFeedbackRepository::new(),
        );

        let ranked = engine.trending_newsletters(30, 3).await.unwrap();
        assert_eq!(ranked.len(), 3);
    }

    #[tokio::test]
    async fn stats_average_is_zero_without_feedback() {
        let mut newsletters = MockNewsletterRepository::new();
        newsletters.expect_count_published().returning(|| Ok(4));

        let mut submissions = MockSubmissionRepository::new();
        submissions.expect_count_with_status().returning(|_| Ok(7));
        submissions
            .expect_count_with_status_since()
            .returning(|_, _| Ok(2));

        let mut feedback = MockFeedbackRepository::new();
        feedback.expect_ratings().returning(|| Ok(vec![]));

        let engine = engine(
            MockIssueRepository::new(),
            newsletters,
            submissions,
            MockNoticeRepository::new(),
            MockReactionRepository::new(),
            feedback,
        );

        let stats = engine.stats().await.unwrap();
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.total_newsletters, 4);
        assert_eq!(stats.this_month_submissions, 2);
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        assert_eq!(QueryEngine::average_rating(&[5, 4, 4]), 4.3);
        assert_eq!(QueryEngine::average_rating(&[1]), 1.0);
        assert_eq!(QueryEngine::average_rating(&[]), 0.0);
    }

    #[tokio::test]
    async fn recent_activity_merges_and_truncates() {
        let mut submissions = MockSubmissionRepository::new();
        submissions.expect_latest().returning(|_| {
            Ok((0..3)
                .map(|i| {
                    let created = Utc::now() - Duration::hours(i * 2 + 2);
                    crate::domain::Submission {
                        id: Uuid::new_v4(),
                        title: format!("Submission {}", i),
                        summary: String::new(),
                        category: "Project".to_string(),
                        department: "IT".to_string(),
                        semester: None,
                        media_url: None,
                        external_link: None,
                        submitter_name: "S".to_string(),
                        submitter_email: None,
                        status: SubmissionStatus::Pending,
                        pinned: false,
                        moderated_by: None,
                        created_at: created,
                        updated_at: created,
                    }
                })
                .collect())
        });

        let mut newsletters = MockNewsletterRepository::new();
        newsletters
            .expect_latest_published()
            .returning(|_| Ok(vec![newsletter(Uuid::new_v4(), 1)]));

        let mut feedback = MockFeedbackRepository::new();
        feedback.expect_latest().returning(|_| {
            Ok(vec![crate::domain::Feedback {
                id: Uuid::new_v4(),
                user_id: None,
                rating: 5,
                review: None,
                created_at: Utc::now(),
            }])
        });

        let engine = engine(
            MockIssueRepository::new(),
            newsletters,
            submissions,
            MockNoticeRepository::new(),
            MockReactionRepository::new(),
            feedback,
        );

        let feed = engine.recent_activity(5).await.unwrap();
        assert_eq!(feed.len(), 5);
        // Newest first across heterogeneous sources
        assert!(feed.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
        assert_eq!(feed[0].kind, ActivityKind::Feedback);
    }
}

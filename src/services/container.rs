//! Service container - centralized service construction and access.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, EngagementManager, EngagementService, ModerationEngine,
    ModerationService, ProfileManager, ProfileService, QueryEngine, QueryService, RoleResolver,
    RoleService, SubscriptionGateway, SubscriptionService,
};
use crate::config::Config;
use crate::infra::repositories::{
    AccountStore, DepartmentIssueStore, DepartmentStore, FeedbackStore, IssueStore,
    NewsletterStore, NoticeStore, ProfileStore, ReactionStore, RoleStore, SubmissionStore,
    SubscriberStore,
};
use crate::infra::ObjectStorage;
use crate::jobs::Mailer;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn roles(&self) -> Arc<dyn RoleService>;

    fn profiles(&self) -> Arc<dyn ProfileService>;

    fn moderation(&self) -> Arc<dyn ModerationService>;

    fn queries(&self) -> Arc<dyn QueryService>;

    fn engagement(&self) -> Arc<dyn EngagementService>;

    fn subscriptions(&self) -> Arc<dyn SubscriptionService>;
}

/// Concrete implementation of `ServiceContainer`.
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    role_service: Arc<dyn RoleService>,
    profile_service: Arc<dyn ProfileService>,
    moderation_service: Arc<dyn ModerationService>,
    query_service: Arc<dyn QueryService>,
    engagement_service: Arc<dyn EngagementService>,
    subscription_service: Arc<dyn SubscriptionService>,
}

impl Services {
    /// Wire every service against a live database connection.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        storage: Arc<dyn ObjectStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let accounts = Arc::new(AccountStore::new(db.clone()));
        let profiles = Arc::new(ProfileStore::new(db.clone()));
        let roles = Arc::new(RoleStore::new(db.clone()));
        let departments = Arc::new(DepartmentStore::new(db.clone()));
        let issues = Arc::new(IssueStore::new(db.clone()));
        let department_issues = Arc::new(DepartmentIssueStore::new(db.clone()));
        let newsletters = Arc::new(NewsletterStore::new(db.clone()));
        let submissions = Arc::new(SubmissionStore::new(db.clone()));
        let notices = Arc::new(NoticeStore::new(db.clone()));
        let reactions = Arc::new(ReactionStore::new(db.clone()));
        let feedback = Arc::new(FeedbackStore::new(db.clone()));
        let subscribers = Arc::new(SubscriberStore::new(db));

        let auth_service = Arc::new(Authenticator::new(
            accounts,
            profiles.clone(),
            mailer.clone(),
            config.clone(),
        ));
        let role_service = Arc::new(RoleResolver::new(roles));
        let profile_service = Arc::new(ProfileManager::new(profiles.clone()));
        let moderation_service = Arc::new(ModerationEngine::new(
            submissions.clone(),
            issues.clone(),
            department_issues.clone(),
            newsletters.clone(),
            profiles,
            departments.clone(),
            storage,
        ));
        let query_service = Arc::new(QueryEngine::new(
            issues,
            department_issues,
            newsletters,
            submissions,
            notices,
            reactions.clone(),
            feedback.clone(),
            departments,
        ));
        let engagement_service = Arc::new(EngagementManager::new(reactions, feedback));
        let subscription_service = Arc::new(SubscriptionGateway::new(subscribers, mailer, config));

        Self {
            auth_service,
            role_service,
            profile_service,
            moderation_service,
            query_service,
            engagement_service,
            subscription_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn roles(&self) -> Arc<dyn RoleService> {
        self.role_service.clone()
    }

    fn profiles(&self) -> Arc<dyn ProfileService> {
        self.profile_service.clone()
    }

    fn moderation(&self) -> Arc<dyn ModerationService> {
        self.moderation_service.clone()
    }

    fn queries(&self) -> Arc<dyn QueryService> {
        self.query_service.clone()
    }

    fn engagement(&self) -> Arc<dyn EngagementService> {
        self.engagement_service.clone()
    }

    fn subscriptions(&self) -> Arc<dyn SubscriptionService> {
        self.subscription_service.clone()
    }
}

/// Parallel execution utilities for running independent operations
/// concurrently. The aggregation queries use these to fetch their bounded
/// candidate sets side by side.
pub mod parallel {
    use std::future::Future;

    use tokio::try_join;

    use crate::errors::AppResult;

    /// Execute two independent async operations in parallel.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Execute three independent async operations in parallel.
    pub async fn join3<F1, F2, F3, T1, T2, T3>(f1: F1, f2: F2, f3: F3) -> AppResult<(T1, T2, T3)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
    {
        try_join!(f1, f2, f3)
    }

    /// Execute four independent async operations in parallel.
    pub async fn join4<F1, F2, F3, F4, T1, T2, T3, T4>(
        f1: F1,
        f2: F2,
        f3: F3,
        f4: F4,
    ) -> AppResult<(T1, T2, T3, T4)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
        F3: Future<Output = AppResult<T3>>,
        F4: Future<Output = AppResult<T4>>,
    {
        try_join!(f1, f2, f3, f4)
    }

    /// Execute a collection of homogeneous async operations in parallel.
    /// Results come back in input order.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppResult;

    #[tokio::test]
    async fn parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<i32> {
            Ok(2)
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[tokio::test]
    async fn parallel_join_all_preserves_order() {
        let futures: Vec<_> = (0..5)
            .map(|i| async move { Ok(i) as AppResult<i32> })
            .collect();
        let results = parallel::join_all(futures).await.unwrap();
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }
}

//! Reactions and feedback.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::{
    Caller, EntityKind, Feedback, NewFeedback, Reaction, ReactionCounts, ReactionKind,
};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{FeedbackRepository, ReactionRepository};

/// Engagement service trait for dependency injection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementService: Send + Sync {
    /// Toggle the caller's reaction. Returns the stored reaction, or None
    /// when the call removed an identical one. A failed call leaves
    /// stored state unchanged.
    async fn react(
        &self,
        caller: &Caller,
        entity_type: EntityKind,
        entity_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<Reaction>>;

    /// The caller's current reaction on an entity, if any.
    async fn my_reaction(
        &self,
        caller: &Caller,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<Option<Reaction>>;

    /// Public like/dislike tallies for an entity.
    async fn reaction_counts(
        &self,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<ReactionCounts>;

    /// Record feedback; `user_id` is None for anonymous feedback.
    async fn submit_feedback(
        &self,
        user_id: Option<Uuid>,
        payload: NewFeedback,
    ) -> AppResult<Feedback>;
}

/// Concrete implementation of `EngagementService`.
pub struct EngagementManager {
    reactions: Arc<dyn ReactionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl EngagementManager {
    pub fn new(reactions: Arc<dyn ReactionRepository>, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { reactions, feedback }
    }
}

#[async_trait]
impl EngagementService for EngagementManager {
    async fn react(
        &self,
        caller: &Caller,
        entity_type: EntityKind,
        entity_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<Reaction>> {
        self.reactions
            .toggle(caller.user_id, entity_type, entity_id, kind)
            .await
    }

    async fn my_reaction(
        &self,
        caller: &Caller,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<Option<Reaction>> {
        self.reactions
            .find_for_user(caller.user_id, entity_type, entity_id)
            .await
    }

    async fn reaction_counts(
        &self,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<ReactionCounts> {
        self.reactions.counts_for(entity_type, entity_id).await
    }

    async fn submit_feedback(
        &self,
        user_id: Option<Uuid>,
        payload: NewFeedback,
    ) -> AppResult<Feedback> {
        payload
            .validate()
            .map_err(|e| AppError::validation(e.to_string()))?;

        let review = payload
            .review
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        self.feedback.create(user_id, payload.rating, review).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{MockFeedbackRepository, MockReactionRepository};

    #[tokio::test]
    async fn feedback_rejects_out_of_range_rating() {
        let mut feedback = MockFeedbackRepository::new();
        feedback.expect_create().never();

        let service = EngagementManager::new(
            Arc::new(MockReactionRepository::new()),
            Arc::new(feedback),
        );

        let result = service
            .submit_feedback(
                None,
                NewFeedback {
                    rating: 6,
                    review: None,
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn feedback_blank_review_is_stored_as_none() {
        let mut feedback = MockFeedbackRepository::new();
        feedback
            .expect_create()
            .withf(|_, rating, review| *rating == 4 && review.is_none())
            .returning(|user_id, rating, review| {
                Ok(Feedback {
                    id: Uuid::new_v4(),
                    user_id,
                    rating,
                    review,
                    created_at: chrono::Utc::now(),
                })
            });

        let service = EngagementManager::new(
            Arc::new(MockReactionRepository::new()),
            Arc::new(feedback),
        );

        let result = service
            .submit_feedback(
                None,
                NewFeedback {
                    rating: 4,
                    review: Some("   ".to_string()),
                },
            )
            .await;

        assert!(result.is_ok());
    }
}

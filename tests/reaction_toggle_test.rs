//! Reaction toggle law tests.
//!
//! A user holds at most one reaction per entity: repeating the same
//! reaction removes it, a different one replaces it, and racing callers
//! converge on a single row.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use chronicle::domain::{Caller, EntityKind, Reaction, ReactionCounts, ReactionKind};
use chronicle::errors::{AppError, AppResult};
use chronicle::infra::repositories::{FeedbackRepository, ReactionRepository};
use chronicle::services::{EngagementManager, EngagementService};

/// In-memory reaction store keyed on (user, entity_type, entity_id),
/// mirroring the unique index the real store enforces.
#[derive(Default)]
struct InMemoryReactions {
    rows: Mutex<HashMap<(Uuid, EntityKind, Uuid), Reaction>>,
}

#[async_trait]
impl ReactionRepository for InMemoryReactions {
    async fn toggle(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
        kind: ReactionKind,
    ) -> AppResult<Option<Reaction>> {
        let mut rows = self.rows.lock().unwrap();
        let key = (user_id, entity_type, entity_id);

        // Conditional delete when the same reaction is repeated
        if rows.get(&key).map(|r| r.reaction) == Some(kind) {
            rows.remove(&key);
            return Ok(None);
        }

        // Otherwise insert-or-replace on the unique key
        let now = Utc::now();
        let reaction = Reaction {
            id: Uuid::new_v4(),
            user_id,
            entity_type,
            entity_id,
            reaction: kind,
            created_at: now,
            updated_at: now,
        };
        rows.insert(key, reaction.clone());
        Ok(Some(reaction))
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<Option<Reaction>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&(user_id, entity_type, entity_id))
            .cloned())
    }

    async fn counts_for(
        &self,
        entity_type: EntityKind,
        entity_id: Uuid,
    ) -> AppResult<ReactionCounts> {
        let rows = self.rows.lock().unwrap();
        let mut counts = ReactionCounts::default();
        for reaction in rows.values() {
            if reaction.entity_type == entity_type && reaction.entity_id == entity_id {
                match reaction.reaction {
                    ReactionKind::Like => counts.likes += 1,
                    ReactionKind::Dislike => counts.dislikes += 1,
                }
            }
        }
        Ok(counts)
    }

    async fn like_counts(
        &self,
        entity_type: EntityKind,
        entity_ids: Vec<Uuid>,
    ) -> AppResult<HashMap<Uuid, u64>> {
        let rows = self.rows.lock().unwrap();
        let mut counts = HashMap::new();
        for reaction in rows.values() {
            if reaction.entity_type == entity_type
                && reaction.reaction == ReactionKind::Like
                && entity_ids.contains(&reaction.entity_id)
            {
                *counts.entry(reaction.entity_id).or_insert(0) += 1;
            }
        }
        Ok(counts)
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
    ) -> AppResult<chronicle::domain::Feedback> {
        Err(AppError::internal("not used in this test"))
    }

    async fn latest(&self, _limit: u64) -> AppResult<Vec<chronicle::domain::Feedback>> {
        Ok(Vec::new())
    }

    async fn ratings(&self) -> AppResult<Vec<i16>> {
        Ok(Vec::new())
    }
}

fn service() -> (EngagementManager, Arc<InMemoryReactions>) {
    let reactions = Arc::new(InMemoryReactions::default());
    let service = EngagementManager::new(reactions.clone(), Arc::new(NullFeedback));
    (service, reactions)
}

#[tokio::test]
async fn repeating_a_reaction_removes_it() {
    let (service, reactions) = service();
    let caller = Caller::new(Uuid::new_v4(), None);
    let newsletter = Uuid::new_v4();

    let first = service
        .react(&caller, EntityKind::Newsletter, newsletter, ReactionKind::Like)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = service
        .react(&caller, EntityKind::Newsletter, newsletter, ReactionKind::Like)
        .await
        .unwrap();
    assert!(second.is_none());

    let counts = reactions
        .counts_for(EntityKind::Newsletter, newsletter)
        .await
        .unwrap();
    assert_eq!(counts.likes, 0);
    assert_eq!(counts.dislikes, 0);
}

#[tokio::test]
async fn switching_reaction_replaces_not_duplicates() {
    let (service, reactions) = service();
    let caller = Caller::new(Uuid::new_v4(), None);
    let newsletter = Uuid::new_v4();

    service
        .react(&caller, EntityKind::Newsletter, newsletter, ReactionKind::Like)
        .await
        .unwrap();
    let switched = service
        .react(
            &caller,
            EntityKind::Newsletter,
            newsletter,
            ReactionKind::Dislike,
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(switched.reaction, ReactionKind::Dislike);

    // Exactly one row: the dislike
    let counts = reactions
        .counts_for(EntityKind::Newsletter, newsletter)
        .await
        .unwrap();
    assert_eq!(counts.likes, 0);
    assert_eq!(counts.dislikes, 1);
}

#[tokio::test]
async fn reactions_are_scoped_per_entity() {
    let (service, _) = service();
    let caller = Caller::new(Uuid::new_v4(), None);
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    service
        .react(&caller, EntityKind::Newsletter, first, ReactionKind::Like)
        .await
        .unwrap();
    service
        .react(&caller, EntityKind::Submission, second, ReactionKind::Like)
        .await
        .unwrap();

    let mine = service
        .my_reaction(&caller, EntityKind::Newsletter, first)
        .await
        .unwrap();
    assert_eq!(mine.unwrap().reaction, ReactionKind::Like);

    let counts = service
        .reaction_counts(EntityKind::Submission, second)
        .await
        .unwrap();
    assert_eq!(counts.likes, 1);
}

#[tokio::test]
async fn concurrent_likes_from_same_user_settle_on_one_row() {
    let (service, reactions) = service();
    let service = Arc::new(service);
    let user_id = Uuid::new_v4();
    let newsletter = Uuid::new_v4();

    // No prior reaction: one of the racing toggles inserts, the other
    // either replaces (same row) or toggles it off. With an odd number
    // of calls the end state must be exactly one like.
    let mut handles = Vec::new();
    for _ in 0..3 {
        let service = service.clone();
        let caller = Caller::new(user_id, None);
        handles.push(tokio::spawn(async move {
            service
                .react(&caller, EntityKind::Newsletter, newsletter, ReactionKind::Like)
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let counts = reactions
        .counts_for(EntityKind::Newsletter, newsletter)
        .await
        .unwrap();
    assert_eq!(counts.likes + counts.dislikes, 1);
}

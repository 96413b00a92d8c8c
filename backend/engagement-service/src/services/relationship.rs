//! Follow-graph management
//!
//! The follow edge is stored once as a (follower, followed) row; both sides
//! of the relationship and both counters are derived from that single edge
//! set, so the split follower/following lists can never disagree.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{FollowOutcome, NotificationKind, ProfileSummary, RelationshipCounts};
use crate::repository::{ProfileStore, RelationshipStore};
use crate::services::notifications::NotificationDispatcher;

pub struct RelationshipService {
    graph: Arc<dyn RelationshipStore>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<NotificationDispatcher>,
}

impl RelationshipService {
    pub fn new(
        graph: Arc<dyn RelationshipStore>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            graph,
            profiles,
            notifier,
        }
    }

    async fn ensure_user(&self, user_id: Uuid) -> Result<()> {
        if !self.profiles.user_exists(user_id).await? {
            return Err(AppError::NotFound(format!("user {} not found", user_id)));
        }
        Ok(())
    }

    async fn outcome(&self, actor_id: Uuid, target_id: Uuid) -> Result<FollowOutcome> {
        Ok(FollowOutcome {
            follower_count: self.graph.follower_count(target_id).await?,
            following_count: self.graph.following_count(actor_id).await?,
        })
    }

    /// Create the follow edge; idempotent after the first call.
    ///
    /// Notifies the target only when a new edge was actually created. The
    /// self-notification guard is unreachable here because self-follow is
    /// rejected up front, but the emit stays behind the `created` check so
    /// repeat follows never re-notify.
    pub async fn follow(&self, actor_id: Uuid, target_id: Uuid) -> Result<FollowOutcome> {
        if actor_id == target_id {
            return Err(AppError::Validation(
                "cannot follow yourself".to_string(),
            ));
        }
        self.ensure_user(actor_id).await?;
        self.ensure_user(target_id).await?;

        let created = self.graph.insert_follow(actor_id, target_id).await?;
        if created {
            metrics::record_social_event("follow");
            let actor = self
                .profiles
                .get_profiles(&[actor_id])
                .await?
                .into_iter()
                .next();
            let username = actor
                .map(|p| p.username)
                .unwrap_or_else(|| "Someone".to_string());
            self.notifier
                .emit(
                    target_id,
                    NotificationKind::Follow,
                    format!("{} started following you", username),
                    Some(actor_id),
                    Some(actor_id),
                    Some(username),
                )
                .await?;
        } else {
            debug!(follower = %actor_id, followed = %target_id, "follow edge already exists");
        }

        self.outcome(actor_id, target_id).await
    }

    /// Remove the follow edge; silently succeeds when no edge exists
    pub async fn unfollow(&self, actor_id: Uuid, target_id: Uuid) -> Result<FollowOutcome> {
        self.ensure_user(actor_id).await?;
        self.ensure_user(target_id).await?;

        let removed = self.graph.delete_follow(actor_id, target_id).await?;
        if removed {
            metrics::record_social_event("unfollow");
        }

        self.outcome(actor_id, target_id).await
    }

    /// Profile summaries of the user's followers; ids whose profile no
    /// longer resolves are skipped, not errored.
    pub async fn list_followers(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileSummary>> {
        self.ensure_user(user_id).await?;
        let ids = self.graph.follower_ids(user_id, limit, offset).await?;
        self.profiles.get_profiles(&ids).await
    }

    pub async fn list_following(
        &self,
        user_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileSummary>> {
        self.ensure_user(user_id).await?;
        let ids = self.graph.following_ids(user_id, limit, offset).await?;
        self.profiles.get_profiles(&ids).await
    }

    /// Pure containment check
    pub async fn is_following(&self, actor_id: Uuid, target_id: Uuid) -> Result<bool> {
        self.graph.is_following(actor_id, target_id).await
    }

    pub async fn counts(&self, user_id: Uuid) -> Result<RelationshipCounts> {
        self.ensure_user(user_id).await?;
        Ok(RelationshipCounts {
            follower_count: self.graph.follower_count(user_id).await?,
            following_count: self.graph.following_count(user_id).await?,
        })
    }
}

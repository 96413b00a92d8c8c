//! Storage traits for the engagement core
//!
//! The services are written against these traits so the persistence
//! technology stays a swappable collaborator. `PostgresRepository` is the
//! production implementation; `MemoryRepository` backs the test suite.

use crate::error::Result;
use crate::models::{Comment, Notification, ProfileSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Read-side lookups for users and posts
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool>;

    /// Resolve profile summaries for the given ids, preserving input order.
    /// Ids that no longer resolve are skipped, not errored.
    async fn get_profiles(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>>;

    /// Author of a post, or None if the post is unknown
    async fn post_author(&self, post_id: Uuid) -> Result<Option<Uuid>>;
}

/// Follow-graph storage
#[async_trait]
pub trait RelationshipStore: Send + Sync {
    /// Insert the edge idempotently; returns true if a new edge was created
    async fn insert_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    /// Delete the edge; returns true if an edge was removed
    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    async fn follower_count(&self, user_id: Uuid) -> Result<i64>;

    async fn following_count(&self, user_id: Uuid) -> Result<i64>;

    /// Newest-first follower ids
    async fn follower_ids(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>>;

    /// Newest-first followed ids
    async fn following_ids(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>>;
}

/// Like-set and comment storage for posts
#[async_trait]
pub trait EngagementStore: Send + Sync {
    /// Flip like membership for (post, user); returns the resulting state.
    /// Implementations must make the flip atomic so two concurrent toggles
    /// from the same user cannot double-apply.
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn is_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;

    async fn like_count(&self, post_id: Uuid) -> Result<i64>;

    async fn liker_ids(&self, post_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>>;

    async fn insert_comment(&self, comment: &Comment) -> Result<()>;

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>>;

    async fn update_comment_body(
        &self,
        comment_id: Uuid,
        body: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    async fn delete_comment(&self, comment_id: Uuid) -> Result<()>;

    /// Oldest-first comments on a post
    async fn comments_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>>;

    async fn comment_count(&self, post_id: Uuid) -> Result<i64>;
}

/// Notification storage
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<()>;

    async fn get(&self, notification_id: Uuid) -> Result<Option<Notification>>;

    /// Newest-first notifications for a recipient
    async fn for_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>>;

    async fn unread_for_recipient(&self, recipient_id: Uuid) -> Result<Vec<Notification>>;

    async fn unread_count(&self, recipient_id: Uuid) -> Result<i64>;

    async fn mark_read(&self, notification_id: Uuid) -> Result<()>;

    /// Returns the number of notifications flipped to read
    async fn mark_all_read(&self, recipient_id: Uuid) -> Result<u64>;

    async fn mark_viewed(&self, notification_ids: &[Uuid]) -> Result<()>;

    async fn delete(&self, notification_id: Uuid) -> Result<()>;
}

//! Like and comment bookkeeping for posts
//!
//! Likes use toggle semantics by design: repeated calls alternate state
//! rather than behaving idempotently. Comment and like counts are derived
//! from the underlying sets, so they track membership exactly.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{Comment, CommentView, LikeStatus, NotificationKind, ProfileSummary};
use crate::repository::{EngagementStore, ProfileStore};
use crate::services::notifications::NotificationDispatcher;

const MAX_COMMENT_CHARS: usize = 2000;
const PREVIEW_CHARS: usize = 50;

pub struct EngagementService {
    store: Arc<dyn EngagementStore>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<NotificationDispatcher>,
}

impl EngagementService {
    pub fn new(
        store: Arc<dyn EngagementStore>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            store,
            profiles,
            notifier,
        }
    }

    async fn post_author(&self, post_id: Uuid) -> Result<Uuid> {
        self.profiles
            .post_author(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {} not found", post_id)))
    }

    async fn actor_username(&self, actor_id: Uuid) -> Result<String> {
        Ok(self
            .profiles
            .get_profiles(&[actor_id])
            .await?
            .into_iter()
            .next()
            .map(|p| p.username)
            .unwrap_or_else(|| "Someone".to_string()))
    }

    /// Flip like membership; returns the resulting state and count
    pub async fn toggle_like(&self, post_id: Uuid, actor_id: Uuid) -> Result<LikeStatus> {
        let author_id = self.post_author(post_id).await?;

        let liked = self.store.toggle_like(post_id, actor_id).await?;
        let like_count = self.store.like_count(post_id).await?;
        metrics::record_social_event(if liked { "like" } else { "unlike" });

        // Only the like edge notifies, and never the post's own author
        if liked && actor_id != author_id {
            let username = self.actor_username(actor_id).await?;
            self.notifier
                .emit(
                    author_id,
                    NotificationKind::Like,
                    format!("{} liked your post", username),
                    Some(post_id),
                    Some(actor_id),
                    Some(username),
                )
                .await?;
        }

        Ok(LikeStatus { liked, like_count })
    }

    pub async fn check_liked(&self, post_id: Uuid, actor_id: Uuid) -> Result<LikeStatus> {
        self.post_author(post_id).await?;
        Ok(LikeStatus {
            liked: self.store.is_liked(post_id, actor_id).await?,
            like_count: self.store.like_count(post_id).await?,
        })
    }

    pub async fn list_likers(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProfileSummary>> {
        self.post_author(post_id).await?;
        let ids = self.store.liker_ids(post_id, limit, offset).await?;
        self.profiles.get_profiles(&ids).await
    }

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        body: &str,
    ) -> Result<CommentView> {
        let body = validate_body(body)?;
        let author_id = self.post_author(post_id).await?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id,
            author_id: actor_id,
            body,
            edited: false,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_comment(&comment).await?;
        metrics::record_social_event("comment");

        let author = self
            .profiles
            .get_profiles(&[actor_id])
            .await?
            .into_iter()
            .next();

        if actor_id != author_id {
            let username = author
                .as_ref()
                .map(|p| p.username.clone())
                .unwrap_or_else(|| "Someone".to_string());
            self.notifier
                .emit(
                    author_id,
                    NotificationKind::Comment,
                    format!(
                        "{} commented on your post: \"{}\"",
                        username,
                        preview(&comment.body)
                    ),
                    Some(post_id),
                    Some(actor_id),
                    Some(username),
                )
                .await?;
        }

        Ok(CommentView { comment, author })
    }

    /// Only the comment's author may edit
    pub async fn edit_comment(
        &self,
        comment_id: Uuid,
        actor_id: Uuid,
        body: &str,
    ) -> Result<Comment> {
        let body = validate_body(body)?;
        let mut comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;
        if comment.author_id != actor_id {
            return Err(AppError::Forbidden(
                "only the comment author can edit".to_string(),
            ));
        }

        let updated_at = Utc::now();
        self.store
            .update_comment_body(comment_id, &body, updated_at)
            .await?;
        comment.body = body;
        comment.edited = true;
        comment.updated_at = updated_at;
        Ok(comment)
    }

    /// The comment's author or the post's author (moderation) may delete.
    /// Returns the post's remaining comment count.
    pub async fn delete_comment(&self, comment_id: Uuid, actor_id: Uuid) -> Result<i64> {
        let comment = self
            .store
            .get_comment(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("comment not found".to_string()))?;

        let post_author = self.profiles.post_author(comment.post_id).await?;
        let allowed = actor_id == comment.author_id || post_author == Some(actor_id);
        if !allowed {
            return Err(AppError::Forbidden(
                "only the comment author or the post author can delete".to_string(),
            ));
        }

        self.store.delete_comment(comment_id).await?;
        self.store.comment_count(comment.post_id).await
    }

    pub async fn list_comments(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>> {
        self.post_author(post_id).await?;
        let comments = self.store.comments_for_post(post_id, limit, offset).await?;

        let mut author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors: HashMap<Uuid, ProfileSummary> = self
            .profiles
            .get_profiles(&author_ids)
            .await?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();

        Ok(comments
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author_id).cloned();
                CommentView { comment, author }
            })
            .collect())
    }

    pub async fn comment_count(&self, post_id: Uuid) -> Result<i64> {
        self.post_author(post_id).await?;
        self.store.comment_count(post_id).await
    }
}

fn validate_body(body: &str) -> Result<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(
            "comment body cannot be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::Validation(format!(
            "comment body exceeds maximum length of {}",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(trimmed.to_string())
}

fn preview(body: &str) -> String {
    let mut out: String = body.chars().take(PREVIEW_CHARS).collect();
    if body.chars().count() > PREVIEW_CHARS {
        out.push_str("...");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_body_rejects_whitespace_only() {
        assert!(matches!(
            validate_body("   \n\t "),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn validate_body_trims() {
        assert_eq!(validate_body("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn validate_body_enforces_max_length() {
        let long = "x".repeat(MAX_COMMENT_CHARS + 1);
        assert!(matches!(
            validate_body(&long),
            Err(AppError::Validation(_))
        ));
        let max = "x".repeat(MAX_COMMENT_CHARS);
        assert!(validate_body(&max).is_ok());
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let long = "a".repeat(120);
        let p = preview(&long);
        assert_eq!(p.chars().count(), PREVIEW_CHARS + 3);
        assert!(p.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}

//! In-memory implementation of the storage traits
//!
//! Backs the test suite and local development without a database. Every
//! mutation runs under a single write lock, which also serializes the
//! read-modify-write of `toggle_like`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use super::traits::{EngagementStore, NotificationStore, ProfileStore, RelationshipStore};
use crate::error::{AppError, Result};
use crate::models::{Comment, Notification, Post, ProfileSummary, User};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    /// (follower, followed) -> insertion sequence
    follows: HashMap<(Uuid, Uuid), u64>,
    /// (post, user) -> insertion sequence
    likes: HashMap<(Uuid, Uuid), u64>,
    comments: HashMap<Uuid, Comment>,
    notifications: Vec<Notification>,
    seq: u64,
}

impl State {
    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| AppError::Internal("repository lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| AppError::Internal("repository lock poisoned".to_string()))
    }

    /// Seed a user and return its id (test/dev helper)
    pub fn add_user(&self, username: &str) -> Uuid {
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            full_name: None,
            avatar_url: None,
            bio: None,
            created_at: Utc::now(),
        };
        let id = user.id;
        if let Ok(mut state) = self.state.write() {
            state.users.insert(id, user);
        }
        id
    }

    /// Seed a post and return its id (test/dev helper)
    pub fn add_post(&self, author_id: Uuid) -> Uuid {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            caption: None,
            created_at: Utc::now(),
        };
        let id = post.id;
        if let Ok(mut state) = self.state.write() {
            state.posts.insert(id, post);
        }
        id
    }

    /// Remove a user record, leaving any edges pointing at it dangling
    /// (exercises the stale-reference tolerance of listings)
    pub fn remove_user(&self, user_id: Uuid) {
        if let Ok(mut state) = self.state.write() {
            state.users.remove(&user_id);
        }
    }
}

fn page(mut ids: Vec<(u64, Uuid)>, limit: i64, offset: i64, newest_first: bool) -> Vec<Uuid> {
    if newest_first {
        ids.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        ids.sort_by_key(|e| e.0);
    }
    ids.into_iter()
        .map(|(_, id)| id)
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl ProfileStore for MemoryRepository {
    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.read()?.users.contains_key(&user_id))
    }

    async fn get_profiles(&self, ids: &[Uuid]) -> Result<Vec<ProfileSummary>> {
        let state = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| {
                state.users.get(id).map(|u| ProfileSummary {
                    user_id: u.id,
                    username: u.username.clone(),
                    avatar_url: u.avatar_url.clone(),
                })
            })
            .collect())
    }

    async fn post_author(&self, post_id: Uuid) -> Result<Option<Uuid>> {
        Ok(self.read()?.posts.get(&post_id).map(|p| p.author_id))
    }
}

#[async_trait]
impl RelationshipStore for MemoryRepository {
    async fn insert_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let mut state = self.write()?;
        if state.follows.contains_key(&(follower_id, followed_id)) {
            return Ok(false);
        }
        let seq = state.next_seq();
        state.follows.insert((follower_id, followed_id), seq);
        Ok(true)
    }

    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        Ok(self
            .write()?
            .follows
            .remove(&(follower_id, followed_id))
            .is_some())
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        Ok(self
            .read()?
            .follows
            .contains_key(&(follower_id, followed_id)))
    }

    async fn follower_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .read()?
            .follows
            .keys()
            .filter(|(_, followed)| *followed == user_id)
            .count() as i64)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .read()?
            .follows
            .keys()
            .filter(|(follower, _)| *follower == user_id)
            .count() as i64)
    }

    async fn follower_ids(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>> {
        let entries: Vec<(u64, Uuid)> = self
            .read()?
            .follows
            .iter()
            .filter(|((_, followed), _)| *followed == user_id)
            .map(|((follower, _), seq)| (*seq, *follower))
            .collect();
        Ok(page(entries, limit, offset, true))
    }

    async fn following_ids(&self, user_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>> {
        let entries: Vec<(u64, Uuid)> = self
            .read()?
            .follows
            .iter()
            .filter(|((follower, _), _)| *follower == user_id)
            .map(|((_, followed), seq)| (*seq, *followed))
            .collect();
        Ok(page(entries, limit, offset, true))
    }
}

#[async_trait]
impl EngagementStore for MemoryRepository {
    async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let mut state = self.write()?;
        if state.likes.remove(&(post_id, user_id)).is_some() {
            Ok(false)
        } else {
            let seq = state.next_seq();
            state.likes.insert((post_id, user_id), seq);
            Ok(true)
        }
    }

    async fn is_liked(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.read()?.likes.contains_key(&(post_id, user_id)))
    }

    async fn like_count(&self, post_id: Uuid) -> Result<i64> {
        Ok(self
            .read()?
            .likes
            .keys()
            .filter(|(post, _)| *post == post_id)
            .count() as i64)
    }

    async fn liker_ids(&self, post_id: Uuid, limit: i64, offset: i64) -> Result<Vec<Uuid>> {
        let entries: Vec<(u64, Uuid)> = self
            .read()?
            .likes
            .iter()
            .filter(|((post, _), _)| *post == post_id)
            .map(|((_, user), seq)| (*seq, *user))
            .collect();
        Ok(page(entries, limit, offset, true))
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<()> {
        self.write()?
            .comments
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn get_comment(&self, comment_id: Uuid) -> Result<Option<Comment>> {
        Ok(self.read()?.comments.get(&comment_id).cloned())
    }

    async fn update_comment_body(
        &self,
        comment_id: Uuid,
        body: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(comment) = self.write()?.comments.get_mut(&comment_id) {
            comment.body = body.to_string();
            comment.edited = true;
            comment.updated_at = updated_at;
        }
        Ok(())
    }

    async fn delete_comment(&self, comment_id: Uuid) -> Result<()> {
        self.write()?.comments.remove(&comment_id);
        Ok(())
    }

    async fn comments_for_post(
        &self,
        post_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>> {
        let state = self.read()?;
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created_at);
        Ok(comments
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn comment_count(&self, post_id: Uuid) -> Result<i64> {
        Ok(self
            .read()?
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as i64)
    }
}

#[async_trait]
impl NotificationStore for MemoryRepository {
    async fn insert(&self, notification: &Notification) -> Result<()> {
        self.write()?.notifications.push(notification.clone());
        Ok(())
    }

    async fn get(&self, notification_id: Uuid) -> Result<Option<Notification>> {
        Ok(self
            .read()?
            .notifications
            .iter()
            .find(|n| n.id == notification_id)
            .cloned())
    }

    async fn for_recipient(
        &self,
        recipient_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>> {
        let state = self.read()?;
        Ok(state
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_id == recipient_id)
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn unread_for_recipient(&self, recipient_id: Uuid) -> Result<Vec<Notification>> {
        Ok(self
            .read()?
            .notifications
            .iter()
            .rev()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
            .cloned()
            .collect())
    }

    async fn unread_count(&self, recipient_id: Uuid) -> Result<i64> {
        Ok(self
            .read()?
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
            .count() as i64)
    }

    async fn mark_read(&self, notification_id: Uuid) -> Result<()> {
        if let Some(n) = self
            .write()?
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
        {
            n.read = true;
        }
        Ok(())
    }

    async fn mark_all_read(&self, recipient_id: Uuid) -> Result<u64> {
        let mut flipped = 0;
        for n in self
            .write()?
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.read)
        {
            n.read = true;
            flipped += 1;
        }
        Ok(flipped)
    }

    async fn mark_viewed(&self, notification_ids: &[Uuid]) -> Result<()> {
        let mut state = self.write()?;
        for n in state.notifications.iter_mut() {
            if notification_ids.contains(&n.id) {
                n.viewed = true;
            }
        }
        Ok(())
    }

    async fn delete(&self, notification_id: Uuid) -> Result<()> {
        self.write()?.notifications.retain(|n| n.id != notification_id);
        Ok(())
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Compact user representation embedded in follower/comment listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ProfileSummary {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Notification type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// User liked a post
    Like,
    /// User commented on a post
    Comment,
    /// User started following
    Follow,
    /// Community activity
    Community,
    /// System notification
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Comment => "comment",
            NotificationKind::Follow => "follow",
            NotificationKind::Community => "community",
            NotificationKind::System => "system",
        }
    }

    /// Parse a stored kind; unknown values degrade to `System`
    pub fn parse(s: &str) -> Self {
        match s {
            "like" => NotificationKind::Like,
            "comment" => NotificationKind::Comment,
            "follow" => NotificationKind::Follow,
            "community" => NotificationKind::Community,
            _ => NotificationKind::System,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub related_item_id: Option<Uuid>,
    pub triggered_by: Option<Uuid>,
    pub triggered_by_username: Option<String>,
    pub read: bool,
    pub viewed: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        recipient_id: Uuid,
        kind: NotificationKind,
        message: String,
        related_item_id: Option<Uuid>,
        triggered_by: Option<Uuid>,
        triggered_by_username: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient_id,
            kind,
            message,
            related_item_id,
            triggered_by,
            triggered_by_username,
            read: false,
            viewed: false,
            created_at: Utc::now(),
        }
    }
}

/// Follower/following counts for a profile header
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationshipCounts {
    pub follower_count: i64,
    pub following_count: i64,
}

/// Outcome of a follow/unfollow mutation: both parties' fresh counts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowOutcome {
    /// Target's follower count after the mutation
    pub follower_count: i64,
    /// Actor's following count after the mutation
    pub following_count: i64,
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeStatus {
    pub liked: bool,
    pub like_count: i64,
}

/// Comment enriched with its author's summary for listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: Option<ProfileSummary>,
}

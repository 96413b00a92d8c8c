//! Notification dispatch and recipient-side lifecycle
//!
//! Notifications are only ever created as a side effect of another mutation.
//! Callers are responsible for the no-self-notification guard: the dispatcher
//! does not filter `recipient == triggered_by` and must simply never be
//! invoked for that case.

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::metrics;
use crate::models::{Notification, NotificationKind};
use crate::repository::NotificationStore;

pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// Durably record a notification for `recipient_id`
    pub async fn emit(
        &self,
        recipient_id: Uuid,
        kind: NotificationKind,
        message: String,
        related_item_id: Option<Uuid>,
        triggered_by: Option<Uuid>,
        triggered_by_username: Option<String>,
    ) -> Result<Notification> {
        let notification = Notification::new(
            recipient_id,
            kind,
            message,
            related_item_id,
            triggered_by,
            triggered_by_username,
        );
        self.store.insert(&notification).await?;
        metrics::record_notification_emitted(kind.as_str());
        debug!(
            recipient = %recipient_id,
            kind = kind.as_str(),
            "notification emitted"
        );
        Ok(notification)
    }

    /// Newest-first page of the recipient's notifications.
    ///
    /// Opening the list is what flips the viewed axis: every returned
    /// notification is marked viewed as a side effect.
    pub async fn list(
        &self,
        recipient_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Notification>> {
        let mut notifications = self.store.for_recipient(recipient_id, limit, offset).await?;
        let unviewed: Vec<Uuid> = notifications
            .iter()
            .filter(|n| !n.viewed)
            .map(|n| n.id)
            .collect();
        self.store.mark_viewed(&unviewed).await?;
        for n in notifications.iter_mut() {
            n.viewed = true;
        }
        Ok(notifications)
    }

    pub async fn list_unread(&self, recipient_id: Uuid) -> Result<Vec<Notification>> {
        self.store.unread_for_recipient(recipient_id).await
    }

    pub async fn unread_count(&self, recipient_id: Uuid) -> Result<i64> {
        self.store.unread_count(recipient_id).await
    }

    /// One-way Unread -> Read, recipient only
    pub async fn mark_read(&self, notification_id: Uuid, actor_id: Uuid) -> Result<Notification> {
        let mut notification = self
            .store
            .get(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("notification not found".to_string()))?;
        if notification.recipient_id != actor_id {
            return Err(AppError::Forbidden(
                "only the recipient can mark a notification read".to_string(),
            ));
        }
        self.store.mark_read(notification_id).await?;
        notification.read = true;
        Ok(notification)
    }

    /// Returns how many notifications were flipped
    pub async fn mark_all_read(&self, recipient_id: Uuid) -> Result<u64> {
        self.store.mark_all_read(recipient_id).await
    }

    pub async fn delete(&self, notification_id: Uuid, actor_id: Uuid) -> Result<()> {
        let notification = self
            .store
            .get(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound("notification not found".to_string()))?;
        if notification.recipient_id != actor_id {
            return Err(AppError::Forbidden(
                "only the recipient can delete a notification".to_string(),
            ));
        }
        self.store.delete(notification_id).await
    }
}

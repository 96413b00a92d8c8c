//! Central application state
//!
//! The only place where storage implementations are wired into services.
//! Components receive their stores and the notification dispatcher at
//! construction; there is no ambient global state.

use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::repository::{
    EngagementStore, MemoryRepository, NotificationStore, PostgresRepository, ProfileStore,
    RelationshipStore,
};
use crate::services::{EngagementService, NotificationDispatcher, RelationshipService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relationships: Arc<RelationshipService>,
    pub engagement: Arc<EngagementService>,
    pub notifications: Arc<NotificationDispatcher>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        profiles: Arc<dyn ProfileStore>,
        graph: Arc<dyn RelationshipStore>,
        engagement_store: Arc<dyn EngagementStore>,
        notification_store: Arc<dyn NotificationStore>,
    ) -> Self {
        let notifications = Arc::new(NotificationDispatcher::new(notification_store));
        let relationships = Arc::new(RelationshipService::new(
            graph,
            profiles.clone(),
            notifications.clone(),
        ));
        let engagement = Arc::new(EngagementService::new(
            engagement_store,
            profiles,
            notifications.clone(),
        ));

        Self {
            config,
            relationships,
            engagement,
            notifications,
        }
    }

    /// Production wiring: one PostgreSQL repository behind every store trait
    pub fn with_postgres(config: Arc<Config>, pool: PgPool) -> Self {
        let repo = Arc::new(PostgresRepository::new(pool));
        Self::new(
            config,
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo,
        )
    }

    /// Test/dev wiring against the in-memory repository
    pub fn with_memory(config: Arc<Config>, repo: Arc<MemoryRepository>) -> Self {
        Self::new(
            config,
            repo.clone(),
            repo.clone(),
            repo.clone(),
            repo,
        )
    }
}

#![allow(dead_code)]

use std::sync::Arc;

use engagement_service::config::{AppConfig, Config, DatabaseConfig, JwtConfig};
use engagement_service::repository::MemoryRepository;
use engagement_service::AppState;

pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        app: AppConfig {
            env: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
        },
    })
}

/// AppState wired against the in-memory repository, plus a handle to the
/// repository for seeding users and posts.
pub fn test_state() -> (AppState, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::new());
    let state = AppState::with_memory(test_config(), repo.clone());
    (state, repo)
}

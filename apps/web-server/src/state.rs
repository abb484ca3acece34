//! Application state - shared across all handlers.

use std::sync::Arc;

use yatube_core::ports::{
    Cache, GroupRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use yatube_infra::auth::{Argon2PasswordService, JwtSessionService};
use yatube_infra::cache::InMemoryCache;
use yatube_infra::database::InMemoryStore;

use crate::config::AppConfig;
use crate::render::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub cache: Arc<dyn Cache>,
    pub sessions: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = config.database.as_ref() {
            use yatube_infra::database::{
                PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository, connect,
            };

            match connect(db_config).await {
                Ok(conn) => {
                    let state = Self::with_repositories(
                        Arc::new(PostgresUserRepository::new(conn.clone())),
                        Arc::new(PostgresGroupRepository::new(conn.clone())),
                        Arc::new(PostgresPostRepository::new(conn)),
                    );
                    tracing::info!("Application state initialized (postgres)");
                    return state;
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        let state = Self::in_memory(InMemoryStore::new());
        tracing::info!("Application state initialized (in-memory)");
        state
    }

    /// State over a shared in-memory store; also the harness for route tests.
    pub fn in_memory(store: InMemoryStore) -> Self {
        Self::with_repositories(
            Arc::new(store.users()),
            Arc::new(store.groups()),
            Arc::new(store.posts()),
        )
    }

    fn with_repositories(
        users: Arc<dyn UserRepository>,
        groups: Arc<dyn GroupRepository>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        let templates = Templates::new().expect("templates are embedded and must parse");

        Self {
            users,
            groups,
            posts,
            cache: Arc::new(InMemoryCache::new()),
            sessions: Arc::new(JwtSessionService::from_env()),
            passwords: Arc::new(Argon2PasswordService::new()),
            templates: Arc::new(templates),
        }
    }
}

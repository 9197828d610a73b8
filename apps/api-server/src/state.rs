//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    PasswordService, PostRepository, RateLimiter, TokenService, UserRepository,
};
use quill_core::rules::{PublishPolicy, PublishRule};
use quill_core::services::{AccountService, FeedAssembler, PostService};
use quill_infra::{
    Argon2PasswordService, InMemoryPostRepository, InMemoryUserRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use quill_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use quill_infra::database::{PostgresPostRepository, PostgresUserRepository};

use crate::config::AppConfig;

/// Where posts and users live.
#[derive(Clone)]
pub enum Storage {
    #[cfg(feature = "postgres")]
    Postgres(Arc<DatabaseConnections>),
    InMemory,
}

impl Storage {
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            Storage::Postgres(_) => "postgres",
            Storage::InMemory => "in-memory",
        }
    }

    /// Whether the backing store answers.
    pub async fn is_healthy(&self) -> bool {
        match self {
            #[cfg(feature = "postgres")]
            Storage::Postgres(db) => match db.ping().await {
                Ok(()) => true,
                Err(e) => {
                    tracing::error!("Database ping failed: {}", e);
                    false
                }
            },
            Storage::InMemory => true,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub accounts: Arc<AccountService>,
    pub posts: Arc<PostService>,
    pub feeds: Arc<FeedAssembler>,
    pub tokens: Arc<dyn TokenService>,
    pub rate_limiter: Option<Arc<dyn RateLimiter>>,
    pub storage: Storage,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
        let (users, posts, storage) = Self::repositories(config).await;

        let state = Self::from_parts(users, posts, tokens, passwords, config.publish_policy)
            .with_storage(storage);

        #[cfg(feature = "rate-limit")]
        let state = if config.rate_limit_enabled {
            state.with_rate_limiter(Arc::new(quill_infra::InMemoryRateLimiter::from_env()))
        } else {
            state
        };

        tracing::info!(
            storage = state.storage.name(),
            publish_policy = ?config.publish_policy,
            rate_limited = state.rate_limiter.is_some(),
            "Application state initialized"
        );
        state
    }

    /// Wire services over the given ports. Storage defaults to in-memory.
    pub fn from_parts(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        policy: PublishPolicy,
    ) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(users.clone(), passwords, tokens.clone())),
            posts: Arc::new(PostService::new(posts.clone(), PublishRule::new(policy))),
            feeds: Arc::new(FeedAssembler::new(posts)),
            users,
            tokens,
            rate_limiter: None,
            storage: Storage::InMemory,
        }
    }

    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    #[cfg(feature = "postgres")]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>, Storage) {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::in_memory();
        };

        match DatabaseConnections::init(db_config).await {
            Ok(connections) => {
                let conn = Arc::new(connections);
                (
                    Arc::new(PostgresUserRepository::new(conn.main.clone())),
                    Arc::new(PostgresPostRepository::new(conn.main.clone())),
                    Storage::Postgres(conn),
                )
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(
        config: &AppConfig,
    ) -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>, Storage) {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        Self::in_memory()
    }

    fn in_memory() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>, Storage) {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Storage::InMemory,
        )
    }
}

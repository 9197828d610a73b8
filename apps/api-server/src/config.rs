//! Application configuration loaded from environment variables.

use std::env;

use quill_core::rules::PublishPolicy;
use quill_infra::DatabaseConfig;
use quill_infra::JwtConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server over in-memory storage.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub rate_limit_enabled: bool,
    pub publish_policy: PublishPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            rate_limit_enabled: env::var("RATE_LIMIT_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
            publish_policy: Self::parse_publish_policy(env::var("PUBLISH_POLICY").ok()),
        }
    }

    /// `PUBLISH_POLICY=first|every`; anything unrecognised falls back to the default.
    fn parse_publish_policy(raw: Option<String>) -> PublishPolicy {
        match raw.map(|v| v.parse::<PublishPolicy>()) {
            None => PublishPolicy::default(),
            Some(Ok(policy)) => policy,
            Some(Err(e)) => {
                tracing::warn!("{}; using the default publish policy", e);
                PublishPolicy::default()
            }
        }
    }
}

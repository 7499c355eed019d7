use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl DatabaseConfig {
    /// Read connection settings, failing fast when DATABASE_URL is absent.
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))?;

        // A mentorship deployment serves a handful of concurrent callers;
        // the pool stays small unless overridden.
        let max_connections = pool_setting(env::var("DB_MAX_CONNECTIONS").ok(), 5);
        let min_connections = pool_setting(env::var("DB_MIN_CONNECTIONS").ok(), 1);

        Ok(Self {
            url,
            max_connections,
            min_connections,
        })
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true);

        Database::connect(opt).await
    }
}

fn pool_setting(value: Option<String>, default: u32) -> u32 {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_setting_defaults_when_unset() {
        assert_eq!(pool_setting(None, 5), 5);
    }

    #[test]
    fn pool_setting_parses_override() {
        assert_eq!(pool_setting(Some("12".to_string()), 5), 12);
    }

    #[test]
    fn pool_setting_ignores_garbage() {
        assert_eq!(pool_setting(Some("not-a-number".to_string()), 1), 1);
    }
}

use std::time::Duration;

/// Database settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long a call may wait for a pooled connection
    pub acquire_timeout: Duration,
    /// Upper bound for a single repository call
    pub query_timeout: Duration,
}

impl DatabaseConfig {
    /// A private in-memory database, used by tests and throwaway runs
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            query_timeout: Duration::from_secs(5),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let db_path = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("DB_PATH"))
            .unwrap_or_else(|_| "sqlite:./sagrada.db".to_string());

        // Ensure path has sqlite: prefix
        let url = if db_path.starts_with("sqlite:") {
            db_path
        } else {
            format!("sqlite:{}", db_path)
        };

        let database = DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 5),
            acquire_timeout: Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 5)),
            query_timeout: Duration::from_millis(env_or("DB_QUERY_TIMEOUT_MS", 5000)),
        };

        Self {
            database,
            port: env_or("PORT", 9999),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}

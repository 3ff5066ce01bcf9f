//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use common::{DatabaseConfig, ReferrerConfig};
use domain::CredentialScheme;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_DB_CONNECT_TIMEOUT_MS, DEFAULT_DB_IDLE_TIMEOUT_MS,
    DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_REFERRER_LOOKUP_TIMEOUT_MS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Primary account store (Postgres)
    pub database: DatabaseConfig,
    /// 3K directory (MySQL); `None` when not configured
    pub three_k_database: Option<DatabaseConfig>,
    pub referrer: ReferrerConfig,
    /// Scheme used when writing new credentials
    pub password_storage: CredentialScheme,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL")
                .or_else(|_| env::var("POSTGRES_URL"))
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(DEFAULT_DB_MIN_CONNECTIONS),
            connect_timeout_ms: parse_var("DB_CONNECT_TIMEOUT_MS")
                .unwrap_or(DEFAULT_DB_CONNECT_TIMEOUT_MS),
            idle_timeout_ms: parse_var("DB_IDLE_TIMEOUT_MS").unwrap_or(DEFAULT_DB_IDLE_TIMEOUT_MS),
            lazy: false,
        };

        // The 3K directory is optional and must not block startup.
        let three_k_database = env::var("THREE_K_DATABASE_URL")
            .or_else(|_| env::var("MYSQL_URL"))
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                lazy: true,
                ..database.with_url(url)
            });

        let password_storage = match env::var("PASSWORD_STORAGE") {
            Ok(value) => CredentialScheme::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown PASSWORD_STORAGE '{}', using plaintext", value);
                CredentialScheme::Plaintext
            }),
            Err(_) => CredentialScheme::Plaintext,
        };

        if password_storage == CredentialScheme::Plaintext {
            tracing::warn!("Credentials are stored and compared in plaintext (legacy mode)");
        }

        Self {
            database,
            three_k_database,
            referrer: ReferrerConfig {
                lookup_timeout_ms: parse_var("REFERRER_LOOKUP_TIMEOUT_MS")
                    .unwrap_or(DEFAULT_REFERRER_LOOKUP_TIMEOUT_MS),
            },
            password_storage,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_var("SERVER_PORT").unwrap_or(DEFAULT_SERVER_PORT),
        }
    }

    /// Per-lookup timeout of the referrer flow.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.referrer.lookup_timeout_ms)
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Apply `serve --host/--port` on top of the environment.
    pub fn override_server(&mut self, host: Option<String>, port: Option<u16>) {
        if let Some(host) = host {
            self.server_host = host;
        }
        if let Some(port) = port {
            self.server_port = port;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            three_k_database: None,
            referrer: ReferrerConfig::default(),
            password_storage: CredentialScheme::Plaintext,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeouts() {
        let config = Config::default();
        assert_eq!(config.lookup_timeout(), Duration::from_millis(5000));
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.database.connect_timeout_ms, 2000);
    }

    #[test]
    fn test_debug_redacts_urls() {
        let mut config = Config::default();
        config.database.url = "postgres://admin:s3cret@db/referral".to_string();
        assert!(!format!("{:?}", config).contains("s3cret"));
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(Config::default().server_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_cli_flags_override_server_address() {
        let mut config = Config::default();
        config.override_server(None, Some(8080));
        assert_eq!(config.server_addr(), "0.0.0.0:8080");

        config.override_server(Some("127.0.0.1".to_string()), None);
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}

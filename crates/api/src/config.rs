use std::str::FromStr;
use std::time::Duration;

use catalog_db::{PoolSettings, RetryPolicy};

/// Configuration errors reported at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set")]
    Missing { name: &'static str },

    #[error("{name} has invalid value '{value}': expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Deployment environment. Error details are only exposed in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for in-flight requests to drain on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `3001`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                    |
    /// | `APP_ENV`               | `development`           |
    /// | `LOG_FORMAT`            | `text`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_var(&lookup, "PORT", 3001, "a port number")?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs =
            parse_var(&lookup, "REQUEST_TIMEOUT_SECS", 30, "a number of seconds")?;
        let shutdown_timeout_secs =
            parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", 30, "a number of seconds")?;
        let environment = parse_var(
            &lookup,
            "APP_ENV",
            Environment::Development,
            "development, test or production",
        )?;
        let log_format = parse_var(&lookup, "LOG_FORMAT", LogFormat::Text, "text or json")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            environment,
            log_format,
        })
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool: PoolSettings,
    pub retry: RetryPolicy,
}

impl DatabaseConfig {
    /// Load database settings from environment variables.
    ///
    /// | Env Var                     | Default    |
    /// |-----------------------------|------------|
    /// | `DATABASE_URL`              | (required) |
    /// | `DB_MAX_CONNECTIONS`        | `20`       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`   | `5`        |
    /// | `DB_CONNECT_RETRIES`        | `30`       |
    /// | `DB_CONNECT_RETRY_DELAY_MS` | `2000`     |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing {
                name: "DATABASE_URL",
            })?;

        let max_connections = parse_var(&lookup, "DB_MAX_CONNECTIONS", 20, "a positive integer")?;
        let acquire_timeout_secs =
            parse_var(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5, "a number of seconds")?;
        let attempts = parse_var(&lookup, "DB_CONNECT_RETRIES", 30, "a positive integer")?;
        let delay_ms =
            parse_var(&lookup, "DB_CONNECT_RETRY_DELAY_MS", 2000, "a number of milliseconds")?;

        Ok(Self {
            url,
            pool: PoolSettings {
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            },
            retry: RetryPolicy {
                attempts,
                delay: Duration::from_millis(delay_ms),
            },
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset or blank.
fn parse_var<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| ConfigError::Invalid {
                name,
                value,
                expected,
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = ServerConfig::from_lookup(lookup(&[(
            "CORS_ORIGINS",
            "http://a.test, http://b.test,,",
        )]))
        .unwrap();

        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn environment_and_log_format_are_parsed() {
        let config =
            ServerConfig::from_lookup(lookup(&[("APP_ENV", "PROD"), ("LOG_FORMAT", "json")]))
                .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert!(!config.environment.is_development());
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_fail_with_the_variable_name() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();

        assert_matches!(err, ConfigError::Invalid { name: "PORT", .. });
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn database_url_is_required() {
        assert_matches!(
            DatabaseConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing { name: "DATABASE_URL" })
        );
    }

    #[test]
    fn database_settings_have_defaults() {
        let config =
            DatabaseConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/catalog")]))
                .unwrap();

        assert_eq!(config.pool.max_connections, 20);
        assert_eq!(config.pool.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.retry.attempts, 30);
        assert_eq!(config.retry.delay, Duration::from_millis(2000));
    }
}

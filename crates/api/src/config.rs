use axum::http::HeaderValue;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on draining the database pool at shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// PostgreSQL URL. Without one the server keeps documents in memory.
    pub database_url: Option<String>,
    /// Pool size (default: `20`).
    pub db_max_connections: u32,
    /// `pretty` (default) or `json`.
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `DATABASE_URL`         | unset (in-memory store)    |
    /// | `DB_MAX_CONNECTIONS`   | `20`                       |
    /// | `LOG_FORMAT`           | `pretty`                   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = parse_var(&lookup, "PORT", "u16", 3000u16)?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "origin",
                    value: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = parse_var(&lookup, "REQUEST_TIMEOUT_SECS", "u64", 30u64)?;
        let shutdown_timeout_secs = parse_var(&lookup, "SHUTDOWN_TIMEOUT_SECS", "u64", 30u64)?;

        let database_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let db_max_connections = parse_var(
            &lookup,
            "DB_MAX_CONNECTIONS",
            "u32",
            wiki_db::DEFAULT_MAX_CONNECTIONS,
        )?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "log format (pretty|json)",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            database_url,
            db_max_connections,
            log_format,
        })
    }
}

fn parse_var<F, T>(
    lookup: &F,
    var: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_origins, vec![HeaderValue::from_static("http://localhost:5173")]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 30);
        assert_eq!(config.database_url, None);
        assert_eq!(config.db_max_connections, 20);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = load(&[
            ("PORT", "8080"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("DATABASE_URL", "postgres://localhost/wiki"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/wiki"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_matches!(
            load(&[("PORT", "not-a-port")]),
            Err(ConfigError::Invalid { var: "PORT", .. })
        );
    }

    #[test]
    fn invalid_log_format_is_rejected() {
        assert_matches!(
            load(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid { var: "LOG_FORMAT", .. })
        );
    }
}

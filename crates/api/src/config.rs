use std::str::FromStr;

use axum::http::HeaderValue;

/// Failure to load [`ServerConfig`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigins {
    /// `CORS_ORIGINS=*`: any origin, without credentials.
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Parsed from the comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Pool size (default: `20`).
    pub database_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default |
    /// |----------------------------|---------|
    /// | `HOST`                     | `0.0.0.0` |
    /// | `PORT`                     | `8000`  |
    /// | `CORS_ORIGINS`             | `*`     |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`    |
    /// | `DATABASE_URL`             | required |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`    |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_var("PORT", 8000)?;
        let cors_origins = parse_cors_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".into()),
        )?;
        let request_timeout_secs = parse_var("REQUEST_TIMEOUT_SECS", 30)?;
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        let database_max_connections = parse_var("DATABASE_MAX_CONNECTIONS", 20)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            database_max_connections,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        Err(_) => Ok(default),
    }
}

/// Parse a comma-separated origin list. A lone `*` allows any origin.
pub fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let entries: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.is_empty() || entries == ["*"] {
        return Ok(CorsOrigins::Any);
    }

    entries
        .into_iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn star_means_any_origin() {
        assert_eq!(parse_cors_origins("*").unwrap(), CorsOrigins::Any);
        assert_eq!(parse_cors_origins("").unwrap(), CorsOrigins::Any);
    }

    #[test]
    fn origin_list_is_trimmed() {
        let origins = parse_cors_origins("http://a.test, http://b.test ,").unwrap();
        assert_eq!(
            origins,
            CorsOrigins::List(vec![
                HeaderValue::from_static("http://a.test"),
                HeaderValue::from_static("http://b.test"),
            ])
        );
    }

    #[test]
    fn invalid_origin_is_rejected() {
        assert_matches!(
            parse_cors_origins("http://ok.test,bad\norigin"),
            Err(ConfigError::Invalid { var: "CORS_ORIGINS", .. })
        );
    }
}

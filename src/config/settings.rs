//! Runtime settings read from the environment (`.env` is loaded by the binary).

use crate::error::ConfigError;
use axum::http::HeaderValue;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/survey";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Which store backs the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    /// In-process store; contents are lost on exit.
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub cors_origins: CorsOrigins,
    /// Maximum accepted request body in bytes.
    pub body_limit: usize,
    pub store: StoreKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            cors_origins: CorsOrigins::Any,
            body_limit: DEFAULT_BODY_LIMIT,
            store: StoreKind::Postgres,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset or blank keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                message: e.to_string(),
            })?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    key: "DATABASE_MAX_CONNECTIONS",
                    message: format!("expected a positive integer, got '{}'", v),
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let body_limit = match get("REQUEST_BODY_LIMIT") {
            Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "REQUEST_BODY_LIMIT",
                message: e.to_string(),
            })?,
            None => DEFAULT_BODY_LIMIT,
        };

        let cors_origins = match get("CORS_ALLOWED_ORIGINS") {
            None => CorsOrigins::Any,
            Some(v) => parse_origins(&v)?,
        };

        let store = match get("SURVEY_STORE") {
            None => StoreKind::Postgres,
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" => StoreKind::Postgres,
                "memory" => StoreKind::Memory,
                other => {
                    return Err(ConfigError::Invalid {
                        key: "SURVEY_STORE",
                        message: format!("expected 'postgres' or 'memory', got '{}'", other),
                    })
                }
            },
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
            cors_origins,
            body_limit,
            store,
        })
    }
}

fn parse_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let mut origins = Vec::new();
    for origin in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if origin == "*" {
            return Ok(CorsOrigins::Any);
        }
        let value = HeaderValue::from_str(origin).map_err(|_| ConfigError::Invalid {
            key: "CORS_ALLOWED_ORIGINS",
            message: format!("invalid origin '{}'", origin),
        })?;
        origins.push(value);
    }
    if origins.is_empty() {
        return Ok(CorsOrigins::Any);
    }
    Ok(CorsOrigins::List(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.max_connections, 5);
        assert_eq!(s.cors_origins, CorsOrigins::Any);
        assert_eq!(s.body_limit, DEFAULT_BODY_LIMIT);
        assert_eq!(s.store, StoreKind::Postgres);
    }

    #[test]
    fn reads_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db:5432/surveys"),
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("CORS_ALLOWED_ORIGINS", "http://localhost:5173, https://dash.example.com"),
            ("REQUEST_BODY_LIMIT", "1024"),
            ("SURVEY_STORE", "Memory"),
        ]))
        .unwrap();
        assert_eq!(s.database_url, "postgres://db:5432/surveys");
        assert_eq!(s.bind_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.body_limit, 1024);
        assert_eq!(s.store, StoreKind::Memory);
        match s.cors_origins {
            CorsOrigins::List(list) => {
                assert_eq!(list.len(), 2);
                assert_eq!(list[0], "http://localhost:5173");
            }
            CorsOrigins::Any => panic!("expected explicit origins"),
        }
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let s = Settings::from_lookup(lookup(&[("BIND_ADDR", "  "), ("CORS_ALLOWED_ORIGINS", "*")])).unwrap();
        assert_eq!(s.bind_addr.port(), 8080);
        assert_eq!(s.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn wildcard_in_origin_list_allows_any() {
        let s = Settings::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "http://a.test, *")])).unwrap();
        assert_eq!(s.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn rejects_invalid_values() {
        let err = Settings::from_lookup(lookup(&[("DATABASE_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_MAX_CONNECTIONS"));

        let err = Settings::from_lookup(lookup(&[("BIND_ADDR", "not-an-addr")])).unwrap_err();
        assert!(err.to_string().contains("BIND_ADDR"));

        let err = Settings::from_lookup(lookup(&[("SURVEY_STORE", "redis")])).unwrap_err();
        assert!(err.to_string().contains("SURVEY_STORE"));
    }
}

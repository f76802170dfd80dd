//! Server configuration read from environment variables.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `PostgreSQL` connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Bind host (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default `3000`).
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`, default `10`).
    pub max_connections: u32,
    /// Allowed browser origin (`CLIENT_URL`). Permissive CORS when unset.
    pub client_url: Option<String>,
    /// OTLP collector endpoint (`OTEL_EXPORTER_OTLP_ENDPOINT`).
    pub otlp_endpoint: Option<String>,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a numeric
    /// variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Config("DATABASE_URL environment variable must be set".into()))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = lookup("PORT")
            .map(|v| v.parse::<u16>())
            .transpose()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?
            .unwrap_or(3000);
        let max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .map(|v| v.parse::<u32>())
            .transpose()
            .map_err(|e| AppError::Config(format!("DATABASE_MAX_CONNECTIONS must be a valid u32: {e}")))?
            .unwrap_or(10);

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            client_url: lookup("CLIENT_URL").filter(|v| !v.is_empty()),
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty()),
        })
    }

    /// Returns the `HOST:PORT` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the CORS layer: restricted to `client_url` when set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `CLIENT_URL` is not a valid header value.
    pub fn cors_layer(&self) -> Result<CorsLayer, AppError> {
        let Some(origin) = &self.client_url else {
            return Ok(CorsLayer::permissive());
        };
        let origin = HeaderValue::from_str(origin)
            .map_err(|e| AppError::Config(format!("CLIENT_URL is not a valid origin: {e}")))?;
        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_apply_when_only_database_url_is_set() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/lectern")]))
                .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert!(config.client_url.is_none());
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_database_url_is_a_config_error() {
        let result = ServerConfig::from_lookup(lookup(&[("PORT", "8080")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_invalid_port_is_a_config_error() {
        let result = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/lectern"),
            ("PORT", "eighty"),
        ]));

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("PORT")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides_are_read() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/lectern"),
            ("HOST", "127.0.0.1"),
            ("PORT", "5000"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("CLIENT_URL", "http://localhost:5173"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.max_connections, 4);
        assert_eq!(config.client_url.as_deref(), Some("http://localhost:5173"));
        assert!(config.cors_layer().is_ok());
    }
}

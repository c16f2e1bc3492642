// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and injected
//! into the application state. Nothing else in the codebase reads process
//! environment variables, so tests construct [`AppConfig`] directly with
//! fixed values.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `APP_ENV` | Deployment environment (`development`, `production`, `test`) | `development` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_SECRET` | Secret for session-token verification | Required |
//! | `FRONTEND_URL` | Allowed CORS origin | Optional (permissive if unset) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! Validation collects every problem before failing, so a misconfigured
//! deployment reports all missing or malformed variables in one pass.

use std::env;

use axum::http::HeaderValue;
use thiserror::Error;

/// Name of the environment variable holding the session-token secret.
pub const AUTH_SECRET_ENV: &str = "AUTH_SECRET";

/// Deployment environment.
///
/// Controls error-message verbosity (production hides raw database driver
/// messages) and log suppression (test keeps output clean).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Local development: verbose error messages, pretty logs.
    Development,
    /// Production: raw driver messages are never surfaced to clients.
    Production,
    /// Test: server-side error logging is suppressed.
    Test,
}

impl Environment {
    /// Parse an environment name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" => Some(Environment::Production),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Deployment environment.
    pub environment: Environment,
    /// Server bind address.
    pub host: String,
    /// Server bind port.
    pub port: u16,
    /// Secret used to derive the session-token verification key.
    pub auth_secret: String,
    /// Allowed CORS origin for the storefront frontend.
    pub frontend_url: Option<HeaderValue>,
}

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more environment variables failed validation.
    #[error("invalid configuration: {}", .issues.join("; "))]
    Invalid {
        /// One human-readable line per offending variable.
        issues: Vec<String>,
    },
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// All validation issues are collected before returning an error, so the
    /// operator sees every misconfigured variable at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut issues = Vec::new();

        let environment = match lookup("APP_ENV") {
            Some(value) => match Environment::parse(&value) {
                Some(environment) => environment,
                None => {
                    issues.push(format!(
                        "APP_ENV: unrecognized environment `{value}` (expected development, production, or test)"
                    ));
                    Environment::Development
                }
            },
            None => Environment::Development,
        };

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(value) => match value.parse::<u16>() {
                Ok(port) => port,
                Err(_) => {
                    issues.push(format!("PORT: `{value}` is not a valid port number"));
                    0
                }
            },
            None => 8080,
        };

        let auth_secret = match lookup(AUTH_SECRET_ENV) {
            Some(secret) if !secret.is_empty() => secret,
            Some(_) => {
                issues.push(format!("{AUTH_SECRET_ENV}: must not be empty"));
                String::new()
            }
            None => {
                issues.push(format!("{AUTH_SECRET_ENV}: required but not set"));
                String::new()
            }
        };

        let frontend_url = match lookup("FRONTEND_URL") {
            Some(value) => match value.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    issues.push(format!("FRONTEND_URL: `{value}` is not a valid origin"));
                    None
                }
            },
            None => None,
        };

        if !issues.is_empty() {
            return Err(ConfigError::Invalid { issues });
        }

        Ok(Self {
            environment,
            host,
            port,
            auth_secret,
            frontend_url,
        })
    }
}

#[cfg(test)]
impl AppConfig {
    /// Fixed configuration for deterministic tests.
    pub fn for_tests(environment: Environment) -> Self {
        Self {
            environment,
            host: "127.0.0.1".to_string(),
            port: 0,
            auth_secret: "test-secret".to_string(),
            frontend_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn minimal_configuration_uses_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[("AUTH_SECRET", "s3cret")]))
            .expect("valid configuration");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth_secret, "s3cret");
        assert!(config.frontend_url.is_none());
    }

    #[test]
    fn all_issues_are_collected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "staging"),
            ("PORT", "eighty"),
        ]))
        .expect_err("configuration must fail");

        let ConfigError::Invalid { issues } = err;
        assert_eq!(issues.len(), 3);
        assert!(issues[0].contains("APP_ENV"));
        assert!(issues[1].contains("PORT"));
        assert!(issues[2].contains("AUTH_SECRET"));
    }

    #[test]
    fn production_environment_parses() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("APP_ENV", "production"),
            ("AUTH_SECRET", "s3cret"),
            ("FRONTEND_URL", "https://shop.example.com"),
        ]))
        .expect("valid configuration");
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(
            config.frontend_url,
            Some(HeaderValue::from_static("https://shop.example.com"))
        );
    }

    #[test]
    fn environment_parse_is_case_insensitive() {
        assert_eq!(Environment::parse("TEST"), Some(Environment::Test));
        assert_eq!(Environment::parse("Dev"), Some(Environment::Development));
        assert_eq!(Environment::parse("staging"), None);
    }
}

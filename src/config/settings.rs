//! Application settings loaded from environment variables.

use std::env;

use url::Url;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_MEDIA_URL,
    DEFAULT_PUBLIC_BASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Fallback origin for absolute resource URLs
    pub public_base_url: String,
    /// URL prefix for uploaded files, always ending in `/`
    pub media_url: String,
    /// Host names a request's `Host` header may name, lowercase
    pub allowed_hosts: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("public_base_url", &self.public_base_url)
            .field("media_url", &self.media_url)
            .field("allowed_hosts", &self.allowed_hosts)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if JWT_SECRET is not set in release builds or is too short.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        });

        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let public_base_url =
            env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.to_string());
        let allowed_hosts = match env::var("ALLOWED_HOSTS") {
            Ok(raw) => parse_allowed_hosts(&raw),
            Err(_) => default_allowed_hosts(&public_base_url),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            public_base_url,
            media_url: normalize_media_url(
                &env::var("MEDIA_URL").unwrap_or_else(|_| DEFAULT_MEDIA_URL.to_string()),
            ),
            allowed_hosts,
        }
    }

    /// Build a configuration directly (tests and embedding).
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_expiration_hours: DEFAULT_JWT_EXPIRATION_HOURS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
            media_url: DEFAULT_MEDIA_URL.to_string(),
            allowed_hosts: default_allowed_hosts(DEFAULT_PUBLIC_BASE_URL),
        }
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// Parse the public base URL.
    pub fn public_base(&self) -> AppResult<Url> {
        Url::parse(&self.public_base_url).map_err(|e| {
            AppError::internal(format!(
                "PUBLIC_BASE_URL '{}' is not a valid URL: {}",
                self.public_base_url, e
            ))
        })
    }
}

/// Split a comma-separated `ALLOWED_HOSTS` value.
fn parse_allowed_hosts(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|host| host.trim().to_ascii_lowercase())
        .filter(|host| !host.is_empty())
        .collect()
}

/// Only the host of the public base URL.
fn default_allowed_hosts(public_base_url: &str) -> Vec<String> {
    Url::parse(public_base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .into_iter()
        .collect()
}

/// Ensure the media prefix starts and ends with a slash unless it is a full URL.
fn normalize_media_url(raw: &str) -> String {
    let mut media = raw.trim().to_string();
    if !media.contains("://") && !media.starts_with('/') {
        media.insert(0, '/');
    }
    if !media.ends_with('/') {
        media.push('/');
    }
    media
}

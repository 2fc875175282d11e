//! Application state - Dependency injection container.

use std::sync::Arc;

use url::Url;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Persistence, UnitOfWork};
use crate::services::{AuthService, Authenticator};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Repository access
    pub uow: Arc<dyn UnitOfWork>,
    /// Fallback origin for absolute URLs when a request has no Host header
    pub public_base: Url,
    /// Prefix uploaded files are served under
    pub media_url: String,
    /// Host names trusted when building absolute URLs
    pub allowed_hosts: Arc<[String]>,
}

impl AppState {
    /// Wire the services over a database connection.
    pub fn from_config(db: sea_orm::DatabaseConnection, config: Config) -> AppResult<Self> {
        let uow: Arc<dyn UnitOfWork> = Arc::new(Persistence::new(db));
        Self::with_unit_of_work(uow, config)
    }

    /// Wire the services over any unit of work (tests use an in-memory one).
    pub fn with_unit_of_work(uow: Arc<dyn UnitOfWork>, config: Config) -> AppResult<Self> {
        let public_base = config.public_base()?;
        let media_url = config.media_url.clone();
        let allowed_hosts = Arc::from(config.allowed_hosts.clone());
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));

        Ok(Self {
            auth_service,
            uow,
            public_base,
            media_url,
            allowed_hosts,
        })
    }
}

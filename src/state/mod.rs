//! Shared application state: the installed storage backend, runtime
//! configuration and the login rate limiter.

pub mod rate_limit;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{config::AppConfig, dao::storage::RoomStore, error::ServiceError};

use self::rate_limit::LoginRateLimiter;

pub type SharedState = Arc<AppState>;

/// Central application state storing the database handle and config.
pub struct AppState {
    store: RwLock<Option<Arc<dyn RoomStore>>>,
    config: AppConfig,
    logins: LoginRateLimiter,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            store: RwLock::new(None),
            config,
            logins: LoginRateLimiter::default(),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current store, if one is installed.
    pub async fn store(&self) -> Option<Arc<dyn RoomStore>> {
        let guard = self.store.read().await;
        guard.as_ref().cloned()
    }

    /// Store handle or a degraded-mode error for the service layer.
    pub async fn require_store(&self) -> Result<Arc<dyn RoomStore>, ServiceError> {
        self.store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new store implementation and leave degraded mode.
    pub async fn install_store(&self, store: Arc<dyn RoomStore>) {
        let mut guard = self.store.write().await;
        *guard = Some(store);
    }

    /// Remove the current store and enter degraded mode.
    pub async fn clear_store(&self) {
        let mut guard = self.store.write().await;
        guard.take();
    }

    /// Degraded mode means no storage backend is installed.
    pub async fn is_degraded(&self) -> bool {
        let guard = self.store.read().await;
        guard.is_none()
    }

    /// Fixed-window limiter guarding the login endpoints.
    pub fn logins(&self) -> &LoginRateLimiter {
        &self.logins
    }
}

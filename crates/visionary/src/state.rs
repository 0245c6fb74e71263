//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one repository trait object per entity; the
//! backend behind them is selected via feature flags.

use std::{sync::Arc, time::Duration};

use visionary_core::storage::{
    CorrectionProfileResultRepository, FilterRepository, UserRepository,
};

use crate::config::Config;

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub profile_repo: Arc<dyn CorrectionProfileResultRepository>,
    pub filter_repo: Arc<dyn FilterRepository>,
    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from one backend that implements every repository.
    pub(crate) fn build<R>(repo: Arc<R>, config: &Config) -> Self
    where
        R: UserRepository + CorrectionProfileResultRepository + FilterRepository + 'static,
    {
        Self {
            user_repo: repo.clone(),
            profile_repo: repo.clone(),
            filter_repo: repo,
            request_timeout: config.request_timeout(),
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState backed by the SQLite database at `config.sqlite_path`.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let sqlite_repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");

            Ok(Self::build(sqlite_repo, config))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage. Nothing survives a restart.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Using in-memory storage, data will not be persisted");

            Ok(Self::build(Arc::new(InMemoryRepository::new()), config))
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::build(
            Arc::new(crate::storage::InMemoryRepository::new()),
            &Config::default(),
        )
    }
}

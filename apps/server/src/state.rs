//! Shared application state

use crate::{
    config::Config,
    db::{PostgresResourceStore, ResourceStore, MIGRATOR},
    search::{ElasticsearchIndex, SearchIndex},
    services::ResourceService,
    Error, Result,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};

/// Process-wide state shared by all request handlers
///
/// The database pool and the search client are created once at startup and
/// injected into the service layer; both are internally synchronized for
/// concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resources: ResourceService,
}

impl AppState {
    /// Connect the production backends and assemble the state
    pub async fn new(config: Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database.pool_max_size)
            .acquire_timeout(Duration::from_secs(
                config.database.pool_acquire_timeout_seconds,
            ))
            .connect(&config.database.url)
            .await?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(|e| Error::Storage(format!("migration failed: {e}")))?;
        tracing::info!("Database connected, migrations applied");

        let search = ElasticsearchIndex::new(&config.search)?;
        // Fail the boot rather than every later request when the cluster
        // is misconfigured. After startup the index is best-effort.
        search.ping().await?;
        tracing::info!(search_url = %config.search.url, "Search backend connected");

        let store: Arc<dyn ResourceStore> = Arc::new(PostgresResourceStore::new(pool));
        let search: Arc<dyn SearchIndex> = Arc::new(search);

        Ok(Self::with_backends(config, store, search))
    }

    /// Assemble state from explicit backends
    ///
    /// The integration tests inject in-memory fakes through this.
    pub fn with_backends(
        config: Config,
        store: Arc<dyn ResourceStore>,
        search: Arc<dyn SearchIndex>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resources: ResourceService::new(store, search),
        }
    }
}

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::{AppConfig, StoreBackend};
use crate::records::memory::MemoryRecordStore;
use crate::records::repo::{PgRecordStore, RecordStore};
use crate::records::transform::{Clock, SystemClock};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn RecordStore>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store = match config.store_backend {
            StoreBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL not set")?;
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;
                info!(max_connections = config.max_connections, "postgres store ready");

                Arc::new(PgRecordStore::new(db)) as Arc<dyn RecordStore>
            }
            StoreBackend::Memory => {
                warn!("using in-memory store; records are lost on exit");
                Arc::new(MemoryRecordStore::new()) as Arc<dyn RecordStore>
            }
        };

        Ok(Self::from_parts(Arc::new(config), store, Arc::new(SystemClock)))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    /// In-memory store with a pinned date, for tests.
    #[cfg(test)]
    pub fn fake(today: time::Date) -> Self {
        use crate::records::transform::FixedClock;

        Self::from_parts(
            Arc::new(AppConfig::in_memory()),
            Arc::new(MemoryRecordStore::new()),
            Arc::new(FixedClock(today)),
        )
    }
}

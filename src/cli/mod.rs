pub mod chat;
pub mod clear;
pub mod doctor;
pub mod export;
pub mod list;
pub mod log;
pub mod settings;

use anyhow::Result;
use std::sync::Arc;

use healthmate::config::HealthmateConfig;
use healthmate::store::{HealthStore, SqliteStore};

/// Open the configured database as an injectable store.
pub fn open_store(config: &HealthmateConfig) -> Result<Arc<dyn HealthStore>> {
    let store = SqliteStore::open(config.resolved_db_path())?;
    Ok(Arc::new(store))
}

//! Persistence-service interface.
//!
//! Workflows never reach for a global store: they are handed an
//! `Arc<dyn HealthStore>`. [`SqliteStore`] is the on-disk implementation.

pub mod sqlite;

use anyhow::Result;

use crate::symptoms::types::SymptomLog;

pub use sqlite::SqliteStore;

/// Durable key-value and symptom-log persistence.
///
/// All methods are synchronous. Callers in async contexts hold no lock
/// across an `.await`.
pub trait HealthStore: Send + Sync {
    /// Append one symptom log.
    fn save_symptom_log(&self, log: &SymptomLog) -> Result<()>;

    /// All stored symptom logs, newest first.
    fn list_symptom_logs(&self) -> Result<Vec<SymptomLog>>;

    /// Delete every symptom log. Returns how many were removed.
    fn clear_all_symptom_logs(&self) -> Result<usize>;

    /// Read a named JSON record.
    fn get_record(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a named JSON record.
    fn put_record(&self, key: &str, value: &str) -> Result<()>;
}

use anyhow::{anyhow, Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::HealthStore;
use crate::symptoms::types::{Severity, SymptomLog};

/// [`HealthStore`] backed by a single SQLite connection.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Open (or create) the database file and wrap it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(crate::db::open_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(crate::db::open_memory_database()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| anyhow!("db lock poisoned: {e}"))
    }

    /// Run a closure against the underlying connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.lock()?;
        f(&conn)
    }
}

impl HealthStore for SqliteStore {
    fn save_symptom_log(&self, log: &SymptomLog) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO symptom_logs (id, symptom, severity, notes, timestamp, source) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                log.id,
                log.symptom,
                log.severity.value(),
                log.notes,
                log.timestamp,
                log.source.as_str(),
            ],
        )
        .with_context(|| format!("failed to save symptom log {}", log.id))?;

        tracing::debug!(id = %log.id, symptom = %log.symptom, source = %log.source, "symptom log saved");
        Ok(())
    }

    fn list_symptom_logs(&self) -> Result<Vec<SymptomLog>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, symptom, severity, notes, timestamp, source \
             FROM symptom_logs ORDER BY timestamp DESC, id DESC",
        )?;

        let logs = stmt
            .query_map([], |row| {
                let severity: i64 = row.get(2)?;
                let source: String = row.get(5)?;
                Ok(SymptomLog {
                    id: row.get(0)?,
                    symptom: row.get(1)?,
                    severity: Severity::new(severity).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(2, Type::Integer, Box::new(e))
                    })?,
                    notes: row.get(3)?,
                    timestamp: row.get(4)?,
                    source: source.parse().map_err(|e: String| {
                        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, e.into())
                    })?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    fn clear_all_symptom_logs(&self) -> Result<usize> {
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM symptom_logs", [])
            .context("failed to clear symptom logs")?;
        tracing::info!(removed, "all symptom logs cleared");
        Ok(removed)
    }

    fn get_record(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock()?;
        let value = conn
            .query_row(
                "SELECT value FROM records WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_record(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, chrono::Utc::now().to_rfc3339()],
        )
        .with_context(|| format!("failed to write record {key}"))?;
        Ok(())
    }
}

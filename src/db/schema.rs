//! SQL DDL for all healthmate tables.
//!
//! Defines the `symptom_logs`, `records` (named JSON records such as
//! preferences) and `schema_meta` tables. All DDL uses `IF NOT EXISTS` for
//! idempotent initialization.

use rusqlite::Connection;

/// All schema DDL statements at schema version 1.
const SCHEMA_SQL: &str = r#"
-- Symptom observations, append-only
CREATE TABLE IF NOT EXISTS symptom_logs (
    id TEXT PRIMARY KEY,
    symptom TEXT NOT NULL,
    severity INTEGER NOT NULL CHECK(severity >= 1 AND severity <= 10),
    notes TEXT NOT NULL DEFAULT '',
    timestamp TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_symptom_logs_timestamp ON symptom_logs(timestamp);

-- Named JSON records, overwritten wholesale
CREATE TABLE IF NOT EXISTS records (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

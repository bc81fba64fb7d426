//! CLI `doctor` command — run database diagnostics and print a health report.

use anyhow::{Context, Result};

use healthmate::config::HealthmateConfig;
use healthmate::db;
use healthmate::store::SqliteStore;

/// Run database diagnostics and print a health report.
pub fn doctor(config: &HealthmateConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    if !db_path.exists() {
        println!("Database: not found at {}", db_path.display());
        println!("It is created the first time you run `healthmate chat` or `healthmate logs add`.");
        return Ok(());
    }

    let file_size = std::fs::metadata(&db_path)
        .map(|m| m.len())
        .unwrap_or(0);

    let store = SqliteStore::open(&db_path)
        .context("failed to open database (may be corrupt)")?;

    let report = store
        .with_conn(db::check_database_health)
        .context("failed to run health check")?;

    println!("healthmate Health Report");
    println!("========================");
    println!();
    println!("Database:          {}", db_path.display());
    println!("File size:         {}", format_bytes(file_size));
    println!("Schema version:    {}", report.schema_version);
    println!("Chat endpoint:     {}", config.chat.endpoint);
    println!();
    println!("Row counts:");
    println!("  Symptom logs:    {}", report.symptom_log_count);
    println!("  Records:         {}", report.record_count);
    println!();
    if report.integrity_ok {
        println!("Integrity check:   PASSED");
    } else {
        println!("Integrity check:   FAILED ({})", report.integrity_details);
        println!();
        println!("Recovery steps:");
        println!("  1. Restore from a backup: cp backup.db {}", db_path.display());
        println!("  2. Or save what is still readable first:");
        println!("     healthmate logs export > logs.json");
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

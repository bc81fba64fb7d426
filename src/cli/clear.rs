//! CLI `logs clear` command — delete all symptom logs after user confirmation.

use anyhow::{bail, Result};
use std::io::Write;

use healthmate::config::HealthmateConfig;
use healthmate::preferences::{ClearConfirmation, PreferencesService};

/// Delete all symptom logs after user confirmation.
pub fn clear(config: &HealthmateConfig) -> Result<()> {
    let db_path = config.resolved_db_path();

    println!("WARNING: This will permanently delete ALL symptom logs. This cannot be undone.");
    println!("Database: {}", db_path.display());
    print!("\nType {} to confirm: ", ClearConfirmation::PHRASE);
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;

    let Some(confirmed) = ClearConfirmation::from_input(&input) else {
        bail!("clear cancelled");
    };

    let service = PreferencesService::new(super::open_store(config)?);
    let removed = service.clear_all(confirmed)?;

    println!("Deleted {removed} symptom logs.");
    Ok(())
}

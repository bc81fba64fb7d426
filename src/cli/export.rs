use anyhow::Result;

use healthmate::config::HealthmateConfig;

/// Export all symptom logs as JSON to stdout.
pub fn export(config: &HealthmateConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let logs = store.list_symptom_logs()?;

    let json = serde_json::to_string_pretty(&logs)?;
    println!("{json}");

    eprintln!("Exported {} symptom logs.", logs.len());
    Ok(())
}

use anyhow::Result;

use healthmate::config::HealthmateConfig;

/// Print stored symptom logs in the terminal, newest first.
pub fn list(config: &HealthmateConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let logs = store.list_symptom_logs()?;

    if logs.is_empty() {
        println!("No symptom logs recorded.");
        return Ok(());
    }

    println!("Symptom Logs ({})", logs.len());
    println!("{}", "=".repeat(40));
    for log in &logs {
        println!(
            "  {}  {:<20} severity {:<6} [{}]",
            log.timestamp, log.symptom, log.severity, log.source
        );
        if !log.notes.is_empty() {
            println!("      {}", log.notes);
        }
    }

    Ok(())
}

//! CLI `logs add` command — record a symptom without the assistant.

use anyhow::Result;
use clap::Args;

use healthmate::config::HealthmateConfig;
use healthmate::symptoms::manual::log_manual;
use healthmate::symptoms::types::{Severity, SymptomDraft};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What you are experiencing, e.g. "Headache"
    #[arg(long)]
    pub symptom: String,
    /// 1 (barely noticeable) to 10 (worst imaginable)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=10))]
    pub severity: i64,
    #[arg(long, default_value = "")]
    pub notes: String,
}

pub fn add(config: &HealthmateConfig, args: AddArgs) -> Result<()> {
    let store = super::open_store(config)?;
    let draft = SymptomDraft {
        symptom: args.symptom,
        severity: Severity::new(args.severity)?,
        notes: args.notes,
    };

    let log = log_manual(store.as_ref(), draft)?;
    println!("{} has been added to your health records.", log.symptom);
    Ok(())
}

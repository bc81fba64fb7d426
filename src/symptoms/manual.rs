//! User-entered symptom logs, recorded outside a conversation.

use anyhow::Result;

use crate::store::HealthStore;
use crate::symptoms::types::{SymptomDraft, SymptomLog, SymptomSource};

/// Validate a draft and persist it as a manual log.
pub fn log_manual(store: &dyn HealthStore, draft: SymptomDraft) -> Result<SymptomLog> {
    let log = SymptomLog::from_draft(draft.validated()?, SymptomSource::Manual);
    store.save_symptom_log(&log)?;
    tracing::info!(id = %log.id, symptom = %log.symptom, "manual symptom logged");
    Ok(log)
}

#![allow(dead_code)]

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use healthmate::chat::{ChatEndpoint, ChatError, ChatReply};
use healthmate::store::{HealthStore, SqliteStore};
use healthmate::symptoms::types::{ChatTurn, Severity, SymptomDraft, SymptomLog, SymptomSource};

pub const GREETING: &str = "Hi there! How are you feeling today?";

/// Fresh in-memory store with schema and migrations applied.
pub fn test_store() -> Arc<SqliteStore> {
    Arc::new(SqliteStore::open_in_memory().unwrap())
}

/// A stamped log with the given symptom and severity.
pub fn sample_log(symptom: &str, severity: i64) -> SymptomLog {
    SymptomLog::from_draft(
        SymptomDraft {
            symptom: symptom.into(),
            severity: Severity::new(severity).unwrap(),
            notes: String::new(),
        },
        SymptomSource::Assistant,
    )
}

/// Endpoint that answers from a queue and records every history it receives.
#[derive(Default)]
pub struct ScriptedEndpoint {
    replies: Mutex<VecDeque<Result<ChatReply, ChatError>>>,
    pub received: Mutex<Vec<Vec<ChatTurn>>>,
}

impl ScriptedEndpoint {
    pub fn new(replies: Vec<Result<ChatReply, ChatError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            received: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatEndpoint for ScriptedEndpoint {
    async fn send(&self, history: &[ChatTurn]) -> Result<ChatReply, ChatError> {
        self.received.lock().unwrap().push(history.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ChatError::Transport("no scripted reply".into())))
    }
}

/// Endpoint that holds every request until [`GatedEndpoint::release`] is called.
pub struct GatedEndpoint {
    reply: ChatReply,
    called: Notify,
    gate: Notify,
}

impl GatedEndpoint {
    pub fn new(reply: ChatReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            called: Notify::new(),
            gate: Notify::new(),
        })
    }

    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl ChatEndpoint for GatedEndpoint {
    async fn send(&self, _history: &[ChatTurn]) -> Result<ChatReply, ChatError> {
        self.called.notify_one();
        self.gate.notified().await;
        Ok(self.reply.clone())
    }
}

/// Store whose writes always fail.
pub struct BrokenStore;

impl HealthStore for BrokenStore {
    fn save_symptom_log(&self, _log: &SymptomLog) -> Result<()> {
        bail!("disk full")
    }

    fn list_symptom_logs(&self) -> Result<Vec<SymptomLog>> {
        Ok(Vec::new())
    }

    fn clear_all_symptom_logs(&self) -> Result<usize> {
        bail!("disk full")
    }

    fn get_record(&self, _key: &str) -> Result<Option<String>> {
        bail!("disk full")
    }

    fn put_record(&self, _key: &str, _value: &str) -> Result<()> {
        bail!("disk full")
    }
}

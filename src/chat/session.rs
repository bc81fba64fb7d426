//! Conversation state and the submit workflow.
//!
//! [`Conversation`] is the pure state record: the turn list plus a
//! [`SessionState`] that moves `Idle → Submitting → Idle | Failed`.
//! [`ChatSession`] drives it against an injected [`ChatEndpoint`] and
//! [`HealthStore`], allowing one request in flight at a time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

use super::client::ChatEndpoint;
use crate::store::HealthStore;
use crate::symptoms::types::{ChatTurn, SymptomDraft, SymptomLog, SymptomSource};

/// Assistant turn appended when the endpoint cannot be reached or answers badly.
pub const FALLBACK_REPLY: &str = "I'm sorry, I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Submitting,
    /// The last request failed. New submissions are accepted.
    Failed,
}

/// Why a submission was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejected {
    #[error("message is empty")]
    Empty,

    #[error("a request is already in flight")]
    Busy,
}

#[derive(Debug, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    state: SessionState,
}

impl Conversation {
    /// Start a conversation whose only turn is the assistant's greeting.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(greeting)],
            state: SessionState::Idle,
        }
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Accept a user message and return the history to send.
    ///
    /// Rejections leave the turn list untouched.
    pub fn begin(&mut self, text: &str) -> Result<Vec<ChatTurn>, Rejected> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Rejected::Empty);
        }
        if self.state == SessionState::Submitting {
            return Err(Rejected::Busy);
        }

        self.turns.push(ChatTurn::user(text));
        self.state = SessionState::Submitting;
        Ok(self.turns.clone())
    }

    pub fn finish_reply(&mut self, reply: impl Into<String>) {
        self.turns.push(ChatTurn::assistant(reply));
        self.state = SessionState::Idle;
    }

    pub fn finish_error(&mut self) {
        self.turns.push(ChatTurn::assistant(FALLBACK_REPLY));
        self.state = SessionState::Failed;
    }
}

/// Result of [`ChatSession::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was sent and the conversation is unchanged.
    Ignored(Rejected),
    Replied {
        reply: String,
        /// The observation stored from this reply, if any.
        logged: Option<SymptomLog>,
    },
    /// The fallback turn was appended.
    Failed { fallback: String },
}

pub struct ChatSession {
    conversation: Mutex<Conversation>,
    endpoint: Arc<dyn ChatEndpoint>,
    store: Arc<dyn HealthStore>,
}

impl ChatSession {
    pub fn new(
        greeting: impl Into<String>,
        endpoint: Arc<dyn ChatEndpoint>,
        store: Arc<dyn HealthStore>,
    ) -> Self {
        Self {
            conversation: Mutex::new(Conversation::new(greeting)),
            endpoint,
            store,
        }
    }

    fn conversation(&self) -> MutexGuard<'_, Conversation> {
        lock(&self.conversation)
    }

    /// Snapshot of the turn list.
    pub fn turns(&self) -> Vec<ChatTurn> {
        self.conversation().turns().to_vec()
    }

    pub fn state(&self) -> SessionState {
        self.conversation().state()
    }

    pub fn is_busy(&self) -> bool {
        self.state() == SessionState::Submitting
    }

    /// Send a user message and record the outcome in the conversation.
    ///
    /// Endpoint failures never surface as errors: they become the fallback
    /// turn. The busy state is released on every path, including when the
    /// returned future is dropped before the endpoint answers.
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        let begun = self.conversation().begin(text);
        let history = match begun {
            Ok(history) => history,
            Err(rejected) => {
                tracing::debug!(reason = %rejected, "submission ignored");
                return SubmitOutcome::Ignored(rejected);
            }
        };

        tracing::debug!(turns = history.len(), "sending conversation to chat endpoint");

        let in_flight = InFlight::new(&self.conversation);
        let sent = self.endpoint.send(&history).await;
        in_flight.disarm();

        match sent {
            Ok(reply) => {
                self.conversation().finish_reply(reply.response.clone());
                let logged = reply
                    .symptom_to_log
                    .as_ref()
                    .and_then(|payload| self.record_observation(payload));
                SubmitOutcome::Replied {
                    reply: reply.response,
                    logged,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "chat request failed");
                self.conversation().finish_error();
                SubmitOutcome::Failed {
                    fallback: FALLBACK_REPLY.to_string(),
                }
            }
        }
    }

    fn record_observation(&self, payload: &serde_json::Value) -> Option<SymptomLog> {
        let draft = match SymptomDraft::from_payload(payload) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "dropping invalid symptom payload");
                return None;
            }
        };

        let log = SymptomLog::from_draft(draft, SymptomSource::Assistant);
        match self.store.save_symptom_log(&log) {
            Ok(()) => {
                tracing::info!(id = %log.id, symptom = %log.symptom, "symptom logged from conversation");
                Some(log)
            }
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "failed to persist symptom log");
                None
            }
        }
    }
}

fn lock(conversation: &Mutex<Conversation>) -> MutexGuard<'_, Conversation> {
    // Conversation methods cannot panic mid-update, so a poisoned lock
    // still holds consistent state.
    conversation
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Releases the busy state if a submit future is dropped before the
/// endpoint answers.
struct InFlight<'a> {
    conversation: &'a Mutex<Conversation>,
    armed: bool,
}

impl<'a> InFlight<'a> {
    fn new(conversation: &'a Mutex<Conversation>) -> Self {
        Self {
            conversation,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!("chat request abandoned before the endpoint answered");
            lock(self.conversation).finish_error();
        }
    }
}

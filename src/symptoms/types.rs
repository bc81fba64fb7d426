//! Conversation and symptom record types.
//!
//! Defines [`Role`] and [`ChatTurn`] (one message in a conversation),
//! [`Severity`] (a bounded 1–10 scale), and [`SymptomLog`] (a persisted,
//! immutable symptom observation).

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected user- or endpoint-supplied values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("severity must be between {min} and {max}, got {0}", min = Severity::MIN, max = Severity::MAX)]
    SeverityOutOfRange(i64),

    #[error("symptom name must not be empty")]
    EmptySymptom,

    #[error("reminder time must be HH:MM (24-hour), got {0:?}")]
    InvalidReminderTime(String),

    #[error("malformed symptom payload: {0}")]
    MalformedPayload(String),
}

/// Who sent a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message exchanged in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Symptom severity on a 1 (barely noticeable) to 10 (worst imaginable) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::SeverityOutOfRange(value))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Severity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Where a symptom log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomSource {
    /// Detected by the chat endpoint during a conversation.
    Assistant,
    /// Entered directly by the user.
    Manual,
}

impl SymptomSource {
    /// SQL-compatible string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assistant => "assistant",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for SymptomSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SymptomSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assistant" => Ok(Self::Assistant),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("unknown symptom source: {s}")),
        }
    }
}

/// An observation before it is stamped with an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomDraft {
    pub symptom: String,
    pub severity: Severity,
    #[serde(default)]
    pub notes: String,
}

impl SymptomDraft {
    /// Validate an endpoint's raw `symptomToLog` payload.
    pub fn from_payload(payload: &serde_json::Value) -> Result<Self, ValidationError> {
        let draft: SymptomDraft = serde_json::from_value(payload.clone())
            .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;
        draft.validated()
    }

    /// Trim the symptom name and reject an empty one.
    pub fn validated(mut self) -> Result<Self, ValidationError> {
        self.symptom = self.symptom.trim().to_string();
        if self.symptom.is_empty() {
            return Err(ValidationError::EmptySymptom);
        }
        Ok(self)
    }
}

/// A persisted symptom observation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomLog {
    /// UUID v7 (time-sortable) primary key.
    pub id: String,
    pub symptom: String,
    pub severity: Severity,
    pub notes: String,
    /// ISO 8601 UTC creation time, millisecond precision.
    pub timestamp: String,
    pub source: SymptomSource,
}

impl SymptomLog {
    /// Stamp a draft with a fresh id and the current time.
    pub fn from_draft(draft: SymptomDraft, source: SymptomSource) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            symptom: draft.symptom,
            severity: draft.severity,
            notes: draft.notes,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            source,
        }
    }
}

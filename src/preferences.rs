//! User preferences and the destructive "clear all symptom logs" action.
//!
//! Preferences are a single JSON record stored under [`PREFERENCES_KEY`],
//! read once and overwritten wholesale on save.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::store::HealthStore;
use crate::symptoms::types::ValidationError;

/// Record key the preferences are stored under.
pub const PREFERENCES_KEY: &str = "healthSettings";

/// Daily reminder time, `HH:MM` on a 24-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReminderTime {
    hour: u8,
    minute: u8,
}

impl ReminderTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour > 23 || minute > 59 {
            return Err(ValidationError::InvalidReminderTime(format!("{hour}:{minute}")));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self { hour: 9, minute: 0 }
    }
}

impl FromStr for ReminderTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidReminderTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(h) || !two_digits(m) {
            return Err(invalid());
        }
        let hour = h.parse().map_err(|_| invalid())?;
        let minute = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ReminderTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReminderTime> for String {
    fn from(time: ReminderTime) -> Self {
        time.to_string()
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub notifications_enabled: bool,
    pub dark_mode_enabled: bool,
    pub reminder_time: ReminderTime,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications_enabled: true,
            dark_mode_enabled: false,
            reminder_time: ReminderTime::default(),
        }
    }
}

/// Proof that the user explicitly confirmed an irreversible erase.
#[derive(Debug)]
pub struct ClearConfirmation(());

impl ClearConfirmation {
    /// The exact text the user must type.
    pub const PHRASE: &'static str = "YES";

    pub fn from_input(input: &str) -> Option<Self> {
        (input.trim() == Self::PHRASE).then_some(Self(()))
    }
}

pub struct PreferencesService {
    store: Arc<dyn HealthStore>,
}

impl PreferencesService {
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    /// Read the stored record. `None` when it is absent or unreadable.
    pub fn load(&self) -> Option<Preferences> {
        let json = match self.store.get_record(PREFERENCES_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "failed to read preferences");
                return None;
            }
        };

        match serde_json::from_str(&json) {
            Ok(prefs) => Some(prefs),
            Err(e) => {
                tracing::warn!(error = %e, "stored preferences are malformed, keeping defaults");
                None
            }
        }
    }

    pub fn load_or_default(&self) -> Preferences {
        self.load().unwrap_or_default()
    }

    /// Overwrite the stored record.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        let json = serde_json::to_string(prefs)?;
        self.store.put_record(PREFERENCES_KEY, &json)?;
        tracing::info!(
            notifications = prefs.notifications_enabled,
            dark_mode = prefs.dark_mode_enabled,
            reminder = %prefs.reminder_time,
            "preferences saved"
        );
        Ok(())
    }

    /// Erase every stored symptom log. Irreversible.
    pub fn clear_all(&self, _confirmed: ClearConfirmation) -> Result<usize> {
        self.store.clear_all_symptom_logs()
    }
}

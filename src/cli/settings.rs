//! CLI `settings` commands — show and update preferences.

use anyhow::Result;
use clap::{Args, ValueEnum};

use healthmate::config::HealthmateConfig;
use healthmate::preferences::{Preferences, PreferencesService, ReminderTime};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        matches!(toggle, Toggle::On)
    }
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Daily reminder notifications
    #[arg(long, value_enum)]
    pub notifications: Option<Toggle>,
    /// Dark appearance
    #[arg(long, value_enum)]
    pub dark_mode: Option<Toggle>,
    /// Reminder time, HH:MM (24-hour)
    #[arg(long)]
    pub reminder: Option<ReminderTime>,
}

pub fn show(config: &HealthmateConfig) -> Result<()> {
    let service = PreferencesService::new(super::open_store(config)?);
    let stored = service.load();
    if stored.is_none() {
        println!("(no saved preferences, showing defaults)");
    }
    print_preferences(&stored.unwrap_or_default());
    Ok(())
}

/// Apply the given changes on top of the current preferences and save.
pub fn set(config: &HealthmateConfig, args: SetArgs) -> Result<()> {
    let service = PreferencesService::new(super::open_store(config)?);
    let mut prefs = service.load_or_default();

    if let Some(toggle) = args.notifications {
        prefs.notifications_enabled = toggle.into();
    }
    if let Some(toggle) = args.dark_mode {
        prefs.dark_mode_enabled = toggle.into();
    }
    if let Some(time) = args.reminder {
        prefs.reminder_time = time;
    }

    service.save(&prefs)?;
    println!("Settings saved.");
    print_preferences(&prefs);
    Ok(())
}

fn print_preferences(prefs: &Preferences) {
    let on_off = |b: bool| if b { "on" } else { "off" };
    println!("Preferences");
    println!("{}", "=".repeat(30));
    println!("  Notifications:   {}", on_off(prefs.notifications_enabled));
    println!("  Dark mode:       {}", on_off(prefs.dark_mode_enabled));
    println!("  Reminder time:   {}", prefs.reminder_time);
}

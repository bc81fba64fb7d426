mod helpers;

use helpers::{sample_log, test_store, BrokenStore};
use healthmate::preferences::{
    ClearConfirmation, Preferences, PreferencesService, ReminderTime, PREFERENCES_KEY,
};
use healthmate::store::{HealthStore, SqliteStore};
use std::sync::Arc;

#[test]
fn load_without_record_returns_none() {
    let service = PreferencesService::new(test_store());
    assert!(service.load().is_none());
    assert_eq!(service.load_or_default(), Preferences::default());
}

#[test]
fn save_then_load_is_deep_equal() {
    let service = PreferencesService::new(test_store());
    let prefs = Preferences {
        notifications_enabled: false,
        dark_mode_enabled: true,
        reminder_time: ReminderTime::new(21, 15).unwrap(),
    };

    service.save(&prefs).unwrap();
    assert_eq!(service.load(), Some(prefs));
}

#[test]
fn save_overwrites_previous_record() {
    let store = test_store();
    let service = PreferencesService::new(store.clone());

    service.save(&Preferences::default()).unwrap();
    let updated = Preferences {
        dark_mode_enabled: true,
        ..Preferences::default()
    };
    service.save(&updated).unwrap();

    assert_eq!(service.load(), Some(updated));
    let count: i64 = store
        .with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?)
        })
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn malformed_record_is_ignored() {
    let store = test_store();
    let service = PreferencesService::new(store.clone());

    for bad in [
        "not json",
        r#"{"notificationsEnabled": true}"#,
        r#"{"notificationsEnabled": true, "darkModeEnabled": false, "reminderTime": "25:00"}"#,
    ] {
        store.put_record(PREFERENCES_KEY, bad).unwrap();
        assert!(service.load().is_none(), "{bad} should not load");
    }
}

#[test]
fn storage_error_on_load_returns_none() {
    let service = PreferencesService::new(Arc::new(BrokenStore));
    assert!(service.load().is_none());
    assert!(service.save(&Preferences::default()).is_err());
}

#[test]
fn clear_all_leaves_no_logs() {
    let store = test_store();
    for i in 1..=5 {
        store.save_symptom_log(&sample_log(&format!("Symptom {i}"), i)).unwrap();
    }
    let service = PreferencesService::new(store.clone());

    let confirmed = ClearConfirmation::from_input("YES").unwrap();
    assert_eq!(service.clear_all(confirmed).unwrap(), 5);
    assert!(store.list_symptom_logs().unwrap().is_empty());

    // Also fine on an empty store.
    let confirmed = ClearConfirmation::from_input("YES").unwrap();
    assert_eq!(service.clear_all(confirmed).unwrap(), 0);
}

#[test]
fn clear_all_keeps_preferences() {
    let store = test_store();
    let service = PreferencesService::new(store.clone());
    let prefs = Preferences {
        notifications_enabled: false,
        ..Preferences::default()
    };
    service.save(&prefs).unwrap();
    store.save_symptom_log(&sample_log("Cough", 2)).unwrap();

    service
        .clear_all(ClearConfirmation::from_input("YES").unwrap())
        .unwrap();

    assert_eq!(service.load(), Some(prefs));
}

#[test]
fn preferences_survive_reopen() {
    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("health.db");
    let prefs = Preferences {
        notifications_enabled: true,
        dark_mode_enabled: true,
        reminder_time: "06:45".parse().unwrap(),
    };

    {
        let service = PreferencesService::new(Arc::new(SqliteStore::open(&db_path).unwrap()));
        service.save(&prefs).unwrap();
    }

    let service = PreferencesService::new(Arc::new(SqliteStore::open(&db_path).unwrap()));
    assert_eq!(service.load(), Some(prefs));
}

//! Symptom assistant and local health log.
//!
//! healthmate holds a conversation with a remote health-assistant endpoint,
//! stores the symptom observations that endpoint detects, and keeps a small
//! preferences record on disk.
//!
//! # Architecture
//!
//! - **Storage**: SQLite via rusqlite, behind the [`store::HealthStore`] trait
//!   that every workflow receives by injection
//! - **Chat**: full-history `POST` to a JSON endpoint, one request in flight
//!   per session, a scripted fallback turn on any failure
//! - **Preferences**: a single JSON record, overwritten wholesale
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`db`] — SQLite database initialization, schema, migrations, and health checks
//! - [`store`] — Persistence-service trait and its SQLite implementation
//! - [`symptoms`] — Turn and symptom-log types, manual logging
//! - [`chat`] — Endpoint client and the conversation workflow
//! - [`preferences`] — Preferences record and the clear-all action

pub mod chat;
pub mod config;
pub mod db;
pub mod preferences;
pub mod store;
pub mod symptoms;

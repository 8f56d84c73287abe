//! Per-project installation settings and their persistence.
//!
//! One record per helpdesk project, keyed by `"telegram-<project_id>"`.
//! Absence of a record means the integration is not installed for that
//! project.

pub mod error;
pub mod store;
pub mod store_memory;
pub mod store_sqlite;
pub mod types;

pub use {
    error::{Error, Result},
    store::SettingsStore,
    store_memory::MemorySettingsStore,
    store_sqlite::SqliteSettingsStore,
    types::{ProjectSettings, settings_key},
};

//! In-memory store for tests and single-process development runs.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{Error, Result, store::SettingsStore, types::ProjectSettings};

/// `HashMap`-backed store. Nothing survives a restart.
pub struct MemorySettingsStore {
    records: Mutex<HashMap<String, ProjectSettings>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemorySettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<ProjectSettings>> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        Ok(records.get(key).cloned())
    }

    async fn set(&self, key: &str, settings: &ProjectSettings) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(key.to_string(), settings.clone());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        if records.remove(key).is_none() {
            return Err(Error::not_found(key));
        }
        Ok(())
    }
}

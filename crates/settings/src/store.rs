//! Persistence trait for project settings.

use async_trait::async_trait;

use crate::{Result, types::ProjectSettings};

/// Keyed document store for installation settings.
///
/// The contract is whole-record get/set/remove; callers never patch fields
/// in place. Concurrent writers for the same key race without coordination.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<ProjectSettings>>;
    async fn set(&self, key: &str, settings: &ProjectSettings) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

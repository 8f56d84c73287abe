//! Shared state handed to every webhook handler.

use std::sync::Arc;

use {
    deskrelay_common::BridgeConfig,
    deskrelay_helpdesk::HelpdeskClient,
    deskrelay_settings::{ProjectSettings, SettingsStore, settings_key},
    deskrelay_telegram::{TelegramClient, TelegramOutbound},
};

/// Everything an inbound event needs: the immutable config, the settings
/// store, and the outbound clients for both platforms. Built once at startup
/// and shared behind an `Arc`; the store is the only mutable piece.
pub struct AppState {
    pub config: BridgeConfig,
    pub store: Arc<dyn SettingsStore>,
    pub telegram: TelegramClient,
    pub outbound: TelegramOutbound,
    pub helpdesk: HelpdeskClient,
}

impl AppState {
    pub fn new(config: BridgeConfig, store: Arc<dyn SettingsStore>) -> Self {
        let telegram = TelegramClient::new(&config);
        Self {
            outbound: TelegramOutbound::new(telegram.clone()),
            helpdesk: HelpdeskClient::new(&config),
            telegram,
            store,
            config,
        }
    }

    /// Load the settings record for a project. Store faults are surfaced to
    /// the caller; a clean miss comes back as `None`.
    pub async fn settings_for(
        &self,
        project_id: &str,
    ) -> deskrelay_settings::Result<Option<ProjectSettings>> {
        self.store.get(&settings_key(project_id)).await
    }
}

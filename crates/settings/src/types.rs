use serde::{Deserialize, Serialize};

/// Key under which a project's settings record is stored.
///
/// The prefix is the channel protocol name, so a future second channel can
/// share the same store without key collisions.
pub fn settings_key(project_id: &str) -> String {
    format!("telegram-{project_id}")
}

/// Installation settings for one helpdesk project.
///
/// Created on first successful configuration, overwritten whole on
/// reconfiguration, deleted on disconnect. There are no partial updates.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    /// Helpdesk project identifier.
    pub project_id: String,

    /// Helpdesk API auth token for project-scoped calls.
    pub token: String,

    /// Subscription identifier assigned when the channel was registered.
    pub subscription_id: String,

    /// Secret used to sign custom sign-in tokens.
    pub secret: String,

    /// Bot display name.
    pub bot_name: String,

    /// Telegram bot token.
    pub bot_token: String,

    /// Forward `info/support` notifications into the chat.
    #[serde(default)]
    pub show_info_message: bool,
}

impl std::fmt::Debug for ProjectSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSettings")
            .field("project_id", &self.project_id)
            .field("token", &"[REDACTED]")
            .field("subscription_id", &self.subscription_id)
            .field("secret", &"[REDACTED]")
            .field("bot_name", &self.bot_name)
            .field("bot_token", &"[REDACTED]")
            .field("show_info_message", &self.show_info_message)
            .finish()
    }
}

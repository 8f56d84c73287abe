//! Ticket → bot inbound surface.
//!
//! The helpdesk platform posts every conversation event for the subscribed
//! channel here. Most events are skipped: the bridge's own deliveries echo
//! back through the subscription, and the platform emits internal `info`
//! events that must never reach the chat. Everything on this path answers
//! 200 — the relay is best-effort and an error response would only trigger
//! the platform's retry storm.

use std::sync::Arc;

use {
    axum::{
        extract::{Query, State},
        response::Json,
    },
    serde::Deserialize,
    tracing::{debug, error, info},
};

use {
    deskrelay_helpdesk::types::TicketMessage, deskrelay_settings::ProjectSettings,
    deskrelay_translator::to_telegram,
};

use crate::{
    server::{ProjectQuery, Status, status},
    state::AppState,
};

/// Label the platform stamps on duplicate lead-update notifications.
const LEAD_UPDATED: &str = "LEAD_UPDATED";

/// Subscription event envelope: the message itself rides under `payload`.
#[derive(Debug, Deserialize)]
pub struct TicketEvent {
    pub payload: TicketMessage,
}

/// Why an event was not forwarded. Pulled out of the handler so the decision
/// table is testable without a running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The sender is this bridge's own chat-side delivery looping back.
    Echo,
    /// Bridge-internal `info` event.
    InfoSubtype,
    /// Duplicate lead-update notification, dropped regardless of settings.
    LeadUpdate,
    /// `info/support` event and the project keeps those hidden.
    InfoSupportHidden,
}

/// Skip-vs-forward decision for one inbound ticket event, in match order.
pub fn skip_reason(
    message: &TicketMessage,
    settings: Option<&ProjectSettings>,
) -> Option<SkipReason> {
    if message
        .sender
        .as_deref()
        .is_some_and(|sender| sender.starts_with("telegram-"))
    {
        return Some(SkipReason::Echo);
    }

    let attributes = message.attributes.as_ref();
    let subtype = attributes.and_then(|a| a.subtype.as_deref());

    if subtype == Some("info") {
        return Some(SkipReason::InfoSubtype);
    }

    if subtype == Some("info/support") {
        let label = attributes
            .and_then(|a| a.messagelabel.as_ref())
            .and_then(|l| l.key.as_deref());
        if label == Some(LEAD_UPDATED) {
            return Some(SkipReason::LeadUpdate);
        }
        if !settings.is_some_and(|s| s.show_info_message) {
            return Some(SkipReason::InfoSupportHidden);
        }
    }

    None
}

pub async fn inbound(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectQuery>,
    Json(event): Json<TicketEvent>,
) -> Json<Status> {
    let message = event.payload;
    let project_id = &query.project_id;

    let settings = match state.settings_for(project_id).await {
        Ok(settings) => settings,
        Err(err) => {
            error!(project_id, %err, "settings lookup failed");
            return status("settings unavailable");
        },
    };

    if let Some(reason) = skip_reason(&message, settings.as_ref()) {
        debug!(project_id, ?reason, "skipping ticket event");
        return status("skipped");
    }

    let Some(settings) = settings else {
        info!(project_id, "ticket event for a project without an installation");
        return status(format!(
            "{} not installed for this project",
            state.config.display_name()
        ));
    };

    // Destination chat id rides in the recipient's trailing segment.
    let Some(chat_id) = message
        .recipient
        .as_deref()
        .and_then(|r| r.rsplit('-').next())
        .filter(|id| !id.is_empty())
    else {
        info!(project_id, "ticket event without a usable recipient");
        return status("no recipient");
    };

    let outbound = match to_telegram(&message, chat_id) {
        Ok(outbound) => outbound,
        Err(err) => {
            info!(project_id, %err, "dropping untranslatable ticket event");
            return status("not forwarded");
        },
    };

    match state.outbound.send(&settings.bot_token, &outbound).await {
        Ok(()) => status("message sent"),
        Err(err) => {
            error!(project_id, chat_id, %err, "telegram delivery failed");
            status("delivery failed")
        },
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use deskrelay_helpdesk::types::{MessageLabel, TicketAttributes};

    use super::*;

    fn make_settings(show_info_message: bool) -> ProjectSettings {
        ProjectSettings {
            project_id: "p1".into(),
            token: "tok".into(),
            subscription_id: "sub".into(),
            secret: "sec".into(),
            bot_name: "helpbot".into(),
            bot_token: "123:ABC".into(),
            show_info_message,
        }
    }

    fn event(sender: Option<&str>, subtype: Option<&str>, label: Option<&str>) -> TicketMessage {
        TicketMessage {
            text: "Test Message".into(),
            sender: sender.map(Into::into),
            attributes: subtype.map(|subtype| TicketAttributes {
                subtype: Some(subtype.into()),
                messagelabel: label.map(|key| MessageLabel {
                    key: Some(key.into()),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn own_echo_is_skipped_first() {
        let message = event(Some("telegram-238070007"), Some("info"), None);
        assert_eq!(
            skip_reason(&message, Some(&make_settings(true))),
            Some(SkipReason::Echo)
        );
    }

    #[test]
    fn agent_sender_is_not_an_echo() {
        let message = event(Some("5e9a2c4b1f"), None, None);
        assert_eq!(skip_reason(&message, Some(&make_settings(false))), None);
    }

    #[test]
    fn info_subtype_never_crosses() {
        let message = event(Some("agent-1"), Some("info"), None);
        assert_eq!(
            skip_reason(&message, Some(&make_settings(true))),
            Some(SkipReason::InfoSubtype)
        );
    }

    #[test]
    fn lead_update_is_skipped_even_when_info_messages_are_shown() {
        let message = event(Some("agent-1"), Some("info/support"), Some(LEAD_UPDATED));
        assert_eq!(
            skip_reason(&message, Some(&make_settings(true))),
            Some(SkipReason::LeadUpdate)
        );
    }

    #[test]
    fn info_support_respects_the_project_flag() {
        let message = event(Some("agent-1"), Some("info/support"), Some("OTHER"));
        assert_eq!(
            skip_reason(&message, Some(&make_settings(false))),
            Some(SkipReason::InfoSupportHidden)
        );
        assert_eq!(skip_reason(&message, Some(&make_settings(true))), None);
    }

    #[test]
    fn info_support_without_settings_is_hidden() {
        let message = event(Some("agent-1"), Some("info/support"), None);
        assert_eq!(
            skip_reason(&message, None),
            Some(SkipReason::InfoSupportHidden)
        );
    }

    #[test]
    fn ordinary_message_is_forwarded() {
        let message = event(Some("agent-1"), None, None);
        assert_eq!(skip_reason(&message, None), None);
    }
}

//! Bot → ticket inbound surface.
//!
//! The Bot API delivers every update for the registered webhook here.
//! Edits are rejected outright (the ticket side has no way to reconcile
//! them), and a project without a settings record answers with a
//! user-visible "not installed" so the platform stops knocking.

use std::sync::Arc;

use {
    axum::{
        extract::{Query, State},
        http::StatusCode,
        response::Json,
    },
    tracing::{debug, error, info, warn},
};

use {
    deskrelay_helpdesk::SenderContext,
    deskrelay_telegram::types::{CallbackQuery, InboundEvent, Update},
    deskrelay_translator::to_ticket,
};

use crate::{
    server::{ProjectQuery, Status, status},
    state::AppState,
};

pub async fn inbound(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProjectQuery>,
    Json(update): Json<Update>,
) -> (StatusCode, Json<Status>) {
    let project_id = &query.project_id;

    match update.classify() {
        InboundEvent::Empty => {
            debug!(project_id, "update carries neither message nor callback");
            return (StatusCode::OK, status("Message not sent"));
        },
        InboundEvent::EditedMessage(_) => {
            info!(project_id, "rejecting edited message");
            return (
                StatusCode::OK,
                status("Edited messages are not supported. Message ignored."),
            );
        },
        InboundEvent::Message(_) | InboundEvent::Callback(_) => {},
    }

    let settings = match state.settings_for(project_id).await {
        Ok(settings) => settings,
        Err(err) => {
            error!(project_id, %err, "settings lookup failed");
            return (StatusCode::OK, status("settings unavailable"));
        },
    };
    let Some(settings) = settings else {
        info!(project_id, "update for a project without an installation");
        return (
            StatusCode::OK,
            status(format!(
                "{} not installed for this project",
                state.config.display_name()
            )),
        );
    };

    // A pressed button stays pressed: drop the inline keyboard before
    // anything else so a second press cannot land while this one relays.
    if let InboundEvent::Callback(callback) = update.classify() {
        clear_keyboard(&state, &settings.bot_token, callback).await;
    }

    let media_path = match resolve_media(&state, &settings.bot_token, &update).await {
        Ok(path) => path,
        Err(err) => {
            error!(project_id, %err, "media resolution failed");
            return (StatusCode::OK, status("media resolution failed"));
        },
    };

    let ticket_message = match to_ticket(
        &update,
        &settings.bot_token,
        &state.config.telegram_file_url,
        media_path.as_deref(),
    ) {
        Ok(message) => message,
        Err(err) => {
            info!(project_id, %err, "untranslatable update");
            return (StatusCode::BAD_REQUEST, status("unsupported message"));
        },
    };

    let Some(sender) = sender_context(&update) else {
        info!(project_id, "update without an identifiable sender");
        return (StatusCode::BAD_REQUEST, status("sender missing"));
    };

    match state.helpdesk.send(&settings, &ticket_message, &sender).await {
        Ok(()) => (StatusCode::OK, status("message sent")),
        Err(err) => {
            error!(project_id, chat_id = %sender.chat_id, %err, "helpdesk delivery failed");
            (StatusCode::OK, status("delivery failed"))
        },
    }
}

/// Best-effort removal of the inline keyboard a callback originated from.
/// Failure is logged and the event continues.
async fn clear_keyboard(state: &AppState, bot_token: &str, callback: &CallbackQuery) {
    let Some((chat_id, message_id)) = callback.message.as_ref().and_then(|message| {
        let chat = message.chat.as_ref()?;
        Some((chat.id, message.message_id?))
    }) else {
        debug!("callback without an originating message, nothing to clear");
        return;
    };
    if let Err(err) = state
        .telegram
        .clear_reply_markup(bot_token, chat_id, message_id)
        .await
    {
        warn!(chat_id, message_id, %err, "failed to clear inline keyboard");
    }
}

/// Resolve the update's media (if any) to a downloadable path. Photos use
/// the highest-resolution variant; text and callbacks resolve to `None`.
async fn resolve_media(
    state: &AppState,
    bot_token: &str,
    update: &Update,
) -> deskrelay_telegram::Result<Option<String>> {
    match update.message.as_ref().and_then(|m| m.media_file_id()) {
        Some(file_id) => Ok(Some(state.telegram.get_file(bot_token, file_id).await?)),
        None => Ok(None),
    }
}

/// Who is speaking, for sign-in claims and request-id minting. The user id
/// doubles as the chat id on the ticket side.
fn sender_context(update: &Update) -> Option<SenderContext> {
    let from = match update.classify() {
        InboundEvent::Message(message) => message.from.as_ref(),
        InboundEvent::Callback(callback) => callback.from.as_ref(),
        InboundEvent::EditedMessage(_) | InboundEvent::Empty => None,
    }?;
    Some(SenderContext {
        chat_id: from.id?.to_string(),
        first_name: from.first_name.clone(),
        last_name: from.last_name.clone().unwrap_or_default(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sender_context_from_a_message() {
        let update: Update = serde_json::from_str(
            r#"{"message":{
                "from":{"id":238070007,"first_name":"John","last_name":"Doe"},
                "chat":{"id":238070007},
                "text":"hi"
            }}"#,
        )
        .unwrap();
        let sender = sender_context(&update).unwrap();
        assert_eq!(sender.chat_id, "238070007");
        assert_eq!(sender.first_name, "John");
        assert_eq!(sender.last_name, "Doe");
    }

    #[test]
    fn sender_context_from_a_callback() {
        let update: Update = serde_json::from_str(
            r#"{"callback_query":{
                "from":{"id":42,"first_name":"Jane"},
                "data":"{\"type\":\"text\",\"value\":\"Yes\"}"
            }}"#,
        )
        .unwrap();
        let sender = sender_context(&update).unwrap();
        assert_eq!(sender.chat_id, "42");
        assert_eq!(sender.last_name, "");
    }

    #[test]
    fn sender_context_requires_an_id() {
        let update: Update =
            serde_json::from_str(r#"{"message":{"from":{"first_name":"John"},"text":"hi"}}"#)
                .unwrap();
        assert!(sender_context(&update).is_none());
    }
}

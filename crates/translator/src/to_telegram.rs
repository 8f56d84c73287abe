//! Ticket → bot translation.

use {
    deskrelay_helpdesk::types::TicketMessage,
    deskrelay_telegram::{
        callback::{ACTION_TOKEN_LIMIT, CallbackToken, TEXT_TOKEN_LIMIT, display_label},
        types::{InlineKeyboardButton, InlineKeyboardMarkup, OutboundMessage},
    },
};

use crate::{
    canonical::{Button, ButtonKind, CanonicalMessage, MediaRef},
    error::UnsupportedContent,
};

/// Translate a ticket-side message into a bot message for `chat_id`.
pub fn to_telegram(
    message: &TicketMessage,
    chat_id: &str,
) -> Result<OutboundMessage, UnsupportedContent> {
    render_outbound(classify_ticket(message)?, chat_id)
}

/// Classify a ticket message into the pivot form. First match wins: media
/// metadata, then an interactive attachment, then plain text.
pub fn classify_ticket(message: &TicketMessage) -> Result<CanonicalMessage, UnsupportedContent> {
    let sender = message.sender_fullname.clone();
    let body = message.text.clone();

    if let Some(metadata) = &message.metadata {
        let mime = metadata.mime_type.clone().unwrap_or_default();
        let media = MediaRef {
            source_url: metadata.src.clone(),
            mime_type: metadata.mime_type.clone(),
            file_name: metadata.name.clone(),
            width: metadata.width,
            height: metadata.height,
        };
        return if mime.starts_with("image") {
            Ok(CanonicalMessage::Image {
                sender,
                body,
                media,
            })
        } else if mime.starts_with("video") {
            Ok(CanonicalMessage::Video {
                sender,
                body,
                media,
            })
        } else if mime.starts_with("application") {
            Ok(CanonicalMessage::Document {
                sender,
                body,
                media,
            })
        } else {
            Err(UnsupportedContent::MimeType(mime))
        };
    }

    if let Some(attachment) = message
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.attachment.as_ref())
    {
        if attachment.buttons.is_empty() {
            return Err(UnsupportedContent::EmptyButtonList);
        }
        let buttons = attachment.buttons.iter().map(Button::from_ticket).collect();
        return Ok(CanonicalMessage::ButtonPrompt {
            sender,
            body,
            buttons,
        });
    }

    Ok(CanonicalMessage::Text { sender, body })
}

/// Render the pivot form as an outbound bot message.
pub fn render_outbound(
    message: CanonicalMessage,
    chat_id: &str,
) -> Result<OutboundMessage, UnsupportedContent> {
    match message {
        CanonicalMessage::Text { body, .. } => Ok(OutboundMessage::text(chat_id, body)),
        CanonicalMessage::Image { body, media, .. } => {
            Ok(OutboundMessage::photo(chat_id, media.source_url, body))
        },
        CanonicalMessage::Video { body, media, .. } => {
            Ok(OutboundMessage::video(chat_id, media.source_url, body))
        },
        CanonicalMessage::Document { body, media, .. } => {
            Ok(OutboundMessage::document(chat_id, media.source_url, body))
        },
        CanonicalMessage::ButtonPrompt { body, buttons, .. } => {
            let rows = buttons.iter().map(|button| vec![inline_button(button)]).collect();
            Ok(OutboundMessage::text_with_buttons(
                chat_id,
                body,
                InlineKeyboardMarkup::new(rows),
            ))
        },
        CanonicalMessage::ActionAck { .. } => {
            Err(UnsupportedContent::UpdateKind("action acknowledgement"))
        },
    }
}

/// One inline button per source button; `action`/`text` buttons round-trip
/// a callback token, truncated independently of the displayed label.
fn inline_button(button: &Button) -> InlineKeyboardButton {
    match button.kind {
        ButtonKind::Url => InlineKeyboardButton::url(button.label.clone(), button.value.clone()),
        ButtonKind::Action => {
            let source = button.action_id.as_deref().unwrap_or(&button.label);
            let token = CallbackToken::action(source);
            InlineKeyboardButton::callback(
                display_label(&button.label, ACTION_TOKEN_LIMIT),
                token.encode(),
            )
        },
        ButtonKind::Text => {
            let token = CallbackToken::text(&button.value);
            InlineKeyboardButton::callback(
                display_label(&button.label, TEXT_TOKEN_LIMIT),
                token.encode(),
            )
        },
    }
}

//! Bot → ticket translation.

use {
    deskrelay_helpdesk::types::{
        Channel, MessageType, TicketAttachment, TicketAttributes, TicketMedia, TicketMessage,
    },
    deskrelay_telegram::{
        callback::CallbackToken,
        types::{InboundEvent, TgMessage, TgUser, Update},
    },
};

use crate::{
    canonical::{CanonicalMessage, MediaRef},
    error::UnsupportedContent,
};

/// Caption used when a photo arrives without one.
const IMAGE_PLACEHOLDER: &str = "Attached image";

/// Translate an inbound bot update into a ticket message.
///
/// `media_path` is the downloadable path the router resolved via `getFile`;
/// it is required whenever the update carries media.
pub fn to_ticket(
    update: &Update,
    bot_token: &str,
    file_url_base: &str,
    media_path: Option<&str>,
) -> Result<TicketMessage, UnsupportedContent> {
    classify_update(update, bot_token, file_url_base, media_path).map(render_ticket)
}

fn classify_update(
    update: &Update,
    bot_token: &str,
    file_url_base: &str,
    media_path: Option<&str>,
) -> Result<CanonicalMessage, UnsupportedContent> {
    match update.classify() {
        InboundEvent::Callback(callback) => {
            let data = callback
                .data
                .as_deref()
                .ok_or_else(|| UnsupportedContent::MalformedCallback("missing data".into()))?;
            let token = CallbackToken::decode(data)
                .map_err(|e| UnsupportedContent::MalformedCallback(e.to_string()))?;
            let sender = callback.from.as_ref().map(TgUser::display_name);
            match token {
                CallbackToken::Action { value } => Ok(CanonicalMessage::ActionAck {
                    sender,
                    action: value,
                }),
                CallbackToken::Text { value } => Ok(CanonicalMessage::Text {
                    sender,
                    body: value,
                }),
            }
        },
        InboundEvent::Message(message) => {
            classify_message(message, bot_token, file_url_base, media_path)
        },
        InboundEvent::EditedMessage(_) => Err(UnsupportedContent::UpdateKind("edited message")),
        InboundEvent::Empty => Err(UnsupportedContent::UpdateKind("empty update")),
    }
}

fn classify_message(
    message: &TgMessage,
    bot_token: &str,
    file_url_base: &str,
    media_path: Option<&str>,
) -> Result<CanonicalMessage, UnsupportedContent> {
    let sender = message.from.as_ref().map(TgUser::display_name);

    if let Some(photo) = message.largest_photo() {
        let source_url = media_url(file_url_base, bot_token, media_path)?;
        let body = message
            .caption
            .clone()
            .unwrap_or_else(|| IMAGE_PLACEHOLDER.to_string());
        return Ok(CanonicalMessage::Image {
            sender,
            body,
            media: MediaRef {
                source_url,
                mime_type: None,
                file_name: None,
                width: Some(photo.width),
                height: Some(photo.height),
            },
        });
    }

    if let Some(video) = &message.video {
        let source_url = media_url(file_url_base, bot_token, media_path)?;
        let name = video.file_name.as_deref().unwrap_or("video");
        return Ok(CanonicalMessage::Video {
            sender,
            body: format!("[{name}]({source_url})"),
            media: MediaRef {
                source_url,
                mime_type: video.mime_type.clone(),
                file_name: Some(name.to_string()),
                width: None,
                height: None,
            },
        });
    }

    if let Some(document) = &message.document {
        let source_url = media_url(file_url_base, bot_token, media_path)?;
        let name = document.file_name.as_deref().unwrap_or("document");
        return Ok(CanonicalMessage::Document {
            sender,
            body: format!("[{name}]({source_url})"),
            media: MediaRef {
                source_url,
                mime_type: document.mime_type.clone(),
                file_name: Some(name.to_string()),
                width: None,
                height: None,
            },
        });
    }

    if let Some(text) = &message.text {
        return Ok(CanonicalMessage::Text {
            sender,
            body: text.clone(),
        });
    }

    Err(UnsupportedContent::UpdateKind("unrecognized message content"))
}

fn media_url(
    file_url_base: &str,
    bot_token: &str,
    media_path: Option<&str>,
) -> Result<String, UnsupportedContent> {
    let path =
        media_path.ok_or(UnsupportedContent::UpdateKind("media without a resolved path"))?;
    Ok(format!("{file_url_base}{bot_token}/{path}"))
}

/// Render the pivot form as a ticket message.
fn render_ticket(message: CanonicalMessage) -> TicketMessage {
    let base = TicketMessage {
        channel: Some(Channel::telegram()),
        ..Default::default()
    };
    match message {
        CanonicalMessage::Text { sender, body } => TicketMessage {
            text: body,
            sender_fullname: sender,
            ..base
        },
        CanonicalMessage::Image {
            sender,
            body,
            media,
        } => TicketMessage {
            text: body,
            sender_fullname: sender,
            message_type: MessageType::Image,
            metadata: Some(TicketMedia {
                src: media.source_url,
                mime_type: None,
                name: None,
                width: media.width,
                height: media.height,
            }),
            ..base
        },
        CanonicalMessage::Video {
            sender,
            body,
            media,
        } => TicketMessage {
            text: body,
            sender_fullname: sender,
            message_type: MessageType::Video,
            metadata: Some(TicketMedia {
                src: media.source_url,
                mime_type: media.mime_type,
                name: media.file_name,
                width: None,
                height: None,
            }),
            ..base
        },
        CanonicalMessage::Document {
            sender,
            body,
            media,
        } => TicketMessage {
            text: body,
            sender_fullname: sender,
            message_type: MessageType::File,
            metadata: Some(TicketMedia {
                src: media.source_url,
                mime_type: media.mime_type,
                name: media.file_name,
                width: None,
                height: None,
            }),
            ..base
        },
        CanonicalMessage::ButtonPrompt {
            sender,
            body,
            buttons,
        } => TicketMessage {
            text: body,
            sender_fullname: sender,
            attributes: Some(TicketAttributes {
                attachment: Some(TicketAttachment {
                    buttons: buttons.into_iter().map(|b| b.into_ticket()).collect(),
                }),
                ..Default::default()
            }),
            ..base
        },
        CanonicalMessage::ActionAck { sender, action } => TicketMessage {
            text: " ".into(),
            sender_fullname: sender,
            attributes: Some(TicketAttributes {
                subtype: Some("info".into()),
                action: Some(action),
                ..Default::default()
            }),
            ..base
        },
    }
}

//! Wire types for the Bot API webhook envelope and outbound send calls.

use serde::{Deserialize, Serialize};

// ── Inbound ─────────────────────────────────────────────────────────────────

/// The webhook envelope. Exactly one of the payload fields is populated per
/// delivery; everything the platform sends that we do not model is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: Option<i64>,
    pub message: Option<TgMessage>,
    pub edited_message: Option<TgMessage>,
    pub callback_query: Option<CallbackQuery>,
}

/// Router-level classification of an inbound update. Derived from the
/// envelope shape alone, before any translation happens.
#[derive(Debug)]
pub enum InboundEvent<'a> {
    /// An edit of an already-delivered message. Never reconciled.
    EditedMessage(&'a TgMessage),
    /// A button press round-tripping a callback token.
    Callback(&'a CallbackQuery),
    /// A fresh message (text or media).
    Message(&'a TgMessage),
    /// Neither message nor callback present.
    Empty,
}

impl Update {
    pub fn classify(&self) -> InboundEvent<'_> {
        if let Some(edited) = &self.edited_message {
            return InboundEvent::EditedMessage(edited);
        }
        if let Some(callback) = &self.callback_query {
            return InboundEvent::Callback(callback);
        }
        if let Some(message) = &self.message {
            return InboundEvent::Message(message);
        }
        InboundEvent::Empty
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgUser {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl TgUser {
    /// "first_name last_name", trimmed when the last name is absent.
    pub fn display_name(&self) -> String {
        let last = self.last_name.as_deref().unwrap_or("");
        format!("{} {}", self.first_name, last).trim_end().to_string()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgChat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgMessage {
    pub message_id: Option<i64>,
    pub from: Option<TgUser>,
    pub chat: Option<TgChat>,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// Resolution variants in ascending size order.
    pub photo: Option<Vec<PhotoSize>>,
    pub video: Option<TgVideo>,
    pub document: Option<TgDocument>,
}

impl TgMessage {
    /// Highest-resolution variant (the platform lists sizes ascending).
    pub fn largest_photo(&self) -> Option<&PhotoSize> {
        self.photo.as_ref().and_then(|sizes| sizes.last())
    }

    /// File identifier the router must resolve to a downloadable path
    /// before translation. `None` for plain text messages.
    pub fn media_file_id(&self) -> Option<&str> {
        if let Some(photo) = self.largest_photo() {
            return Some(&photo.file_id);
        }
        if let Some(video) = &self.video {
            return Some(&video.file_id);
        }
        if let Some(document) = &self.document {
            return Some(&document.file_id);
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub width: i64,
    pub height: i64,
    pub file_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgVideo {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TgDocument {
    pub file_id: String,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: Option<String>,
    pub from: Option<TgUser>,
    /// The message the pressed keyboard was attached to.
    pub message: Option<TgMessage>,
    pub data: Option<String>,
}

// ── Outbound ────────────────────────────────────────────────────────────────

/// Rendering mode carried by every outbound message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[default]
    #[serde(rename = "markdown")]
    Markdown,
}

/// A translated message ready for the Bot API, one variant per send
/// operation. Adding a variant without handling it in the dispatcher is a
/// compile error, not a silently dropped message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Photo {
        chat_id: String,
        parse_mode: ParseMode,
        photo: String,
        caption: String,
    },
    Video {
        chat_id: String,
        parse_mode: ParseMode,
        video: String,
        caption: String,
    },
    Document {
        chat_id: String,
        parse_mode: ParseMode,
        document: String,
        caption: String,
    },
    Text {
        chat_id: String,
        parse_mode: ParseMode,
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply_markup: Option<InlineKeyboardMarkup>,
    },
}

impl OutboundMessage {
    pub fn text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Text {
            chat_id: chat_id.into(),
            parse_mode: ParseMode::Markdown,
            text: text.into(),
            reply_markup: None,
        }
    }

    pub fn text_with_buttons(
        chat_id: impl Into<String>,
        text: impl Into<String>,
        markup: InlineKeyboardMarkup,
    ) -> Self {
        Self::Text {
            chat_id: chat_id.into(),
            parse_mode: ParseMode::Markdown,
            text: text.into(),
            reply_markup: Some(markup),
        }
    }

    pub fn photo(
        chat_id: impl Into<String>,
        url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self::Photo {
            chat_id: chat_id.into(),
            parse_mode: ParseMode::Markdown,
            photo: url.into(),
            caption: caption.into(),
        }
    }

    pub fn video(
        chat_id: impl Into<String>,
        url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self::Video {
            chat_id: chat_id.into(),
            parse_mode: ParseMode::Markdown,
            video: url.into(),
            caption: caption.into(),
        }
    }

    pub fn document(
        chat_id: impl Into<String>,
        url: impl Into<String>,
        caption: impl Into<String>,
    ) -> Self {
        Self::Document {
            chat_id: chat_id.into(),
            parse_mode: ParseMode::Markdown,
            document: url.into(),
            caption: caption.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        match self {
            Self::Photo { chat_id, .. }
            | Self::Video { chat_id, .. }
            | Self::Document { chat_id, .. }
            | Self::Text { chat_id, .. } => chat_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
            resize_keyboard: true,
            one_time_keyboard: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
}

impl InlineKeyboardButton {
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: Some(url.into()),
            callback_data: None,
        }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: Some(data.into()),
        }
    }
}

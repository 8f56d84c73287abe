//! Wire types for the helpdesk conversation protocol.
//!
//! The same message shape flows both ways: events arriving from the
//! platform's subscription webhook and messages we post into a support
//! request. Fields the bridge never sets are optional and skipped on
//! serialization.

use serde::{Deserialize, Serialize};

/// Channel tag stamped on every message the bridge produces.
pub const CHANNEL_NAME: &str = "telegram";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
}

impl Channel {
    pub fn telegram() -> Self {
        Self {
            name: CHANNEL_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    Video,
    File,
    /// Anything the platform adds that the bridge does not model.
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketMessage {
    #[serde(default)]
    pub text: String,

    /// Sender identifier, set on inbound subscription events. The bridge's
    /// own deliveries show up here with a `telegram-` prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_fullname: Option<String>,

    #[serde(rename = "type", default)]
    pub message_type: MessageType,

    /// Conversation recipient, set on inbound events. The destination chat
    /// id is the segment after the last `-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TicketMedia>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<TicketAttributes>,
}

/// Media descriptor carried alongside image/video/file messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TicketMedia {
    pub src: String,

    /// MIME type; the translator classifies on its prefix. Image metadata
    /// arriving from the bot side carries no type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TicketAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    /// Action id acknowledged back to the platform after a button press.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<TicketAttachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messagelabel: Option<MessageLabel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TicketAttachment {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<TicketButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TicketButton {
    #[serde(rename = "type")]
    pub kind: ButtonKind,

    /// Button label; also the round-trip payload when `action`/`link` are
    /// absent.
    pub value: String,

    /// Target for `url` buttons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Explicit action id for `action` buttons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Url,
    Action,
    Text,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_subscription_event() {
        let json = r#"{
            "text": "Test Message",
            "sender": "5e9a2c...",
            "senderFullname": "Agent Smith",
            "recipient": "support-group-62c3f101-86a2293e-telegram-238070007",
            "attributes": { "subtype": "info/support", "messagelabel": { "key": "LEAD_UPDATED" } }
        }"#;
        let message: TicketMessage = serde_json::from_str(json).unwrap();
        assert_eq!(message.text, "Test Message");
        assert_eq!(message.message_type, MessageType::Text);
        assert_eq!(
            message.attributes.unwrap().messagelabel.unwrap().key.as_deref(),
            Some("LEAD_UPDATED")
        );
    }

    #[test]
    fn unknown_message_type_maps_to_other() {
        let message: TicketMessage =
            serde_json::from_str(r#"{"text":"x","type":"frame"}"#).unwrap();
        assert_eq!(message.message_type, MessageType::Other);
    }

    #[test]
    fn serializes_camel_case_and_skips_unset_fields() {
        let message = TicketMessage {
            text: "Test Message".into(),
            sender_fullname: Some("John Doe".into()),
            channel: Some(Channel::telegram()),
            ..Default::default()
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["senderFullname"], "John Doe");
        assert_eq!(json["channel"]["name"], "telegram");
        assert_eq!(json["type"], "text");
        assert!(json.get("recipient").is_none());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn buttons_deserialize_with_their_kind() {
        let json = r#"{"buttons": [
            {"type": "url", "value": "Open", "link": "https://example.com"},
            {"type": "action", "value": "Close ticket", "action": "close"},
            {"type": "text", "value": "Yes"}
        ]}"#;
        let attachment: TicketAttachment = serde_json::from_str(json).unwrap();
        assert_eq!(attachment.buttons.len(), 3);
        assert_eq!(attachment.buttons[0].kind, ButtonKind::Url);
        assert_eq!(attachment.buttons[1].action.as_deref(), Some("close"));
        assert_eq!(attachment.buttons[2].kind, ButtonKind::Text);
    }
}

//! The pivot representation both translation directions meet in.

use deskrelay_helpdesk::types::{self, TicketButton};

/// Where a piece of media lives and what it is. `mime_type` is absent for
/// photos arriving from the bot side (the platform does not send one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRef {
    pub source_url: String,
    pub mime_type: Option<String>,
    pub file_name: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// A message in flight between the two protocols. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalMessage {
    Text {
        sender: Option<String>,
        body: String,
    },
    Image {
        sender: Option<String>,
        body: String,
        media: MediaRef,
    },
    Video {
        sender: Option<String>,
        body: String,
        media: MediaRef,
    },
    Document {
        sender: Option<String>,
        body: String,
        media: MediaRef,
    },
    /// A message offering interactive buttons.
    ButtonPrompt {
        sender: Option<String>,
        body: String,
        buttons: Vec<Button>,
    },
    /// Acknowledgement of an `action` button press. Produces no visible
    /// chat text on the ticket side, only the action id in the attributes.
    ActionAck {
        sender: Option<String>,
        action: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub kind: ButtonKind,
    /// Text shown on the button face.
    pub label: String,
    /// Payload: the link target for `Url`, the reply text for `Text`.
    pub value: String,
    /// Explicit action id for `Action` buttons; falls back to the label.
    pub action_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Url,
    Action,
    Text,
}

impl Button {
    pub fn from_ticket(button: &TicketButton) -> Self {
        let kind = match button.kind {
            types::ButtonKind::Url => ButtonKind::Url,
            types::ButtonKind::Action => ButtonKind::Action,
            types::ButtonKind::Text => ButtonKind::Text,
        };
        Self {
            kind,
            label: button.value.clone(),
            value: button.link.clone().unwrap_or_else(|| button.value.clone()),
            action_id: button.action.clone(),
        }
    }

    pub fn into_ticket(self) -> TicketButton {
        let kind = match self.kind {
            ButtonKind::Url => types::ButtonKind::Url,
            ButtonKind::Action => types::ButtonKind::Action,
            ButtonKind::Text => types::ButtonKind::Text,
        };
        TicketButton {
            kind,
            link: (self.kind == ButtonKind::Url).then_some(self.value),
            action: self.action_id,
            value: self.label,
        }
    }
}

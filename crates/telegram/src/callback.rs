//! Callback tokens: the opaque string a button round-trips through the
//! platform's `callback_data` field.
//!
//! The platform caps `callback_data` at 64 bytes, so the carried value is
//! hard-cut before encoding. With the `{"type":…,"value":…}` framing the
//! cut lands the encoded token at exactly 64 bytes for ASCII values; values
//! containing JSON-escaped characters shrink the effective budget.

use serde::{Deserialize, Serialize};

/// Byte cap the platform enforces on `callback_data`.
pub const CALLBACK_DATA_LIMIT: usize = 64;

/// Hard cut applied to an action id before encoding.
pub const ACTION_TOKEN_LIMIT: usize = 36;

/// Hard cut applied to a text value before encoding.
pub const TEXT_TOKEN_LIMIT: usize = 38;

/// State carried through a button press, reconstructed on the return leg.
///
/// The wire shape is versioned by the `type` tag; both variants carry their
/// payload under `value` so the framing overhead is uniform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CallbackToken {
    Action { value: String },
    Text { value: String },
}

impl CallbackToken {
    /// Token for an `action` button; the action id is cut to fit the budget.
    pub fn action(value: &str) -> Self {
        Self::Action {
            value: clip(value, ACTION_TOKEN_LIMIT).to_string(),
        }
    }

    /// Token for a `text` button; the reply text is cut to fit the budget.
    pub fn text(value: &str) -> Self {
        Self::Text {
            value: clip(value, TEXT_TOKEN_LIMIT).to_string(),
        }
    }

    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn decode(data: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Action { value } | Self::Text { value } => value,
        }
    }
}

/// Label shown on the button. Values that would overflow the matching token
/// budget are clipped two bytes short and suffixed with `..`.
pub fn display_label(value: &str, token_limit: usize) -> String {
    if value.len() > token_limit {
        format!("{}..", clip(value, token_limit.saturating_sub(2)))
    } else {
        value.to_string()
    }
}

/// Cut to at most `max` bytes without splitting a char.
fn clip(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_token_roundtrip_below_threshold() {
        let token = CallbackToken::action("open_ticket");
        let decoded = CallbackToken::decode(&token.encode()).unwrap();
        assert_eq!(decoded, token);
        assert_eq!(decoded.value(), "open_ticket");
    }

    #[test]
    fn text_token_roundtrip_below_threshold() {
        let token = CallbackToken::text("Yes, close it");
        let decoded = CallbackToken::decode(&token.encode()).unwrap();
        assert_eq!(decoded.value(), "Yes, close it");
    }

    #[test]
    fn long_action_value_is_hard_cut() {
        let long = "a".repeat(50);
        let token = CallbackToken::action(&long);
        assert_eq!(token.value().len(), ACTION_TOKEN_LIMIT);
    }

    #[test]
    fn long_text_value_is_hard_cut() {
        let long = "b".repeat(50);
        let token = CallbackToken::text(&long);
        assert_eq!(token.value().len(), TEXT_TOKEN_LIMIT);
    }

    #[test]
    fn encoded_token_fits_callback_data_budget_at_the_extremes() {
        let action = CallbackToken::action(&"a".repeat(200));
        assert!(action.encode().len() <= CALLBACK_DATA_LIMIT);
        let text = CallbackToken::text(&"b".repeat(200));
        assert!(text.encode().len() <= CALLBACK_DATA_LIMIT);
    }

    #[test]
    fn truncated_token_still_decodes() {
        let token = CallbackToken::text(&"c".repeat(80));
        let decoded = CallbackToken::decode(&token.encode()).unwrap();
        assert_eq!(decoded.value().len(), TEXT_TOKEN_LIMIT);
    }

    #[test]
    fn clip_respects_char_boundaries() {
        // Each 'é' is two bytes; an odd byte cut must back off to a boundary.
        let value = "é".repeat(30);
        let token = CallbackToken::action(&value);
        assert!(token.value().len() <= ACTION_TOKEN_LIMIT);
        assert!(token.value().chars().all(|c| c == 'é'));
    }

    #[test]
    fn short_label_is_untouched() {
        assert_eq!(display_label("Confirm", ACTION_TOKEN_LIMIT), "Confirm");
    }

    #[test]
    fn long_label_gets_ellipsis() {
        let label = display_label(&"x".repeat(50), ACTION_TOKEN_LIMIT);
        assert_eq!(label.len(), ACTION_TOKEN_LIMIT);
        assert!(label.ends_with(".."));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(CallbackToken::decode("not json").is_err());
        assert!(CallbackToken::decode(r#"{"type":"poll","value":"x"}"#).is_err());
    }
}

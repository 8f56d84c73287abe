//! Outbound dispatcher: one translated message, one Bot API call.

use tracing::debug;

use crate::{client::TelegramClient, error::Result, types::OutboundMessage};

/// Selects the send operation matching the translated payload shape and
/// hands it to the client. No fan-out, no batching, no retries.
pub struct TelegramOutbound {
    client: TelegramClient,
}

impl TelegramOutbound {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }

    pub async fn send(&self, bot_token: &str, message: &OutboundMessage) -> Result<()> {
        let method = api_method(message);
        debug!(method, chat_id = message.chat_id(), "dispatching outbound message");
        self.client.post(bot_token, method, message).await
    }
}

fn api_method(message: &OutboundMessage) -> &'static str {
    match message {
        OutboundMessage::Photo { .. } => "sendPhoto",
        OutboundMessage::Video { .. } => "sendVideo",
        OutboundMessage::Document { .. } => "sendDocument",
        OutboundMessage::Text { .. } => "sendMessage",
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, deskrelay_common::BridgeConfig};

    #[test]
    fn each_variant_selects_its_send_operation() {
        assert_eq!(api_method(&OutboundMessage::text("1", "hi")), "sendMessage");
        assert_eq!(
            api_method(&OutboundMessage::photo("1", "https://x/a.png", "")),
            "sendPhoto"
        );
        assert_eq!(
            api_method(&OutboundMessage::video("1", "https://x/a.mp4", "")),
            "sendVideo"
        );
        assert_eq!(
            api_method(&OutboundMessage::document("1", "https://x/a.pdf", "")),
            "sendDocument"
        );
    }

    #[tokio::test]
    async fn send_posts_the_serialized_message_once() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:ABC/sendVideo")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "chat_id": "238070007",
                "parse_mode": "markdown",
                "video": "https://x/video.mp4",
                "caption": "Video Caption"
            })))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .expect(1)
            .create_async()
            .await;

        let config = BridgeConfig::new("https://bridge.example.com", "https://desk.example.com")
            .with_telegram_api_url(format!("{}/bot", server.url()));
        let outbound = TelegramOutbound::new(TelegramClient::new(&config));
        let message = OutboundMessage::video("238070007", "https://x/video.mp4", "Video Caption");
        outbound.send("123:ABC", &message).await.unwrap();
        mock.assert_async().await;
    }
}

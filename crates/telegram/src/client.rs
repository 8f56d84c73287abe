//! Raw Bot API client.
//!
//! Every call is `POST <api_url><bot_token>/<method>` with a JSON body; a
//! non-2xx response surfaces as [`Error::Api`] with the method name, status
//! and response body. Bot tokens are part of the URL, so URLs are never
//! logged.

use {serde::Deserialize, serde::Serialize, tracing::debug};

use deskrelay_common::BridgeConfig;

use crate::error::{Error, Result};

#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    api_url: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[allow(dead_code)]
    ok: bool,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct FileInfo {
    file_path: Option<String>,
}

impl TelegramClient {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.telegram_api_url.clone(),
            base_url: config.base_url.clone(),
        }
    }

    pub(crate) async fn post(
        &self,
        bot_token: &str,
        method: &'static str,
        body: &impl Serialize,
    ) -> Result<()> {
        let url = format!("{}{}/{}", self.api_url, bot_token, method);
        debug!(method, "calling bot api");
        let resp = self.http.post(url).json(body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                method,
                status,
                body,
            });
        }
        Ok(())
    }

    /// Resolve a file identifier to the downloadable path below the file
    /// base URL.
    pub async fn get_file(&self, bot_token: &str, file_id: &str) -> Result<String> {
        let url = format!("{}{}/getFile", self.api_url, bot_token);
        debug!(method = "getFile", "calling bot api");
        let resp = self
            .http
            .get(url)
            .query(&[("file_id", file_id)])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                method: "getFile",
                status,
                body,
            });
        }
        let envelope: ApiEnvelope<FileInfo> = resp.json().await?;
        envelope
            .result
            .and_then(|file| file.file_path)
            .ok_or(Error::MissingFilePath)
    }

    /// Register this bridge as the bot's webhook target.
    pub async fn set_webhook(&self, bot_token: &str, project_id: &str) -> Result<()> {
        let callback = format!(
            "{}/telegram?project_id={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(project_id)
        );
        self.post(bot_token, "setWebhook", &serde_json::json!({ "url": callback }))
            .await
    }

    /// Remove the inline keyboard from an already-sent message so a button
    /// cannot be pressed twice.
    pub async fn clear_reply_markup(
        &self,
        bot_token: &str,
        chat_id: i64,
        message_id: i64,
    ) -> Result<()> {
        self.post(
            bot_token,
            "editMessageReplyMarkup",
            &serde_json::json!({ "chat_id": chat_id, "message_id": message_id }),
        )
        .await
    }
}

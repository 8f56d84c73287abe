//! Delivery client for the ticket side.
//!
//! Posting a message is a three-step chain: sign in as the external chat
//! user, find the user's open support request (or mint a fresh request id),
//! then post the message into it. Each step blocks only the event being
//! handled; nothing is retried.

use {serde::Deserialize, tracing::debug};

use {deskrelay_common::BridgeConfig, deskrelay_settings::ProjectSettings};

use crate::{
    auth::{CustomClaims, sign_custom_token},
    error::{Error, Result},
    types::{CHANNEL_NAME, TicketMessage},
};

/// Who is speaking on the chat side, used for sign-in claims and request
/// id minting.
#[derive(Debug, Clone)]
pub struct SenderContext {
    pub chat_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone)]
pub struct HelpdeskClient {
    http: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct SigninResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct RequestList {
    #[serde(default)]
    requests: Vec<RequestRef>,
}

#[derive(Debug, Deserialize)]
struct RequestRef {
    request_id: String,
}

impl HelpdeskClient {
    pub fn new(config: &BridgeConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Exchange a secret-signed claims document for a session token.
    pub async fn signin(
        &self,
        settings: &ProjectSettings,
        sender: &SenderContext,
    ) -> Result<String> {
        let audience = format!("{}/subscriptions/{}", self.api_url, settings.subscription_id);
        let claims = CustomClaims::telegram_user(
            &sender.chat_id,
            &sender.first_name,
            &sender.last_name,
            audience,
        );
        let custom_token = sign_custom_token(&claims, &settings.secret)?;

        let resp = self
            .http
            .post(format!("{}/auth/signinWithCustomToken", self.api_url))
            .header("Authorization", format!("JWT {custom_token}"))
            .json(&serde_json::json!({}))
            .send()
            .await?;
        let resp = check("signin", resp).await?;
        let body: SigninResponse = resp.json().await?;
        Ok(body.token)
    }

    /// The user's currently open request on this channel, if any.
    pub async fn active_request(
        &self,
        auth_token: &str,
        project_id: &str,
    ) -> Result<Option<String>> {
        let resp = self
            .http
            .get(format!("{}/{}/requests/me", self.api_url, project_id))
            .query(&[("channel", CHANNEL_NAME)])
            .header("Authorization", auth_token)
            .send()
            .await?;
        let resp = check("request lookup", resp).await?;
        let list: RequestList = resp.json().await?;
        Ok(list.requests.into_iter().next().map(|r| r.request_id))
    }

    pub async fn post_message(
        &self,
        auth_token: &str,
        project_id: &str,
        request_id: &str,
        message: &TicketMessage,
    ) -> Result<()> {
        let resp = self
            .http
            .post(format!(
                "{}/{}/requests/{}/messages",
                self.api_url, project_id, request_id
            ))
            .header("Authorization", auth_token)
            .json(message)
            .send()
            .await?;
        check("message post", resp).await?;
        Ok(())
    }

    /// Deliver a translated message into the right support request.
    pub async fn send(
        &self,
        settings: &ProjectSettings,
        message: &TicketMessage,
        sender: &SenderContext,
    ) -> Result<()> {
        let auth = self.signin(settings, sender).await?;
        let request_id = match self.active_request(&auth, &settings.project_id).await? {
            Some(id) => {
                debug!(request_id = %id, "reusing open request");
                id
            },
            None => {
                let id = new_request_id(&settings.project_id, &sender.chat_id);
                debug!(request_id = %id, "starting new request");
                id
            },
        };
        self.post_message(&auth, &settings.project_id, &request_id, message)
            .await
    }
}

async fn check(operation: &'static str, resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api {
        operation,
        status,
        body,
    })
}

fn new_request_id(project_id: &str, chat_id: &str) -> String {
    let nonce = uuid::Uuid::new_v4().to_string();
    format!(
        "support-group-{project_id}-{}-telegram-{chat_id}",
        &nonce[..8]
    )
}

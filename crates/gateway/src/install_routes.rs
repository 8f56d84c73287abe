//! Installation lifecycle: store a project's settings record and register
//! the bot webhook, or tear the record down on disconnect.

use std::sync::Arc;

use {
    axum::{extract::State, http::StatusCode, response::Json},
    serde::Deserialize,
    tracing::{error, info, warn},
};

use deskrelay_settings::{ProjectSettings, settings_key};

use crate::{
    server::{Status, status},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct InstallRequest {
    pub project_id: String,
    pub token: String,
    pub subscription_id: String,
    pub secret: String,
    pub bot_name: String,
    pub bot_token: String,
    #[serde(default)]
    pub show_info_message: bool,
}

pub async fn install(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InstallRequest>,
) -> (StatusCode, Json<Status>) {
    let settings = ProjectSettings {
        project_id: request.project_id,
        token: request.token,
        subscription_id: request.subscription_id,
        secret: request.secret,
        bot_name: request.bot_name,
        bot_token: request.bot_token,
        show_info_message: request.show_info_message,
    };

    let key = settings_key(&settings.project_id);
    if let Err(err) = state.store.set(&key, &settings).await {
        error!(project_id = %settings.project_id, %err, "failed to store settings");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            status("failed to store settings"),
        );
    }
    info!(project_id = %settings.project_id, "settings stored");

    // The record stays even when webhook registration fails; reconfiguring
    // retries the registration.
    if let Err(err) = state
        .telegram
        .set_webhook(&settings.bot_token, &settings.project_id)
        .await
    {
        warn!(project_id = %settings.project_id, %err, "webhook registration failed");
        return (
            StatusCode::OK,
            status("installed, webhook registration failed"),
        );
    }

    (StatusCode::OK, status("installed"))
}

#[derive(Debug, Deserialize)]
pub struct DisconnectRequest {
    pub project_id: String,
}

pub async fn disconnect(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DisconnectRequest>,
) -> (StatusCode, Json<Status>) {
    let key = settings_key(&request.project_id);
    match state.store.remove(&key).await {
        Ok(()) => {
            info!(project_id = %request.project_id, "settings removed");
            (StatusCode::OK, status("disconnected"))
        },
        Err(err) if err.is_not_found() => (
            StatusCode::OK,
            status(format!(
                "{} not installed for this project",
                state.config.display_name()
            )),
        ),
        Err(err) => {
            error!(project_id = %request.project_id, %err, "failed to remove settings");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                status("failed to remove settings"),
            )
        },
    }
}

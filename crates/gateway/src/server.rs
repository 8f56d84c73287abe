//! Router assembly and server startup.

use std::sync::Arc;

use {
    axum::{
        Router,
        response::Json,
        routing::{get, post},
    },
    serde::{Deserialize, Serialize},
    tracing::info,
};

use crate::{helpdesk_routes, install_routes, state::AppState, telegram_routes};

/// JSON status body returned to every webhook caller. Both platforms retry
/// aggressively on malformed responses, so even rejections get one of these.
#[derive(Debug, Serialize)]
pub struct Status {
    pub message: String,
}

/// Query string both inbound endpoints carry the project identifier in.
#[derive(Debug, Deserialize)]
pub struct ProjectQuery {
    pub project_id: String,
}

pub(crate) fn status(message: impl Into<String>) -> Json<Status> {
    Json(Status {
        message: message.into(),
    })
}

async fn health() -> Json<Status> {
    status("ok")
}

/// Build the bridge router (shared between production startup and tests).
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/helpdesk", post(helpdesk_routes::inbound))
        .route("/telegram", post(telegram_routes::inbound))
        .route("/install", post(install_routes::install))
        .route("/disconnect", post(install_routes::disconnect))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind((bind, port)).await?;
    info!(bind, port, "deskrelay listening");
    axum::serve(listener, app).await?;
    Ok(())
}

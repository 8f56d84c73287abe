//! Installation lifecycle tests: install stores the record and registers
//! the webhook, disconnect removes it.

#![allow(clippy::unwrap_used)]

use std::{net::SocketAddr, sync::Arc};

use serde_json::json;

use {
    deskrelay_common::BridgeConfig,
    deskrelay_gateway::{AppState, build_app},
    deskrelay_settings::{MemorySettingsStore, SettingsStore, settings_key},
};

async fn spawn_app(telegram_api: &str) -> (SocketAddr, Arc<MemorySettingsStore>) {
    let config = BridgeConfig::new("https://bridge.example.com", "https://desk.example.com")
        .with_telegram_api_url(format!("{telegram_api}/bot"));
    let store = Arc::new(MemorySettingsStore::new());
    let state = Arc::new(AppState::new(config, store.clone() as Arc<dyn SettingsStore>));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_app(state)).await.unwrap();
    });
    (addr, store)
}

fn install_body() -> serde_json::Value {
    json!({
        "project_id": "p1",
        "token": "tok",
        "subscription_id": "sub1",
        "secret": "sec",
        "bot_name": "helpbot",
        "bot_token": "123:ABC"
    })
}

#[tokio::test]
async fn install_stores_the_record_and_registers_the_webhook() {
    let mut server = mockito::Server::new_async().await;
    let webhook = server
        .mock("POST", "/bot123:ABC/setWebhook")
        .match_body(mockito::Matcher::Json(json!({
            "url": "https://bridge.example.com/telegram?project_id=p1"
        })))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .expect(1)
        .create_async()
        .await;

    let (addr, store) = spawn_app(&server.url()).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/install"))
        .json(&install_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "installed");
    webhook.assert_async().await;

    let settings = store.get(&settings_key("p1")).await.unwrap().unwrap();
    assert_eq!(settings.bot_token, "123:ABC");
    assert!(!settings.show_info_message);
}

#[tokio::test]
async fn install_keeps_the_record_when_webhook_registration_fails() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:ABC/setWebhook")
        .with_status(500)
        .with_body(r#"{"ok":false}"#)
        .create_async()
        .await;

    let (addr, store) = spawn_app(&server.url()).await;
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/install"))
        .json(&install_body())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "installed, webhook registration failed");
    assert!(store.get(&settings_key("p1")).await.unwrap().is_some());
}

#[tokio::test]
async fn disconnect_removes_the_record() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/bot123:ABC/setWebhook")
        .with_status(200)
        .with_body(r#"{"ok":true,"result":true}"#)
        .create_async()
        .await;

    let (addr, store) = spawn_app(&server.url()).await;
    let client = reqwest::Client::new();
    client
        .post(format!("http://{addr}/install"))
        .json(&install_body())
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("http://{addr}/disconnect"))
        .json(&json!({ "project_id": "p1" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "disconnected");
    assert!(store.get(&settings_key("p1")).await.unwrap().is_none());
}

#[tokio::test]
async fn disconnecting_an_unknown_project_is_reported() {
    let server = mockito::Server::new_async().await;
    let (addr, _store) = spawn_app(&server.url()).await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/disconnect"))
        .json(&json!({ "project_id": "ghost" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(
        body["message"].as_str().unwrap().contains("not installed"),
        "unexpected body: {body}"
    );
}

#[tokio::test]
async fn health_answers_ok() {
    let server = mockito::Server::new_async().await;
    let (addr, _store) = spawn_app(&server.url()).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "ok");
}

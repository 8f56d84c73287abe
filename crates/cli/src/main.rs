//! deskrelay entrypoint: parse flags, wire the shared state, serve.

use std::sync::Arc;

use {
    clap::Parser,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    deskrelay_common::BridgeConfig,
    deskrelay_gateway::AppState,
    deskrelay_settings::{SettingsStore, SqliteSettingsStore},
};

#[derive(Parser)]
#[command(
    name = "deskrelay",
    about = "deskrelay — Telegram ↔ helpdesk ticket-channel bridge"
)]
struct Cli {
    /// Address to bind to.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Public base URL of this bridge, used as the webhook callback target.
    #[arg(long, env = "BASE_URL")]
    base_url: String,

    /// Helpdesk platform API base URL.
    #[arg(long, env = "API_URL")]
    api_url: String,

    /// Bot API base URL override.
    #[arg(long, env = "TELEGRAM_API_URL")]
    telegram_api_url: Option<String>,

    /// File download base URL override.
    #[arg(long, env = "TELEGRAM_FILE_URL")]
    telegram_file_url: Option<String>,

    /// Display name shown in user-facing status messages.
    #[arg(long, env = "BRAND_NAME")]
    brand_name: Option<String>,

    /// SQLite database holding the per-project settings records.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://deskrelay.db?mode=rwc"
    )]
    database_url: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

fn build_config(cli: &Cli) -> BridgeConfig {
    let mut config = BridgeConfig::new(cli.base_url.clone(), cli.api_url.clone());
    if let Some(url) = &cli.telegram_api_url {
        config = config.with_telegram_api_url(url.clone());
    }
    if let Some(url) = &cli.telegram_file_url {
        config = config.with_telegram_file_url(url.clone());
    }
    if let Some(name) = &cli.brand_name {
        config = config.with_brand_name(name.clone());
    }
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "deskrelay starting");

    let config = build_config(&cli);
    let store = SqliteSettingsStore::new(&cli.database_url).await?;
    let state = Arc::new(AppState::new(
        config,
        Arc::new(store) as Arc<dyn SettingsStore>,
    ));

    deskrelay_gateway::serve(&cli.bind, cli.port, state).await
}

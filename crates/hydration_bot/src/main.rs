use std::sync::Arc;

use anyhow::Context;
use hydration_bot::store::JsonFileStore;
use hydration_bot::{BotConfig, HydrationBot, utils};
use hydration_client::config::ProviderConfig;
use hydration_client::http_client::{OpenFoodFactsClient, OpenWeatherClient};
use hydration_client::middleware::LoggedProvider;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Configure logging from env var `HYDRATION_BOT_LOG_LEVEL` (or fallback to `RUST_LOG`, default `info`).
    let log_env = std::env::var("HYDRATION_BOT_LOG_LEVEL")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    // Keep reqwest/hyper internals quiet unless asked for explicitly
    let combined_filter = format!("{},hyper=warn,reqwest=warn", log_env);
    let env_filter = tracing_subscriber::EnvFilter::try_new(combined_filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));
    // stdout carries the conversation, so logs go to stderr
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(env_filter)
        .init();
    tracing::info!("hydration_bot: log filter: {}", log_env);

    let bot_config = BotConfig::from_env();
    let goals = bot_config.goal_config()?;
    let providers = ProviderConfig::from_env().context("weather provider is not configured")?;

    let temperature = LoggedProvider::new(OpenWeatherClient::from_config(&providers), "openweather");
    let food = LoggedProvider::new(OpenFoodFactsClient::from_config(&providers), "openfoodfacts");
    let store = Arc::new(JsonFileStore::new(bot_config.data_path.clone()));
    tracing::info!(path = %store.path().display(), user = %bot_config.user_id, "hydration_bot: store ready");

    let bot = HydrationBot::new(
        goals,
        Arc::new(temperature),
        Arc::new(food),
        store.clone(),
        store,
    );

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    stdout.write_all(bot.handle_message(&bot_config.user_id, "/start", "").await.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let today = utils::today_local();
        let reply = bot.handle_message(&bot_config.user_id, &line, &today).await;
        stdout.write_all(reply.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("hydration_bot: input closed, exiting");
    Ok(())
}

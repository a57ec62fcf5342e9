use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley::cli::Args;
use parley::config::Config;
use parley::dialog::{COMMANDS, Router, SessionStore};
use parley::generation::GenerationClient;
use parley::server;
use parley::telegram::Bot;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("failed to load env file {}", path.display()))?;
        }
        None => {
            // A ./.env file is optional.
            dotenvy::dotenv().ok();
        }
    }

    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.polling {
        config.webhook_url = None;
    }

    let bot = Arc::new(Bot::new(config.bot_token.clone()));
    let generator = Arc::new(
        GenerationClient::new(config.generation_endpoint.clone(), config.api_key.clone())
            .with_chat_model(config.generation_model.clone())
            .with_image_model(config.image_model.clone()),
    );
    let sessions = Arc::new(SessionStore::new());
    let router = Arc::new(
        Router::new(sessions, generator, Arc::clone(&bot))
            .with_unknown_command_policy(config.unknown_command_policy),
    );

    bot.set_my_commands(COMMANDS)
        .await
        .context("failed to register bot commands")?;

    match config.webhook_url {
        Some(webhook_url) => server::run_webhook(router, bot, &webhook_url, config.port).await,
        None => server::run_polling(router, bot).await,
    }
}

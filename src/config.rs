//! Environment-based configuration.
//!
//! The bot is configured entirely through environment variables, optionally
//! loaded from a dotenv file at startup. Missing required variables fail
//! startup with an error naming the variable.

use std::env;

use anyhow::{Context, Result};

use crate::dialog::UnknownCommandPolicy;
use crate::generation::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};

/// Default webhook listen port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default generation service endpoint.
pub const DEFAULT_GENERATION_ENDPOINT: &str = "https://api.openai.com";

/// Resolved process configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token (`BOT_TOKEN`).
    pub bot_token: String,
    /// Generation service API key (`OPENAI_API_KEY`).
    pub api_key: String,
    /// Generation service base URL (`GENERATION_ENDPOINT`).
    pub generation_endpoint: String,
    /// Chat completion model (`GENERATION_MODEL`).
    pub generation_model: String,
    /// Image generation model (`IMAGE_MODEL`).
    pub image_model: String,
    /// Public webhook URL (`WEBHOOK_URL`); absent means long polling.
    pub webhook_url: Option<String>,
    /// Webhook listen port (`PORT`).
    pub port: u16,
    /// Handling of unrecognized commands (`UNKNOWN_COMMAND_POLICY`).
    pub unknown_command_policy: UnknownCommandPolicy,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::resolve(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset, matching how dotenv files are
    /// commonly written.
    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).with_context(|| format!("missing required environment variable {key}"))
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid PORT value '{raw}'"))?,
            None => DEFAULT_PORT,
        };

        let unknown_command_policy = match get("UNKNOWN_COMMAND_POLICY") {
            Some(raw) => raw
                .parse::<UnknownCommandPolicy>()
                .context("invalid UNKNOWN_COMMAND_POLICY value")?,
            None => UnknownCommandPolicy::default(),
        };

        Ok(Self {
            bot_token: require("BOT_TOKEN")?,
            api_key: require("OPENAI_API_KEY")?,
            generation_endpoint: get("GENERATION_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GENERATION_ENDPOINT.to_string()),
            generation_model: get("GENERATION_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            image_model: get("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            webhook_url: get("WEBHOOK_URL"),
            port,
            unknown_command_policy,
        })
    }
}

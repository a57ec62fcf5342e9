use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::types::{ApiResponse, BotCommand, ChatId, Message, Update};
use crate::dialog::Transport;

/// Default Bot API server.
const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Client for the Telegram Bot API.
///
/// Wraps the `https://api.telegram.org/bot{token}/{method}` HTTP surface.
/// The base URL can be overridden for local Bot API servers or tests.
pub struct Bot {
    http: Client,
    token: String,
    api_base: String,
}

impl Bot {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the Bot API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<R> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            .with_context(|| format!("telegram {method} request failed"))?;

        let envelope: ApiResponse<R> = response
            .json()
            .await
            .with_context(|| format!("telegram {method} returned an unreadable body"))?;

        if !envelope.ok {
            bail!(
                "telegram {method} failed (code={}): {}",
                envelope.error_code.unwrap_or(0),
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string())
            );
        }

        envelope
            .result
            .with_context(|| format!("telegram {method} replied ok without a result"))
    }

    pub async fn send_message(&self, chat: ChatId, text: &str) -> Result<()> {
        let _: Message = self
            .call("sendMessage", &json!({"chat_id": chat, "text": text}))
            .await?;
        Ok(())
    }

    /// Send a photo by URL; Telegram fetches the image itself.
    pub async fn send_photo(&self, chat: ChatId, url: &str) -> Result<()> {
        let _: Message = self
            .call("sendPhoto", &json!({"chat_id": chat, "photo": url}))
            .await?;
        Ok(())
    }

    /// Long-poll for updates past `offset`, waiting up to `timeout_secs`.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message"],
            }),
        )
        .await
    }

    pub async fn set_webhook(&self, url: &str) -> Result<()> {
        let _: bool = self.call("setWebhook", &json!({"url": url})).await?;
        Ok(())
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<()> {
        let _: bool = self
            .call(
                "deleteWebhook",
                &json!({"drop_pending_updates": drop_pending_updates}),
            )
            .await?;
        Ok(())
    }

    /// Register the command surface shown in the platform's command menu.
    pub async fn set_my_commands(&self, commands: &[(&str, &str)]) -> Result<()> {
        let commands: Vec<BotCommand<'_>> = commands
            .iter()
            .copied()
            .map(|(command, description)| BotCommand {
                command,
                description,
            })
            .collect();

        let _: bool = self
            .call("setMyCommands", &json!({"commands": commands}))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Transport for Bot {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        self.send_message(chat, text).await
    }

    async fn send_photo(&self, chat: ChatId, url: &str) -> Result<()> {
        Self::send_photo(self, chat, url).await
    }
}

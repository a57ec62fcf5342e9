//! The two update delivery paths: a webhook HTTP endpoint and a long-polling
//! loop. Both feed the same router; which one runs is decided by
//! configuration. A failure handling one chat's update is logged and never
//! takes the process down.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info, warn};

use crate::dialog;
use crate::generation::GenerationClient;
use crate::telegram::{Bot, Update};

/// The router wired to the production transport and generation backends.
pub type BotRouter = dialog::Router<GenerationClient, Bot>;

/// Seconds a `getUpdates` call blocks waiting for new updates.
const POLL_TIMEOUT_SECS: u64 = 30;

/// Backoff after a failed poll.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Build the webhook application.
pub fn webhook_app(router: Arc<BotRouter>) -> Router {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .with_state(router)
}

/// Webhook entry point.
///
/// Always answers 200; Telegram redelivers the update on any other status.
async fn handle_webhook(
    State(router): State<Arc<BotRouter>>,
    Json(update): Json<Update>,
) -> StatusCode {
    let chat = update.chat_id();
    if let Err(err) = router.handle_update(update).await {
        error!(chat = ?chat, %err, "failed to handle webhook update");
    }
    StatusCode::OK
}

/// Register the webhook and serve updates over HTTP until ctrl-c.
pub async fn run_webhook(
    router: Arc<BotRouter>,
    bot: Arc<Bot>,
    webhook_url: &str,
    port: u16,
) -> Result<()> {
    bot.set_webhook(webhook_url)
        .await
        .context("failed to register webhook")?;

    let app = webhook_app(router);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;

    info!(port, webhook_url, "serving webhook updates");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server failed")?;

    info!("shutting down, deregistering webhook");
    bot.delete_webhook(true).await
}

/// Long-poll `getUpdates` until ctrl-c.
pub async fn run_polling(router: Arc<BotRouter>, bot: Arc<Bot>) -> Result<()> {
    // A registered webhook and getUpdates are mutually exclusive.
    bot.delete_webhook(false)
        .await
        .context("failed to clear webhook before polling")?;

    info!("long polling for updates");

    let mut offset = 0i64;
    loop {
        let updates = tokio::select! {
            result = bot.get_updates(offset, POLL_TIMEOUT_SECS) => result,
            () = shutdown_signal() => break,
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(err) => {
                warn!(%err, "poll failed, backing off");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let chat = update.chat_id();
            if let Err(err) = router.handle_update(update).await {
                error!(chat = ?chat, %err, "failed to handle polled update");
            }
        }
    }

    info!("shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
    }
}

use std::sync::Arc;

use anyhow::Result;
use tracing::error;

use super::session::{Mode, SessionStore};
use super::{TRANSLATE_PROMPT, Transport};
use crate::generation::{Generator, prompt};
use crate::telegram::ChatId;

/// Fallback sent when a translate call fails.
pub const TRANSLATE_FALLBACK: &str = "I'm sorry, I couldn't translate that. Please try again.";
/// Fallback sent when an explain call fails.
pub const EXPLAIN_FALLBACK: &str = "I'm sorry, I couldn't explain that. Please try again.";
/// Fallback sent when an image generation call fails.
pub const IMAGE_FALLBACK: &str = "I'm sorry, I couldn't generate that. Please try again.";

/// The per-chat state machine.
///
/// Each mode defines what to do with the chat's next non-command message
/// and where to transition. Fulfilment consumes the mode before the
/// generation call, so a second message racing an in-flight call finds the
/// chat idle instead of firing the dialog twice.
pub struct DialogEngine<G, T> {
    sessions: Arc<SessionStore>,
    generator: Arc<G>,
    transport: Arc<T>,
}

impl<G: Generator, T: Transport> DialogEngine<G, T> {
    pub fn new(sessions: Arc<SessionStore>, generator: Arc<G>, transport: Arc<T>) -> Self {
        Self {
            sessions,
            generator,
            transport,
        }
    }

    /// Interpret `text` under the chat's current mode.
    pub async fn resume(&self, chat: ChatId, text: &str) -> Result<()> {
        match self.sessions.take(chat) {
            // No dialog active: echo the message back verbatim.
            Mode::Idle => self.transport.send_text(chat, text).await,

            Mode::AwaitingLanguageSelection => {
                self.transport.send_text(chat, TRANSLATE_PROMPT).await?;
                self.sessions.set(
                    chat,
                    Mode::AwaitingTranslateInput {
                        language: text.trim().to_string(),
                    },
                );
                Ok(())
            }

            Mode::AwaitingTranslateInput { language } => {
                let reply = match self
                    .generator
                    .complete(&prompt::translate(text, &language))
                    .await
                {
                    Ok(translation) => translation,
                    Err(err) => {
                        error!(%chat, %err, "translation request failed");
                        TRANSLATE_FALLBACK.to_string()
                    }
                };
                self.transport.send_text(chat, &reply).await
            }

            Mode::AwaitingExplainInput => {
                let reply = match self.generator.complete(&prompt::explain(text)).await {
                    Ok(explanation) => explanation,
                    Err(err) => {
                        error!(%chat, %err, "explain request failed");
                        EXPLAIN_FALLBACK.to_string()
                    }
                };
                self.transport.send_text(chat, &reply).await
            }

            Mode::AwaitingImagePrompt => match self.generator.generate_image(text).await {
                Ok(url) => self.transport.send_photo(chat, &url).await,
                Err(err) => {
                    error!(%chat, %err, "image generation failed");
                    self.transport.send_text(chat, IMAGE_FALLBACK).await
                }
            },
        }
    }
}

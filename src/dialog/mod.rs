//! The per-chat conversation core: session store, command router, and the
//! dialog state machine.

mod engine;
mod router;
mod session;

use anyhow::Result;
use async_trait::async_trait;

pub use engine::{DialogEngine, EXPLAIN_FALLBACK, IMAGE_FALLBACK, TRANSLATE_FALLBACK};
pub use router::{COMMANDS, Command, Router, UnknownCommandPolicy, parse_command};
pub use session::{Mode, SessionStore};

use crate::telegram::ChatId;

/// Prompt opening the explain dialog.
pub const EXPLAIN_PROMPT: &str = "What do you want me to explain?";
/// Prompt asking for the text to translate.
pub const TRANSLATE_PROMPT: &str = "What do you want me to translate?";
/// Prompt asking for the translation target language.
pub const LANGUAGE_PROMPT: &str = "Select the language you want me to translate to:";
/// Prompt opening the image dialog.
pub const IMAGE_PROMPT: &str = "What do you want me to generate?";
/// Reply sent for unrecognized commands under the reject policy.
pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Try /explain, /translate or /image.";

/// Outbound side of the messaging transport.
///
/// Sends are fire-and-forget from the dialog core's perspective; delivery
/// failures surface as errors to the caller, never to the chat.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;

    /// Send an image by URL.
    async fn send_photo(&self, chat: ChatId, url: &str) -> Result<()>;
}

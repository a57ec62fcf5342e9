use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use super::engine::DialogEngine;
use super::session::{Mode, SessionStore};
use super::{
    EXPLAIN_PROMPT, IMAGE_PROMPT, LANGUAGE_PROMPT, TRANSLATE_PROMPT, Transport,
    UNKNOWN_COMMAND_REPLY,
};
use crate::generation::Generator;
use crate::telegram::{Message, Update};

/// The command surface registered with the platform: (command, description).
pub const COMMANDS: &[(&str, &str)] = &[
    ("explain", "Explain the following text"),
    ("translate", "Translate from any language to any other language"),
    ("image", "Generate an image from text"),
];

/// A command token recognized at the start of a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Explain,
    /// `/translate`, with the inline target language if one followed the token.
    Translate { language: Option<String> },
    Image,
    /// A `bot_command` entity whose token is none of ours.
    Other(String),
}

/// What to do with a command token the router does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCommandPolicy {
    /// Treat the message as ordinary dialog input for the chat's mode.
    #[default]
    Ignore,
    /// Reply with a short hint and leave the session untouched.
    Reject,
}

impl FromStr for UnknownCommandPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => anyhow::bail!(
                "invalid unknown-command policy '{other}' (expected 'ignore' or 'reject')"
            ),
        }
    }
}

/// Extract a leading command from a message.
///
/// A command is recognized only when the message's first entity is a
/// `bot_command` spanning the start of the text. Entity offsets are UTF-16
/// code units, but a leading command token is ASCII, so byte indexing over
/// its span is sound.
pub fn parse_command(message: &Message) -> Option<Command> {
    let text = message.text.as_deref()?;
    let entity = message.entities.first()?;

    if !entity.is_bot_command() || entity.offset != 0 {
        return None;
    }

    let token = text.get(..entity.length)?;
    // Commands addressed to a specific bot arrive as `/translate@botname`.
    let token = token.split('@').next().unwrap_or(token);
    let argument = text.get(entity.length..).unwrap_or("").trim();

    match token {
        "/explain" => Some(Command::Explain),
        "/translate" => Some(Command::Translate {
            language: (!argument.is_empty()).then(|| argument.to_string()),
        }),
        "/image" => Some(Command::Image),
        other => Some(Command::Other(other.to_string())),
    }
}

/// Dispatches inbound updates: command messages open a dialog, everything
/// else is resumed by the [`DialogEngine`] under the chat's current mode.
///
/// The session store, generation client, and outbound transport are injected
/// at construction; the router itself never calls the generation service.
pub struct Router<G, T> {
    sessions: Arc<SessionStore>,
    transport: Arc<T>,
    engine: DialogEngine<G, T>,
    unknown_commands: UnknownCommandPolicy,
}

impl<G: Generator, T: Transport> Router<G, T> {
    pub fn new(sessions: Arc<SessionStore>, generator: Arc<G>, transport: Arc<T>) -> Self {
        let engine = DialogEngine::new(Arc::clone(&sessions), generator, Arc::clone(&transport));
        Self {
            sessions,
            transport,
            engine,
            unknown_commands: UnknownCommandPolicy::default(),
        }
    }

    pub fn with_unknown_command_policy(mut self, policy: UnknownCommandPolicy) -> Self {
        self.unknown_commands = policy;
        self
    }

    /// Handle one inbound update for its chat.
    ///
    /// Updates without a text message are skipped. Each branch that opens a
    /// dialog sends exactly one prompt and records the mode the next message
    /// will be interpreted under.
    pub async fn handle_update(&self, update: Update) -> Result<()> {
        let Some(message) = update.message else {
            debug!(update_id = update.update_id, "skipping update without message");
            return Ok(());
        };
        let chat = message.chat.id;
        let Some(text) = message.text.clone() else {
            debug!(update_id = update.update_id, %chat, "skipping message without text");
            return Ok(());
        };

        debug!(update_id = update.update_id, %chat, "handling update");

        match parse_command(&message) {
            Some(Command::Explain) => {
                self.transport.send_text(chat, EXPLAIN_PROMPT).await?;
                self.sessions.set(chat, Mode::AwaitingExplainInput);
            }
            Some(Command::Translate {
                language: Some(language),
            }) => {
                self.transport.send_text(chat, TRANSLATE_PROMPT).await?;
                self.sessions
                    .set(chat, Mode::AwaitingTranslateInput { language });
            }
            Some(Command::Translate { language: None }) => {
                self.transport.send_text(chat, LANGUAGE_PROMPT).await?;
                self.sessions.set(chat, Mode::AwaitingLanguageSelection);
            }
            Some(Command::Image) => {
                self.transport.send_text(chat, IMAGE_PROMPT).await?;
                self.sessions.set(chat, Mode::AwaitingImagePrompt);
            }
            Some(Command::Other(token)) => match self.unknown_commands {
                UnknownCommandPolicy::Ignore => {
                    debug!(%chat, token, "unrecognized command, falling through to dialog");
                    self.engine.resume(chat, &text).await?;
                }
                UnknownCommandPolicy::Reject => {
                    debug!(%chat, token, "rejecting unrecognized command");
                    self.transport.send_text(chat, UNKNOWN_COMMAND_REPLY).await?;
                }
            },
            None => self.engine.resume(chat, &text).await?,
        }

        Ok(())
    }
}

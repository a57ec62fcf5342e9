use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::telegram::ChatId;

/// What the dialog engine expects a chat's next message to be.
///
/// A chat with no stored mode is [`Mode::Idle`]; the parameter gathered by
/// the language-selection turn travels inside the variant that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// No dialog active; plain messages are echoed back.
    #[default]
    Idle,
    /// `/explain` was issued; the next message is the text to explain.
    AwaitingExplainInput,
    /// `/translate` was issued without a language; the next message names it.
    AwaitingLanguageSelection,
    /// The next message is the text to translate into `language`.
    AwaitingTranslateInput { language: String },
    /// `/image` was issued; the next message is the image prompt.
    AwaitingImagePrompt,
}

/// In-memory, per-chat conversation state.
///
/// A single guarded map keyed by [`ChatId`]. Entries exist only while a
/// dialog is active; absence is equivalent to [`Mode::Idle`]. Nothing is
/// persisted and nothing expires.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<ChatId, Mode>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chat's current mode.
    pub fn get(&self, chat: ChatId) -> Mode {
        self.lock().get(&chat).cloned().unwrap_or_default()
    }

    /// Replace the chat's mode. Setting [`Mode::Idle`] removes the entry.
    pub fn set(&self, chat: ChatId, mode: Mode) {
        let mut sessions = self.lock();
        if mode == Mode::Idle {
            sessions.remove(&chat);
        } else {
            sessions.insert(chat, mode);
        }
    }

    /// Atomically read and clear the chat's mode.
    ///
    /// The engine consumes modes through this, so two racing messages for
    /// the same chat cannot both fulfil one dialog: the loser observes
    /// [`Mode::Idle`].
    pub fn take(&self, chat: ChatId) -> Mode {
        self.lock().remove(&chat).unwrap_or_default()
    }

    /// Reset the chat to [`Mode::Idle`].
    pub fn clear(&self, chat: ChatId) {
        self.lock().remove(&chat);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<ChatId, Mode>> {
        // The map is never left mid-update, so a poisoned lock is safe to reuse.
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

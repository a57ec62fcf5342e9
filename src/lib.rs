//! # parley - Telegram assistant bot
//!
//! `parley` is a Telegram bot that runs short command dialogs — `/explain`,
//! `/translate`, and `/image` — and fulfils them against an OpenAI-compatible
//! generation service.
//!
//! The transport delivers stateless, independent updates; the bot's only
//! state is an in-memory record of what each chat is currently waiting for.
//! A command opens a dialog by asking a question; the chat's next message
//! answers it; the answer is forwarded to the generation service and the
//! result sent back. Chats with no open dialog get their messages echoed.
//!
//! ## Quick start
//!
//! ```bash
//! # .env
//! BOT_TOKEN=123456:ABC-DEF...
//! OPENAI_API_KEY=sk-...
//!
//! # long polling (default)
//! parley
//!
//! # webhook delivery
//! WEBHOOK_URL=https://bot.example.com/webhook parley --port 8443
//! ```

/// Command-line argument definitions.
pub mod cli;

/// Environment-based configuration.
pub mod config;

/// Session store, command router, and dialog state machine.
pub mod dialog;

/// Adapter for the text/image generation service.
pub mod generation;

/// Webhook and long-polling entry points.
pub mod server;

/// Telegram Bot API types and client.
pub mod telegram;

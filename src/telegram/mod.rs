mod api;
mod types;

pub use api::Bot;
pub use types::{ApiResponse, BotCommand, Chat, ChatId, Message, MessageEntity, Update};

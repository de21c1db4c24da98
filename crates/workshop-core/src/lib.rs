// Conversation tree core for Workshop chats, without UI dependencies

pub mod conversation;
pub mod error;
pub mod preferences;
pub mod transcript;
pub mod utils;

// Handlers module

pub mod chat;
pub mod health;
pub mod rejection;

pub use chat::chat_handler;
pub use health::{health_handler, ready_handler};
pub use rejection::{handle_rejection, InternalError};

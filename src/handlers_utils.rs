pub mod chat_action;
pub mod error;
pub mod send;

use telers::{methods::SendChatAction, Bot};
use tracing::{event, Level};

/// Shows the "typing" indicator for the next few seconds or until a message is sent.
/// Failing to send it doesn't affect the request.
pub async fn typing(bot: &Bot, chat_id: i64) {
    if let Err(err) = bot.send(SendChatAction::new(chat_id, "typing")).await {
        event!(Level::WARN, %err, "Error while sending typing action");
    }
}

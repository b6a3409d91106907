use crate::{handlers_utils::error, texts};

use telers::{
    event::{telegram::HandlerResult, EventReturn},
    types::Message,
    Bot,
};
use tracing::{event, instrument, Level};

#[instrument(skip_all)]
pub async fn unrecognized(bot: Bot, message: Message) -> HandlerResult {
    event!(Level::DEBUG, "No link in text");

    error::occured_in_message(&bot, message.chat().id(), message.id(), texts::UNRECOGNIZED).await?;

    Ok(EventReturn::Finish)
}

use crate::{
    handlers_utils::send,
    interactors::{Interactor as _, RegisterUser, RegisterUserInput},
    texts,
    utils::format_error_report,
};

use froodi::Inject;
use telers::{
    event::{telegram::HandlerResult, EventReturn},
    methods::SendMessage,
    types::Message,
    Bot,
};
use tracing::{event, instrument, Level};

#[instrument(skip_all)]
pub async fn start(bot: Bot, message: Message, Inject(register_user): Inject<RegisterUser>) -> HandlerResult {
    // Registration failure doesn't prevent the greeting
    if let Some(user_id) = message.from().as_ref().map(|user| user.id) {
        if let Err(err) = register_user.execute(RegisterUserInput::new(user_id)).await {
            event!(Level::ERROR, err = format_error_report(&err), "Register user err");
        }
    }

    bot.send(SendMessage::new(message.chat().id(), texts::GREETING).reply_parameters_option(send::reply_parameters(Some(message.id()))))
        .await?;

    Ok(EventReturn::Finish)
}

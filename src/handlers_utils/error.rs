use telers::{
    errors::SessionErrorKind,
    methods::SendMessage,
    types::{LinkPreviewOptions, Message, ReplyParameters},
    Bot,
};

pub async fn occured_in_message(bot: &Bot, chat_id: i64, reply_to_message_id: i64, text: &str) -> Result<Message, SessionErrorKind> {
    bot.send(
        SendMessage::new(chat_id, text)
            .link_preview_options(LinkPreviewOptions::new().is_disabled(true))
            .reply_parameters(ReplyParameters::new(reply_to_message_id).allow_sending_without_reply(true)),
    )
    .await
}

use backoff::ExponentialBackoff;
use std::{
    sync::atomic::{AtomicU8, Ordering::Relaxed},
    time::Duration,
};
use telers::{
    errors::{SessionErrorKind, TelegramErrorKind},
    methods::{SendMediaGroup, TelegramMethod},
    types::{ChatIdKind, InputMedia, Message, ReplyParameters},
    Bot,
};
use tracing::{event, instrument, Level};

/// Telegram doesn't accept more media in one group
pub const MEDIA_GROUP_MAX_LEN: usize = 10;

const MEDIA_GROUP_MAX_RETRIES: u8 = 3;

pub fn reply_parameters(reply_to_message_id: Option<i64>) -> Option<ReplyParameters> {
    reply_to_message_id.map(|id| ReplyParameters::new(id).allow_sending_without_reply(true))
}

fn to_backoff_error(err: SessionErrorKind, retry_count: &AtomicU8, max_retries: u8) -> backoff::Error<SessionErrorKind> {
    match err {
        SessionErrorKind::Telegram(TelegramErrorKind::RetryAfter { retry_after, .. }) => {
            event!(Level::DEBUG, "Sleeping for {retry_after:?} seconds");

            backoff::Error::retry_after(err, Duration::from_secs_f32(retry_after))
        }
        SessionErrorKind::Telegram(TelegramErrorKind::ServerError { .. }) => {
            if retry_count.fetch_add(1, Relaxed) >= max_retries {
                event!(Level::ERROR, "Max retries exceeded");
                backoff::Error::permanent(err)
            } else {
                backoff::Error::transient(err)
            }
        }
        _ => backoff::Error::permanent(err),
    }
}

/// Sends a request to the Telegram Bot API.
/// Retries after the delay Telegram asks for, and up to `max_retries` times on server errors.
/// Any other error is returned immediately.
#[instrument(skip_all)]
pub async fn with_retries<T, TRef>(
    bot: &Bot,
    method: TRef,
    max_retries: u8,
    request_timeout: Option<f32>,
) -> Result<T::Return, SessionErrorKind>
where
    T: TelegramMethod + Send + Sync,
    T::Method: Send + Sync,
    TRef: AsRef<T> + Clone,
{
    let retry_count = AtomicU8::new(0);

    backoff::future::retry(ExponentialBackoff::default(), || async {
        let res = match request_timeout {
            Some(request_timeout) => bot.send_with_timeout(method.clone(), request_timeout).await,
            None => bot.send(method.clone()).await,
        };
        res.map_err(|err| to_backoff_error(err, &retry_count, max_retries))
    })
    .await
}

/// Sends the media as groups of at most [`MEDIA_GROUP_MAX_LEN`] items, one group after another.
/// A failed group is skipped, the error is returned only if no group was sent.
#[instrument(skip_all, fields(count = input_media_list.len()))]
pub async fn media_groups<'a>(
    bot: &Bot,
    chat_id: impl Into<ChatIdKind>,
    input_media_list: Vec<impl Into<InputMedia<'a>>>,
    reply_to_message_id: Option<i64>,
    request_timeout: Option<f32>,
) -> Result<Box<[Message]>, SessionErrorKind> {
    let chat_id = chat_id.into();
    let mut input_media_list = input_media_list.into_iter().map(Into::into).peekable();

    let mut messages = vec![];
    let mut last_err = None;
    while input_media_list.peek().is_some() {
        let media_group = input_media_list.by_ref().take(MEDIA_GROUP_MAX_LEN).collect::<Vec<InputMedia<'a>>>();
        let media_group_len = media_group.len();

        match with_retries(
            bot,
            SendMediaGroup::new(chat_id.clone(), media_group).reply_parameters_option(reply_parameters(reply_to_message_id)),
            MEDIA_GROUP_MAX_RETRIES,
            request_timeout,
        )
        .await
        {
            Ok(new_messages) => messages.extend(new_messages),
            Err(err) => {
                event!(Level::WARN, %err, "Skip {media_group_len} media count to send");
                last_err = Some(err);
            }
        }
    }

    match last_err {
        Some(err) if messages.is_empty() => Err(err),
        _ => Ok(messages.into_boxed_slice()),
    }
}

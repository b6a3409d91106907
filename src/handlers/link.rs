use crate::{
    entities::{LinkReference, TikTokMedia},
    handlers_utils::{chat_action, error, send},
    interactors::{
        DeliverMediaErrorKind, DeliverPhotos, DeliverPhotosInput, DeliverVideo, DeliverVideoInput, GetTikTokMedia, GetTikTokMediaInput,
        GetYoutubeStream, GetYoutubeStreamErrorKind, GetYoutubeStreamInput, Interactor as _,
    },
    services::youtube::GetVideoDetailsErrorKind,
    texts,
    utils::format_error_report,
};

use froodi::Inject;
use std::borrow::Cow;
use telers::{
    errors::SessionErrorKind,
    event::{telegram::HandlerResult, EventReturn},
    methods::SendMessage,
    types::Message,
    Bot, Extension,
};
use tracing::{event, instrument, Level};

const TIKTOK_VIDEO_FILE_NAME: &str = "tiktok.mp4";

#[instrument(skip_all, fields(platform = link.platform(), %link))]
pub async fn link(
    bot: Bot,
    message: Message,
    Extension(link): Extension<LinkReference>,
    Inject(get_youtube_stream): Inject<GetYoutubeStream>,
    Inject(get_tiktok_media): Inject<GetTikTokMedia>,
    Inject(deliver_video): Inject<DeliverVideo>,
    Inject(deliver_photos): Inject<DeliverPhotos>,
) -> HandlerResult {
    event!(Level::DEBUG, "Got link");

    let chat_id = message.chat().id();
    let message_id = message.id();

    chat_action::typing(&bot, chat_id).await;

    match link {
        LinkReference::YouTubeId(video_id) => {
            youtube(&bot, chat_id, message_id, &video_id, &get_youtube_stream).await?;
        }
        LinkReference::TikTokUrl(url) => {
            let media = match get_tiktok_media.execute(GetTikTokMediaInput::new(&url)).await {
                Ok(media) => media,
                Err(err) => match err {},
            };
            let Some(media) = media else {
                error::occured_in_message(&bot, chat_id, message_id, texts::TIKTOK_NOT_FOUND).await?;
                return Ok(EventReturn::Finish);
            };

            let res = match &media {
                TikTokMedia::Video(video_url) => {
                    deliver_video
                        .execute(DeliverVideoInput::new(chat_id, Some(message_id), video_url, TIKTOK_VIDEO_FILE_NAME))
                        .await
                }
                TikTokMedia::Photos(photo_urls) => {
                    deliver_photos
                        .execute(DeliverPhotosInput::new(chat_id, Some(message_id), photo_urls))
                        .await
                }
            };
            if let Err(err) = &res {
                event!(Level::ERROR, err = format_error_report(err), "Deliver err");
            }
            if let Some(text) = delivery_failure_reply(&res) {
                error::occured_in_message(&bot, chat_id, message_id, text).await?;
            }
        }
    }

    Ok(EventReturn::Finish)
}

/// Text of the reply to a YouTube link: the stream URL itself or what went wrong
fn youtube_reply(res: &Result<Box<str>, GetYoutubeStreamErrorKind>) -> Cow<'_, str> {
    match res {
        Ok(url) => Cow::Borrowed(&**url),
        Err(GetYoutubeStreamErrorKind::Details(GetVideoDetailsErrorKind::Status(status))) => Cow::Owned(texts::youtube_status(*status)),
        Err(GetYoutubeStreamErrorKind::NoStreams) => Cow::Borrowed(texts::NO_STREAMS),
        Err(_) => Cow::Borrowed(texts::YOUTUBE_UNAVAILABLE),
    }
}

fn delivery_failure_reply(res: &Result<(), DeliverMediaErrorKind>) -> Option<&'static str> {
    res.as_ref().err().map(|_| texts::DELIVERY_FAILED)
}

/// Replies with the stream URL, the video isn't downloaded
async fn youtube(
    bot: &Bot,
    chat_id: i64,
    message_id: i64,
    video_id: &str,
    get_youtube_stream: &GetYoutubeStream,
) -> Result<(), SessionErrorKind> {
    let res = get_youtube_stream.execute(GetYoutubeStreamInput::new(video_id)).await;
    match &res {
        Ok(_) | Err(GetYoutubeStreamErrorKind::NoStreams) => {}
        Err(GetYoutubeStreamErrorKind::Details(GetVideoDetailsErrorKind::Status(status))) => {
            event!(Level::WARN, %status, "Upstream status");
        }
        Err(err) => {
            event!(Level::ERROR, err = format_error_report(err), "Get stream err");
        }
    }

    let text = youtube_reply(&res);
    if res.is_ok() {
        bot.send(SendMessage::new(chat_id, &*text).reply_parameters_option(send::reply_parameters(Some(message_id))))
            .await?;
    } else {
        error::occured_in_message(bot, chat_id, message_id, &text).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::media::FetchErrorKind;

    use reqwest::StatusCode;

    #[test]
    fn test_youtube_reply_is_stream_url() {
        assert_eq!(youtube_reply(&Ok("https://cdn/x.mp4".into())), "https://cdn/x.mp4");
    }

    #[test]
    fn test_youtube_reply_errors() {
        assert_eq!(
            youtube_reply(&Err(GetYoutubeStreamErrorKind::Details(GetVideoDetailsErrorKind::Status(
                StatusCode::FORBIDDEN
            )))),
            "⚠️ YouTube API статус 403."
        );
        assert_eq!(youtube_reply(&Err(GetYoutubeStreamErrorKind::NoStreams)), texts::NO_STREAMS);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            youtube_reply(&Err(GetYoutubeStreamErrorKind::Details(GetVideoDetailsErrorKind::Json(json_err)))),
            texts::YOUTUBE_UNAVAILABLE
        );
    }

    #[test]
    fn test_delivery_failure_reply() {
        assert_eq!(delivery_failure_reply(&Ok(())), None);
        assert_eq!(
            delivery_failure_reply(&Err(DeliverMediaErrorKind::Fetch(FetchErrorKind::Status(StatusCode::NOT_FOUND)))),
            Some(texts::DELIVERY_FAILED)
        );
    }
}

use super::Interactor;
use crate::{
    config::{BotConfig, TikTokConfig, TimeoutsConfig},
    handlers_utils::send,
    services::{fetch_bytes, media::FetchErrorKind},
    utils::format_error_report,
};

use reqwest::Client;
use std::{sync::Arc, time::Duration};
use telers::{
    errors::SessionErrorKind,
    methods::{SendMessage, SendVideo},
    types::{InputFile, InputMediaPhoto},
    Bot,
};
use tracing::{info, instrument, warn};

#[derive(thiserror::Error, Debug)]
pub enum DeliverMediaErrorKind {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchErrorKind),
    #[error("Send error: {0}")]
    Send(#[from] SessionErrorKind),
}

/// Fetches a video into memory and sends it as a file with the branding caption
pub struct DeliverVideo {
    bot: Arc<Bot>,
    client: Arc<Client>,
    bot_cfg: Arc<BotConfig>,
    tiktok_cfg: Arc<TikTokConfig>,
    timeouts_cfg: Arc<TimeoutsConfig>,
}

impl DeliverVideo {
    pub const fn new(
        bot: Arc<Bot>,
        client: Arc<Client>,
        bot_cfg: Arc<BotConfig>,
        tiktok_cfg: Arc<TikTokConfig>,
        timeouts_cfg: Arc<TimeoutsConfig>,
    ) -> Self {
        Self {
            bot,
            client,
            bot_cfg,
            tiktok_cfg,
            timeouts_cfg,
        }
    }
}

pub struct DeliverVideoInput<'a> {
    pub chat_id: i64,
    pub reply_to_message_id: Option<i64>,
    pub url: &'a str,
    pub file_name: &'a str,
}

impl<'a> DeliverVideoInput<'a> {
    pub const fn new(chat_id: i64, reply_to_message_id: Option<i64>, url: &'a str, file_name: &'a str) -> Self {
        Self {
            chat_id,
            reply_to_message_id,
            url,
            file_name,
        }
    }
}

impl Interactor<DeliverVideoInput<'_>> for &DeliverVideo {
    type Output = ();
    type Err = DeliverMediaErrorKind;

    #[instrument(skip_all, fields(%url))]
    async fn execute(
        self,
        DeliverVideoInput {
            chat_id,
            reply_to_message_id,
            url,
            file_name,
        }: DeliverVideoInput<'_>,
    ) -> Result<Self::Output, Self::Err> {
        let bytes = fetch_bytes(
            &self.client,
            url,
            &self.tiktok_cfg.user_agent,
            Duration::from_secs(self.timeouts_cfg.video_fetch),
        )
        .await?;

        send::with_retries(
            &self.bot,
            SendVideo::new(chat_id, InputFile::buffered_with_name(bytes, file_name.to_owned()))
                .caption(&*self.bot_cfg.caption)
                .supports_streaming(true)
                .reply_parameters_option(send::reply_parameters(reply_to_message_id)),
            2,
            Some(self.timeouts_cfg.send),
        )
        .await?;
        info!("Video sent");

        Ok(())
    }
}

/// Fetches photos one by one and sends them as media groups followed by the branding caption
pub struct DeliverPhotos {
    bot: Arc<Bot>,
    client: Arc<Client>,
    bot_cfg: Arc<BotConfig>,
    tiktok_cfg: Arc<TikTokConfig>,
    timeouts_cfg: Arc<TimeoutsConfig>,
}

impl DeliverPhotos {
    pub const fn new(
        bot: Arc<Bot>,
        client: Arc<Client>,
        bot_cfg: Arc<BotConfig>,
        tiktok_cfg: Arc<TikTokConfig>,
        timeouts_cfg: Arc<TimeoutsConfig>,
    ) -> Self {
        Self {
            bot,
            client,
            bot_cfg,
            tiktok_cfg,
            timeouts_cfg,
        }
    }
}

pub struct DeliverPhotosInput<'a> {
    pub chat_id: i64,
    pub reply_to_message_id: Option<i64>,
    pub urls: &'a [Box<str>],
}

impl<'a> DeliverPhotosInput<'a> {
    pub const fn new(chat_id: i64, reply_to_message_id: Option<i64>, urls: &'a [Box<str>]) -> Self {
        Self {
            chat_id,
            reply_to_message_id,
            urls,
        }
    }
}

impl Interactor<DeliverPhotosInput<'_>> for &DeliverPhotos {
    type Output = ();
    type Err = DeliverMediaErrorKind;

    #[instrument(skip_all, fields(count = urls.len()))]
    async fn execute(
        self,
        DeliverPhotosInput {
            chat_id,
            reply_to_message_id,
            urls,
        }: DeliverPhotosInput<'_>,
    ) -> Result<Self::Output, Self::Err> {
        let timeout = Duration::from_secs(self.timeouts_cfg.photo_fetch);

        // Photos that failed to fetch are skipped, the set fails only if none of them is left
        let mut photos = Vec::with_capacity(urls.len());
        let mut last_err = None;
        for (index, url) in urls.iter().enumerate() {
            match fetch_bytes(&self.client, url, &self.tiktok_cfg.user_agent, timeout).await {
                Ok(bytes) => photos.push(InputMediaPhoto::new(InputFile::buffered_with_name(bytes, format!("pic{index}.jpg")))),
                Err(err) => {
                    warn!(%url, err = format_error_report(&err), "Skip photo");
                    last_err = Some(err);
                }
            }
        }
        if photos.is_empty() {
            if let Some(err) = last_err {
                return Err(err.into());
            }
            return Ok(());
        }

        let count = photos.len();
        send::media_groups(&self.bot, chat_id, photos, reply_to_message_id, Some(self.timeouts_cfg.send)).await?;
        self.bot
            .send(SendMessage::new(chat_id, &*self.bot_cfg.caption))
            .await?;
        info!(count, "Photos sent");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::stub_server::{serve, Reply};

    use reqwest::StatusCode;

    fn parts() -> (Arc<Bot>, Arc<Client>, Arc<BotConfig>, Arc<TikTokConfig>, Arc<TimeoutsConfig>) {
        (
            Arc::new(Bot::new("123456:test")),
            Arc::new(Client::new()),
            Arc::new(BotConfig::default()),
            Arc::new(TikTokConfig::default()),
            Arc::new(TimeoutsConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_video_fetch_failure_is_not_sent() {
        let (base_url, server) = serve(vec![Reply::bytes(403, b"")]).await;
        let (bot, client, bot_cfg, tiktok_cfg, timeouts_cfg) = parts();
        let deliver = DeliverVideo::new(bot, client, bot_cfg, tiktok_cfg, timeouts_cfg);

        let url = format!("{base_url}/v.mp4");
        let res = deliver.execute(DeliverVideoInput::new(1, Some(2), &url, "tiktok.mp4")).await;

        assert!(matches!(res, Err(DeliverMediaErrorKind::Fetch(FetchErrorKind::Status(StatusCode::FORBIDDEN)))));
        assert_eq!(server.await.unwrap()[0].request_line(), "GET /v.mp4 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_photos_all_failed() {
        let (base_url, server) = serve(vec![Reply::bytes(404, b""), Reply::bytes(500, b"")]).await;
        let (bot, client, bot_cfg, tiktok_cfg, timeouts_cfg) = parts();
        let deliver = DeliverPhotos::new(bot, client, bot_cfg, tiktok_cfg, timeouts_cfg);

        let urls: [Box<str>; 2] = [format!("{base_url}/1.jpg").into(), format!("{base_url}/2.jpg").into()];
        let res = deliver.execute(DeliverPhotosInput::new(1, None, &urls)).await;

        // Error of the last photo tried
        assert!(matches!(
            res,
            Err(DeliverMediaErrorKind::Fetch(FetchErrorKind::Status(StatusCode::INTERNAL_SERVER_ERROR)))
        ));
        let received = server.await.unwrap();
        assert_eq!(received[0].request_line(), "GET /1.jpg HTTP/1.1");
        assert_eq!(received[1].request_line(), "GET /2.jpg HTTP/1.1");
    }

    #[tokio::test]
    async fn test_no_photos_is_noop() {
        let (bot, client, bot_cfg, tiktok_cfg, timeouts_cfg) = parts();
        let deliver = DeliverPhotos::new(bot, client, bot_cfg, tiktok_cfg, timeouts_cfg);

        assert!(deliver.execute(DeliverPhotosInput::new(1, None, &[])).await.is_ok());
    }
}

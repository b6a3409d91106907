use super::Interactor;
use crate::{
    config::{TimeoutsConfig, YoutubeApiConfig},
    entities::StreamCandidate,
    services::{get_video_details, youtube::GetVideoDetailsErrorKind},
    utils::truncate_chars,
};

use reqwest::Client;
use std::{sync::Arc, time::Duration};
use tracing::{debug, instrument, warn};

const RAW_BODY_LOG_LIMIT: usize = 300;

#[derive(thiserror::Error, Debug)]
pub enum GetYoutubeStreamErrorKind {
    #[error(transparent)]
    Details(#[from] GetVideoDetailsErrorKind),
    #[error("No video streams found")]
    NoStreams,
}

/// Resolves a video id to a direct stream URL.
/// The URL is returned as is: provider links are short-lived, so nothing is fetched here.
pub struct GetYoutubeStream {
    client: Arc<Client>,
    youtube_api_cfg: Arc<YoutubeApiConfig>,
    timeouts_cfg: Arc<TimeoutsConfig>,
}

impl GetYoutubeStream {
    pub const fn new(client: Arc<Client>, youtube_api_cfg: Arc<YoutubeApiConfig>, timeouts_cfg: Arc<TimeoutsConfig>) -> Self {
        Self {
            client,
            youtube_api_cfg,
            timeouts_cfg,
        }
    }
}

pub struct GetYoutubeStreamInput<'a> {
    pub video_id: &'a str,
}

impl<'a> GetYoutubeStreamInput<'a> {
    pub const fn new(video_id: &'a str) -> Self {
        Self { video_id }
    }
}

impl Interactor<GetYoutubeStreamInput<'_>> for &GetYoutubeStream {
    type Output = Box<str>;
    type Err = GetYoutubeStreamErrorKind;

    #[instrument(skip_all, fields(%video_id))]
    async fn execute(self, GetYoutubeStreamInput { video_id }: GetYoutubeStreamInput<'_>) -> Result<Self::Output, Self::Err> {
        let (details, raw) = get_video_details(
            &self.client,
            &self.youtube_api_cfg,
            video_id,
            Duration::from_secs(self.timeouts_cfg.youtube_details),
        )
        .await?;

        let streams = details.into_streams();
        // No ranking, the first candidate is used
        let Some(stream) = streams.into_iter().find(StreamCandidate::has_url) else {
            warn!(raw = truncate_chars(&raw, RAW_BODY_LOG_LIMIT), "Empty streams");
            return Err(GetYoutubeStreamErrorKind::NoStreams);
        };

        debug!(url = stream.url(), label = stream.label(), "Stream found");
        stream.url.ok_or(GetYoutubeStreamErrorKind::NoStreams)
    }
}

use crate::{config::YoutubeApiConfig, models::VideoDetails};

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum GetVideoDetailsErrorKind {
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Requests the details with `auto` video/audio variants and normal URL access.
/// Returns the parsed details along with the raw body.
#[instrument(skip_all, fields(%video_id))]
pub async fn get_video_details(
    client: &Client,
    cfg: &YoutubeApiConfig,
    video_id: &str,
    timeout: Duration,
) -> Result<(VideoDetails, String), GetVideoDetailsErrorKind> {
    let mut req = client
        .get(&*cfg.details_url)
        .header("x-rapidapi-host", &*cfg.host)
        .query(&[("videoId", video_id), ("urlAccess", "normal"), ("videos", "auto"), ("audios", "auto")])
        .timeout(timeout);
    if let Some(key) = cfg.key.as_deref() {
        req = req.header("x-rapidapi-key", key);
    }

    let resp = req.send().await?;
    let status = resp.status();
    if status != StatusCode::OK {
        return Err(GetVideoDetailsErrorKind::Status(status));
    }

    let raw = resp.text().await?;
    let details = serde_json::from_str(&raw)?;
    Ok((details, raw))
}

use crate::{entities::TikTokMedia, models::tikwm::TikwmResponseErrorKind};

use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
pub enum ProviderErrorKind {
    #[error("Unexpected status: {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Response(#[from] TikwmResponseErrorKind),
    #[error("No media found on the page")]
    Empty,
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// One stage of the TikTok fallback chain.
/// Any failure, including "nothing found", is reported as an error so the next stage can be tried.
pub trait TikTokMediaProvider {
    fn name(&self) -> &'static str;

    async fn get_media(&self, url: &str) -> Result<TikTokMedia, ProviderErrorKind>;
}

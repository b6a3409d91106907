use super::Interactor;
use crate::{
    entities::TikTokMedia,
    services::{Ssstik, TikTokMediaProvider, Tikwm},
    utils::format_error_report,
};

use std::convert::Infallible;
use tracing::{info, instrument, warn};

/// Tries the primary provider, then the fallback one.
/// Each stage is tried once and their results are never merged.
pub struct GetTikTokMedia<P = Tikwm, F = Ssstik> {
    primary: P,
    fallback: F,
}

impl<P, F> GetTikTokMedia<P, F> {
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

pub struct GetTikTokMediaInput<'a> {
    pub url: &'a str,
}

impl<'a> GetTikTokMediaInput<'a> {
    pub const fn new(url: &'a str) -> Self {
        Self { url }
    }
}

async fn try_stage(provider: &impl TikTokMediaProvider, url: &str) -> Option<TikTokMedia> {
    match provider.get_media(url).await {
        Ok(media) => {
            info!(provider = provider.name(), count = media.count(), "Media found");
            Some(media)
        }
        Err(err) => {
            warn!(provider = provider.name(), err = format_error_report(&err), "Stage failed");
            None
        }
    }
}

impl<P, F> Interactor<GetTikTokMediaInput<'_>> for &GetTikTokMedia<P, F>
where
    P: TikTokMediaProvider,
    F: TikTokMediaProvider,
{
    type Output = Option<TikTokMedia>;
    type Err = Infallible;

    #[instrument(skip_all, fields(%url))]
    async fn execute(self, GetTikTokMediaInput { url }: GetTikTokMediaInput<'_>) -> Result<Self::Output, Self::Err> {
        if let Some(media) = try_stage(&self.primary, url).await {
            return Ok(Some(media));
        }
        Ok(try_stage(&self.fallback, url).await)
    }
}

use super::{ProviderErrorKind, TikTokMediaProvider};
use crate::{
    config::{TikTokConfig, TimeoutsConfig},
    entities::TikTokMedia,
    models::TikwmResponse,
};

use reqwest::{header::USER_AGENT, Client, StatusCode};
use std::{sync::Arc, time::Duration};
use tracing::instrument;

/// Public mirror API, answers with JSON
pub struct Tikwm {
    client: Arc<Client>,
    tiktok_cfg: Arc<TikTokConfig>,
    timeouts_cfg: Arc<TimeoutsConfig>,
}

impl Tikwm {
    pub const fn new(client: Arc<Client>, tiktok_cfg: Arc<TikTokConfig>, timeouts_cfg: Arc<TimeoutsConfig>) -> Self {
        Self {
            client,
            tiktok_cfg,
            timeouts_cfg,
        }
    }
}

impl TikTokMediaProvider for Tikwm {
    fn name(&self) -> &'static str {
        "tikwm"
    }

    #[instrument(skip_all)]
    async fn get_media(&self, url: &str) -> Result<TikTokMedia, ProviderErrorKind> {
        let resp = self
            .client
            .get(&*self.tiktok_cfg.api_url)
            .query(&[("url", url), ("hd", "1")])
            .header(USER_AGENT, &*self.tiktok_cfg.user_agent)
            .timeout(Duration::from_secs(self.timeouts_cfg.tiktok_api))
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ProviderErrorKind::Status(status));
        }

        let raw = resp.text().await?;
        let media = serde_json::from_str::<TikwmResponse>(&raw)?.into_media()?;
        Ok(media)
    }
}

use super::{ProviderErrorKind, TikTokMediaProvider};
use crate::{
    config::{TikTokConfig, TimeoutsConfig},
    entities::TikTokMedia,
};

use reqwest::{header::USER_AGENT, Client, StatusCode};
use scraper::{Html, Selector};
use std::{sync::Arc, time::Duration};
use tracing::{instrument, warn};
use url::Url;

const DOWNLOAD_BUTTON_SELECTOR: &str = "a.pure-button";
const IMAGE_CARDS_SELECTOR: &str = "div.image-cards";
const IMAGE_SELECTOR: &str = "img";

/// Resolves a possibly relative `href` against the service origin
fn resolve_href(origin: Option<&Url>, href: &str) -> Box<str> {
    match origin.map(|origin| origin.join(href)) {
        Some(Ok(url)) => url.as_str().into(),
        _ => href.into(),
    }
}

/// Looks at the first download button, and at the first photo cards block only if the button has no link
pub fn parse_page(page: &str, origin: Option<&Url>) -> Option<TikTokMedia> {
    let document = Html::parse_document(page);

    let button_selector = Selector::parse(DOWNLOAD_BUTTON_SELECTOR).ok()?;
    if let Some(href) = document
        .select(&button_selector)
        .next()
        .and_then(|button| button.value().attr("href"))
        .filter(|href| !href.is_empty())
    {
        return Some(TikTokMedia::Video(resolve_href(origin, href)));
    }

    let cards_selector = Selector::parse(IMAGE_CARDS_SELECTOR).ok()?;
    let image_selector = Selector::parse(IMAGE_SELECTOR).ok()?;
    let cards = document.select(&cards_selector).next()?;
    let photos = cards
        .select(&image_selector)
        .filter_map(|img| img.value().attr("src"))
        .map(Into::into)
        .collect::<Vec<Box<str>>>();
    TikTokMedia::from_parts(None, photos)
}

/// HTML-rendering fallback service
pub struct Ssstik {
    client: Arc<Client>,
    tiktok_cfg: Arc<TikTokConfig>,
    timeouts_cfg: Arc<TimeoutsConfig>,
    origin: Option<Url>,
}

impl Ssstik {
    pub fn new(client: Arc<Client>, tiktok_cfg: Arc<TikTokConfig>, timeouts_cfg: Arc<TimeoutsConfig>) -> Self {
        let origin = match Url::parse(&tiktok_cfg.fallback_origin) {
            Ok(origin) => Some(origin),
            Err(err) => {
                warn!(%err, origin = %tiktok_cfg.fallback_origin, "Invalid fallback origin, relative links are kept as is");
                None
            }
        };

        Self {
            client,
            tiktok_cfg,
            timeouts_cfg,
            origin,
        }
    }
}

impl TikTokMediaProvider for Ssstik {
    fn name(&self) -> &'static str {
        "ssstik"
    }

    #[instrument(skip_all)]
    async fn get_media(&self, url: &str) -> Result<TikTokMedia, ProviderErrorKind> {
        let resp = self
            .client
            .post(&*self.tiktok_cfg.fallback_url)
            .header(USER_AGENT, &*self.tiktok_cfg.user_agent)
            .form(&[("id", url), ("locale", "en"), ("tt", "123")])
            .timeout(Duration::from_secs(self.timeouts_cfg.tiktok_fallback))
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            return Err(ProviderErrorKind::Status(status));
        }

        let page = resp.text().await?;
        parse_page(&page, self.origin.as_ref()).ok_or(ProviderErrorKind::Empty)
    }
}

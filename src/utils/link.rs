use crate::entities::LinkReference;

use regex::Regex;
use std::sync::LazyLock;

static TIKTOK_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:vt\.|www\.)?tiktok\.com/\S+").expect("valid TikTok link pattern"));

/// Gets a YouTube video id from the text.
///
/// The text only has to contain `youtu` somewhere. For the `watch?v=` form the id is everything up to the next `&`,
/// otherwise it's the last path segment without a query.
/// The id itself isn't validated, a malformed one fails later at the provider.
pub fn get_youtube_id(text: &str) -> Option<Box<str>> {
    let text = text.trim();
    if !text.contains("youtu") {
        return None;
    }

    let id = match text.split("watch?v=").nth(1) {
        Some(rest) => rest.split('&').next().unwrap_or_default(),
        None => text
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .split('?')
            .next()
            .unwrap_or_default(),
    };

    if id.is_empty() {
        None
    } else {
        Some(id.into())
    }
}

/// Gets the first TikTok link from the text exactly as written
pub fn get_tiktok_url(text: &str) -> Option<Box<str>> {
    TIKTOK_LINK_RE.find(text.trim()).map(|found| found.as_str().into())
}

/// YouTube is checked first and wins if both could match
pub fn classify(text: &str) -> Option<LinkReference> {
    if let Some(id) = get_youtube_id(text) {
        return Some(LinkReference::YouTubeId(id));
    }
    get_tiktok_url(text).map(LinkReference::TikTokUrl)
}

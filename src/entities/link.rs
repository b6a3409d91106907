use std::fmt;

/// Link recognized in an incoming message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkReference {
    /// Opaque video id, passed to the details endpoint as is
    YouTubeId(Box<str>),
    /// TikTok URL exactly as it was found in the text, tracking params included
    TikTokUrl(Box<str>),
}

impl LinkReference {
    pub const fn platform(&self) -> &'static str {
        match self {
            Self::YouTubeId(_) => "youtube",
            Self::TikTokUrl(_) => "tiktok",
        }
    }
}

impl fmt::Display for LinkReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::YouTubeId(id) => write!(f, "youtube:{id}"),
            Self::TikTokUrl(url) => write!(f, "tiktok:{url}"),
        }
    }
}

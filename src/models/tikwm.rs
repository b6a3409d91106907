use crate::entities::TikTokMedia;

use serde::{de::IgnoredAny, Deserialize};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageEntry {
    Url(Box<str>),
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImagesKind {
    List(Vec<ImageEntry>),
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize)]
pub struct TikwmData {
    pub play: Option<Box<str>>,
    pub playwm: Option<Box<str>>,
    #[serde(alias = "images")]
    pub image: Option<ImagesKind>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TikwmDataKind {
    Object(TikwmData),
    Unknown(IgnoredAny),
}

#[derive(Debug, Deserialize)]
pub struct TikwmResponse {
    pub code: Option<i64>,
    pub msg: Option<Box<str>>,
    pub data: Option<TikwmDataKind>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TikwmResponseErrorKind {
    #[error("API returned code {code:?}: {msg}")]
    Code { code: Option<i64>, msg: Box<str> },
    #[error("API response has no data object")]
    NoData,
    #[error("API response has no media")]
    Empty,
}

impl TikwmResponse {
    pub fn into_media(self) -> Result<TikTokMedia, TikwmResponseErrorKind> {
        if self.code != Some(0) {
            return Err(TikwmResponseErrorKind::Code {
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            });
        }

        let Some(TikwmDataKind::Object(TikwmData { play, playwm, image })) = self.data else {
            return Err(TikwmResponseErrorKind::NoData);
        };

        // Watermarked variant only when the clean one is absent
        let video = play.filter(|url| !url.is_empty()).or(playwm);
        let photos = match image {
            Some(ImagesKind::List(entries)) => entries
                .into_iter()
                .filter_map(|entry| match entry {
                    ImageEntry::Url(url) => Some(url),
                    ImageEntry::Unknown(_) => None,
                })
                .collect(),
            Some(ImagesKind::Unknown(_)) | None => vec![],
        };

        TikTokMedia::from_parts(video, photos).ok_or(TikwmResponseErrorKind::Empty)
    }
}

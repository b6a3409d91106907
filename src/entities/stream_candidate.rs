use serde::Deserialize;
use serde_json::{Map, Value};

/// One media variant offered by the video-metadata provider.
/// Only `url` is typed, everything else (quality, label, codec, size) is kept as provider metadata.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StreamCandidate {
    pub url: Option<Box<str>>,
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl StreamCandidate {
    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    #[inline]
    pub fn has_url(&self) -> bool {
        self.url().is_some()
    }

    pub fn label(&self) -> Option<&str> {
        ["label", "quality", "qualityLabel"]
            .into_iter()
            .find_map(|key| self.metadata.get(key).and_then(Value::as_str))
    }
}

/// Media found for a TikTok post by one of the providers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TikTokMedia {
    Video(Box<str>),
    Photos(Vec<Box<str>>),
}

impl TikTokMedia {
    /// Builds the result from the raw provider fields.
    /// Video takes priority over photos, empty URLs are dropped and nothing found gives `None`.
    pub fn from_parts(video: Option<Box<str>>, photos: impl IntoIterator<Item = Box<str>>) -> Option<Self> {
        if let Some(video) = video.filter(|url| !url.is_empty()) {
            return Some(Self::Video(video));
        }

        let photos = photos.into_iter().filter(|url| !url.is_empty()).collect::<Vec<_>>();
        if photos.is_empty() {
            None
        } else {
            Some(Self::Photos(photos))
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Self::Video(_) => 1,
            Self::Photos(photos) => photos.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_has_priority() {
        assert_eq!(
            TikTokMedia::from_parts(Some("https://v/1.mp4".into()), vec!["https://p/1.jpg".into()]),
            Some(TikTokMedia::Video("https://v/1.mp4".into()))
        );
    }

    #[test]
    fn test_photos_keep_order() {
        assert_eq!(
            TikTokMedia::from_parts(None, vec!["https://p/2.jpg".into(), "".into(), "https://p/1.jpg".into()]),
            Some(TikTokMedia::Photos(vec!["https://p/2.jpg".into(), "https://p/1.jpg".into()]))
        );
    }

    #[test]
    fn test_empty_video_falls_to_photos() {
        assert_eq!(
            TikTokMedia::from_parts(Some("".into()), vec!["https://p/1.jpg".into()]),
            Some(TikTokMedia::Photos(vec!["https://p/1.jpg".into()]))
        );
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(TikTokMedia::from_parts(None, Vec::new()), None);
        assert_eq!(TikTokMedia::from_parts(Some("".into()), vec!["".into()]), None);
    }
}

mod link;
mod stream_candidate;
mod tiktok_media;

pub use link::LinkReference;
pub use stream_candidate::StreamCandidate;
pub use tiktok_media::TikTokMedia;

pub mod media;
pub mod ssstik;
pub mod tiktok;
pub mod tikwm;
pub mod youtube;

pub use media::fetch_bytes;
pub use ssstik::Ssstik;
pub use tiktok::{ProviderErrorKind, TikTokMediaProvider};
pub use tikwm::Tikwm;
pub use youtube::get_video_details;

#[cfg(test)]
pub mod stub_server;

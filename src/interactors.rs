pub mod base;
pub mod deliver_media;
pub mod get_tiktok_media;
pub mod get_youtube_stream;
pub mod register_user;

pub use base::Interactor;
pub use deliver_media::{DeliverMediaErrorKind, DeliverPhotos, DeliverPhotosInput, DeliverVideo, DeliverVideoInput};
pub use get_tiktok_media::{GetTikTokMedia, GetTikTokMediaInput};
pub use get_youtube_stream::{GetYoutubeStream, GetYoutubeStreamErrorKind, GetYoutubeStreamInput};
pub use register_user::{RegisterUser, RegisterUserInput};

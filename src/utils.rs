mod error;
mod link;
mod text;

pub use error::format_error_report;
pub use link::{classify, get_tiktok_url, get_youtube_id};
pub use text::truncate_chars;

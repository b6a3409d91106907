//! User-facing replies

use reqwest::StatusCode;

pub const GREETING: &str = "👋 Пришли ссылку YouTube или TikTok";
pub const UNRECOGNIZED: &str = "Не распознал ссылку. Нужен YouTube или TikTok.";

pub const NO_STREAMS: &str = "😕 Видео-потоки не найдены.";
pub const YOUTUBE_UNAVAILABLE: &str = "⚠️ Не удалось получить данные YouTube.";

pub const TIKTOK_NOT_FOUND: &str = "Не удалось найти медиа по ссылке.";
pub const DELIVERY_FAILED: &str = "⚠️ Не удалось скачать медиа. Попробуйте позже.";

pub fn youtube_status(status: StatusCode) -> String {
    format!("⚠️ YouTube API статус {}.", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_status_is_numeric() {
        assert_eq!(youtube_status(StatusCode::FORBIDDEN), "⚠️ YouTube API статус 403.");
    }
}

#![allow(clippy::module_name_repetitions)]

use serde::Deserialize;
use std::{
    env::{self, VarError},
    fs, io,
    path::Path,
};
use thiserror::Error;

const BOT_TOKEN_ENV: &str = "BOT_TOKEN";
const BOT_TOKEN_ENV_ALIAS: &str = "TG_TOKEN";
const DATA_API_KEY_ENV: &str = "RAPID_KEY";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct BotConfig {
    #[serde(skip)]
    pub token: Box<str>,
    pub caption: Box<str>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            token: "".into(),
            caption: "@savetictokandyoutube_bot".into(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct YoutubeApiConfig {
    pub host: Box<str>,
    pub details_url: Box<str>,
    #[serde(skip)]
    pub key: Option<Box<str>>,
}

impl Default for YoutubeApiConfig {
    fn default() -> Self {
        Self {
            host: "youtube-media-downloader.p.rapidapi.com".into(),
            details_url: "https://youtube-media-downloader.p.rapidapi.com/v2/video/details".into(),
            key: None,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TikTokConfig {
    pub api_url: Box<str>,
    pub fallback_url: Box<str>,
    pub fallback_origin: Box<str>,
    pub user_agent: Box<str>,
}

impl Default for TikTokConfig {
    fn default() -> Self {
        Self {
            api_url: "https://www.tikwm.com/api/".into(),
            fallback_url: "https://ssstik.io/abc?url=dl".into(),
            fallback_origin: "https://ssstik.io".into(),
            user_agent: BROWSER_USER_AGENT.into(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UsersConfig {
    pub path: Box<str>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self { path: "users.json".into() }
    }
}

/// Request timeouts in seconds
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub youtube_details: u64,
    pub tiktok_api: u64,
    pub tiktok_fallback: u64,
    pub video_fetch: u64,
    pub photo_fetch: u64,
    pub send: f32,
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            youtube_details: 10,
            tiktok_api: 10,
            tiktok_fallback: 10,
            video_fetch: 25,
            photo_fetch: 15,
            send: 120.0,
        }
    }
}

#[derive(Default, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct Config {
    pub bot: BotConfig,
    pub youtube_api: YoutubeApiConfig,
    pub tiktok: TikTokConfig,
    pub users: UsersConfig,
    pub timeouts: TimeoutsConfig,
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error(transparent)]
    IO(#[from] io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum SecretsError {
    #[error("`{0}` env variable is not set")]
    NotPresent(&'static str),
    #[error("`{0}` env variable is not a valid UTF-8 string")]
    NotUnicode(&'static str),
}

/// # Panics
///
/// Panics if the `CONFIG_PATH` environment variable is not valid UTF-8.
#[must_use]
pub fn get_path() -> Box<str> {
    let path = match env::var("CONFIG_PATH") {
        Ok(val) => val,
        Err(VarError::NotPresent) => String::from("config.toml"),
        Err(VarError::NotUnicode(_)) => {
            panic!("`CONFIG_PATH` env variable is not a valid UTF-8 string!");
        }
    };

    path.into_boxed_str()
}

#[allow(clippy::missing_errors_doc)]
pub fn parse_from_fs(path: impl AsRef<Path>) -> Result<Config, ParseError> {
    let raw = fs::read_to_string(path)?;
    let cfg = toml::from_str(&raw)?;
    Ok(cfg)
}

fn read_env(key: &'static str) -> Result<Option<Box<str>>, SecretsError> {
    match env::var(key) {
        Ok(val) if val.trim().is_empty() => Ok(None),
        Ok(val) => Ok(Some(val.into_boxed_str())),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(SecretsError::NotUnicode(key)),
    }
}

/// First of the variables that is set
fn read_any_env(keys: &[&'static str]) -> Result<Option<Box<str>>, SecretsError> {
    for &key in keys {
        if let Some(val) = read_env(key)? {
            return Ok(Some(val));
        }
    }
    Ok(None)
}

impl Config {
    /// Fills the secrets from the process environment.
    /// The bot token (`BOT_TOKEN`, or `TG_TOKEN` as older deployments name it) is required.
    /// The data-provider key is not: without it the provider answers with an error status.
    #[allow(clippy::missing_errors_doc)]
    pub fn with_secrets_from_env(mut self) -> Result<Self, SecretsError> {
        self.bot.token = read_any_env(&[BOT_TOKEN_ENV, BOT_TOKEN_ENV_ALIAS])?.ok_or(SecretsError::NotPresent(BOT_TOKEN_ENV))?;
        self.youtube_api.key = read_env(DATA_API_KEY_ENV)?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();

        assert_eq!(cfg.users.path.as_ref(), "users.json");
        assert_eq!(cfg.timeouts.video_fetch, 25);
        assert_eq!(cfg.timeouts.photo_fetch, 15);
        assert_eq!(cfg.bot.caption.as_ref(), "@savetictokandyoutube_bot");
    }

    #[test]
    fn test_partial_sections() {
        let cfg: Config = toml::from_str(
            r#"
            [users]
            path = "/data/users.json"

            [timeouts]
            youtube_details = 30
            "#,
        )
        .unwrap();

        assert_eq!(cfg.users.path.as_ref(), "/data/users.json");
        assert_eq!(cfg.timeouts.youtube_details, 30);
        assert_eq!(cfg.timeouts.tiktok_api, 10);
        assert_eq!(cfg.tiktok.fallback_origin.as_ref(), "https://ssstik.io");
    }

    #[test]
    fn test_secrets_are_not_read_from_file() {
        let cfg: Config = toml::from_str(
            r#"
            [bot]
            token = "123:abc"
            "#,
        )
        .unwrap();

        assert!(cfg.bot.token.is_empty());
        assert!(cfg.youtube_api.key.is_none());
    }

    #[test]
    fn test_first_set_env_wins() {
        env::set_var("MEDIA_RELAY_TEST_PRIMARY", "   ");
        env::set_var("MEDIA_RELAY_TEST_ALIAS", "123:alias");
        env::set_var("MEDIA_RELAY_TEST_OTHER", "123:other");

        assert_eq!(
            read_any_env(&["MEDIA_RELAY_TEST_PRIMARY", "MEDIA_RELAY_TEST_ALIAS", "MEDIA_RELAY_TEST_OTHER"])
                .unwrap()
                .as_deref(),
            Some("123:alias")
        );
        assert_eq!(read_any_env(&["MEDIA_RELAY_TEST_UNSET"]).unwrap(), None);
    }
}

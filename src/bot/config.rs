use std::{env, fs, sync::Arc, time::Duration};

use ab_glyph::FontVec;
use regex::Regex;
use reqwest::Url;
use teloxide::types::ChatId;

use crate::bot::constants::{
    channel::{CHANNEL_ID, CHANNEL_USERNAME, SUPPORT_USERNAME, TELEGRAM_LINK_BASE},
    market::{BUNDLED_FONT_NAME, COINGECKO_PRICE_URL, PRICE_TIMEOUT_SECS},
};

pub const TOKEN_ENV: &str = "API_TOKEN";
pub const FONT_ENV: &str = "CHART_FONT_PATH";

static BUNDLED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is not set.")]
    MissingVar(&'static str),
    #[error("{0} environment variable is empty.")]
    EmptyVar(&'static str),
    #[error("Invalid Telegram username: {0}")]
    InvalidHandle(String),
    #[error("Failed to load chart font {path}: {reason}")]
    Font { path: String, reason: String },
}

/* Process-wide settings.
 * Built once in main, then shared with every handler through the dispatcher dependencies.
 */
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub channel_id: ChatId,
    pub channel_url: Url,
    pub support_url: Url,
    pub price_url: String,
    pub price_timeout: Duration,
    pub chart_font: Arc<FontVec>,
}

impl BotConfig {
    // Builds a config with the fixed channel and support settings and the bundled chart font.
    pub fn new(token: &str) -> Result<Self, ConfigError> {
        Ok(BotConfig {
            token: token.to_string(),
            channel_id: ChatId(CHANNEL_ID),
            channel_url: telegram_link(CHANNEL_USERNAME)?,
            support_url: telegram_link(SUPPORT_USERNAME)?,
            price_url: COINGECKO_PRICE_URL.to_string(),
            price_timeout: Duration::from_secs(PRICE_TIMEOUT_SECS),
            chart_font: Arc::new(bundled_chart_font()?),
        })
    }

    // Reads the bot token and chart font from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = read_token(env::var(TOKEN_ENV))?;
        let mut config = BotConfig::new(&token)?;
        if let Some(font) = load_chart_font(env::var(FONT_ENV).ok())? {
            config.chart_font = Arc::new(font);
        }
        Ok(config)
    }

    pub fn with_price_url(mut self, url: &str) -> Self {
        self.price_url = url.to_string();
        self
    }

    pub fn with_price_timeout(mut self, timeout: Duration) -> Self {
        self.price_timeout = timeout;
        self
    }
}

fn read_token(value: Result<String, env::VarError>) -> Result<String, ConfigError> {
    match value {
        Ok(token) if token.trim().is_empty() => Err(ConfigError::EmptyVar(TOKEN_ENV)),
        Ok(token) => Ok(token.trim().to_string()),
        Err(_) => Err(ConfigError::MissingVar(TOKEN_ENV)),
    }
}

// Validates a Telegram username, stripping a leading '@'.
pub fn parse_username(username: &str) -> Result<String, ConfigError> {
    let text = username.trim_start_matches('@');

    if text.split_whitespace().count() == 1 && text.len() >= 5 {
        let re = Regex::new(r"^[a-zA-Z0-9_]+$");
        if let Ok(re) = re {
            if re.is_match(text) {
                return Ok(text.to_string());
            }
        }
    }

    Err(ConfigError::InvalidHandle(username.to_string()))
}

// Builds the public t.me link for a username.
pub fn telegram_link(username: &str) -> Result<Url, ConfigError> {
    let username = parse_username(username)?;
    Url::parse(&format!("{TELEGRAM_LINK_BASE}{username}"))
        .map_err(|_| ConfigError::InvalidHandle(username))
}

// The font compiled into the binary, so charts always carry their text.
pub fn bundled_chart_font() -> Result<FontVec, ConfigError> {
    FontVec::try_from_vec(BUNDLED_FONT.to_vec()).map_err(|err| ConfigError::Font {
        path: BUNDLED_FONT_NAME.to_string(),
        reason: err.to_string(),
    })
}

// Loads a chart font override. None when no path is configured.
fn load_chart_font(explicit: Option<String>) -> Result<Option<FontVec>, ConfigError> {
    let path = match explicit.filter(|path| !path.trim().is_empty()) {
        Some(path) => path,
        None => return Ok(None),
    };

    let data = fs::read(&path).map_err(|err| ConfigError::Font {
        path: path.clone(),
        reason: err.to_string(),
    })?;
    let font = FontVec::try_from_vec(data).map_err(|err| ConfigError::Font {
        path: path.clone(),
        reason: err.to_string(),
    })?;

    log::info!("Loaded chart font from {}", path);
    Ok(Some(font))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token() {
        let token = read_token(Err(env::VarError::NotPresent));
        assert!(matches!(token, Err(ConfigError::MissingVar(TOKEN_ENV))));
    }

    #[test]
    fn test_blank_token() {
        let token = read_token(Ok("   ".to_string()));
        assert!(matches!(token, Err(ConfigError::EmptyVar(TOKEN_ENV))));
    }

    #[test]
    fn test_token_is_trimmed() {
        let token = read_token(Ok(" 123:abc\n".to_string()));
        assert_eq!(token.unwrap(), "123:abc");
    }

    #[test]
    fn test_parse_username() {
        assert_eq!(parse_username("@MyPyTel_MKbot").unwrap(), "MyPyTel_MKbot");
        assert_eq!(parse_username("TIMCN").unwrap(), "TIMCN");
        assert!(parse_username("abc").is_err());
        assert!(parse_username("bad handle").is_err());
        assert!(parse_username("bad-handle").is_err());
    }

    #[test]
    fn test_default_links() {
        let config = BotConfig::new("123:abc").unwrap();
        assert_eq!(config.channel_url.as_str(), "https://t.me/MyPyTel_MKbot");
        assert_eq!(config.support_url.as_str(), "https://t.me/TIMCN");
        assert_eq!(config.channel_id, ChatId(-1002460204159));
        assert_eq!(config.price_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bundled_font_loads() {
        assert!(bundled_chart_font().is_ok());
        assert!(load_chart_font(None).unwrap().is_none());
        assert!(load_chart_font(Some("  ".to_string())).unwrap().is_none());
    }

    #[test]
    fn test_unreadable_explicit_font() {
        let font = load_chart_font(Some("/nonexistent/font.ttf".to_string()));
        assert!(matches!(font, Err(ConfigError::Font { .. })));
    }
}

use anyhow::Result;
use chrono::NaiveDate;
use std::env;
use std::time::Duration;
use tracing::info;

pub const BOT_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

pub const DEFAULT_RESULTS_BASE_URL: &str = "https://www.minhngoc.net.vn/ket-qua-xo-so/mien-bac";
pub const DEFAULT_RESULT_TABLE_CLASS: &str = "bkqmienbac";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_START_YEAR: i32 = 2000;

/// Everything a run needs, resolved once in `main` and handed down.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub chat_id: String,
    pub start_date: NaiveDate,
    pub results_base_url: String,
    pub result_table_class: String,
    pub telegram_api_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    pub request_delay: Duration,
    pub progress_interval: usize,
    pub top_n: usize,
}

impl Config {
    /// Builds a config with built-in defaults for everything except the
    /// two Telegram credentials.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            start_date: NaiveDate::from_ymd_opt(DEFAULT_START_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
            results_base_url: DEFAULT_RESULTS_BASE_URL.to_string(),
            result_table_class: DEFAULT_RESULT_TABLE_CLASS.to_string(),
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            request_delay: Duration::from_millis(300),
            progress_interval: 50,
            top_n: 10,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Missing and empty values are treated the same; whitespace is a value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let (Some(bot_token), Some(chat_id)) = (read(BOT_TOKEN_VAR), read(CHAT_ID_VAR)) else {
            anyhow::bail!(
                "Missing environment variable {} or {}",
                BOT_TOKEN_VAR,
                CHAT_ID_VAR
            );
        };

        info!(
            action = "load",
            component = "config",
            chat_id = %chat_id,
            "Configuration loaded from environment"
        );
        Ok(Self::new(bot_token, chat_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn both_variables_present() {
        let config =
            Config::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, "123:abc"), (CHAT_ID_VAR, "-100")]))
                .unwrap();
        assert_eq!(config.bot_token, "123:abc");
        assert_eq!(config.chat_id, "-100");
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[(CHAT_ID_VAR, "-100")])).unwrap_err();
        assert!(err.to_string().contains(BOT_TOKEN_VAR));
    }

    #[test]
    fn missing_chat_id_is_an_error() {
        assert!(Config::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, "123:abc")])).is_err());
    }

    #[test]
    fn whitespace_value_is_kept() {
        let config =
            Config::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, " "), (CHAT_ID_VAR, "-100")]))
                .unwrap();
        assert_eq!(config.bot_token, " ");
    }

    #[test]
    fn empty_value_counts_as_missing() {
        assert!(
            Config::from_lookup(lookup_from(&[(BOT_TOKEN_VAR, ""), (CHAT_ID_VAR, "-100")]))
                .is_err()
        );
    }
}

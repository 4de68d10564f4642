use std::{fmt::Debug, str::FromStr, time::Duration};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminders job looks for due `Reminder`s. Reminders are
    /// scheduled with minute resolution so anything below a minute is fine.
    pub reminder_poll_interval: Duration,
    /// Telegram bot used to deliver reminders. When this is not set
    /// reminders are only written to the log.
    pub telegram: Option<TelegramConfig>,
}

#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Base url of the Bot API, overridable for local bot api servers and tests
    pub api_url: String,
}

impl Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Parses the value of an environment variable, falling back to `default`
/// when it is missing or malformed.
fn parse_var<T: FromStr + Debug>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        None => default,
        Some(value) => match value.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default value: {:?}.",
                    key, value, default
                );
                default
            }
        },
    }
}

fn parse_poll_interval(value: Option<String>) -> Duration {
    let secs = parse_var(
        "REMINDER_POLL_INTERVAL_SECS",
        value,
        DEFAULT_POLL_INTERVAL_SECS,
    );
    if secs == 0 {
        warn!(
            "REMINDER_POLL_INTERVAL_SECS can not be 0, falling back to the default value: {}.",
            DEFAULT_POLL_INTERVAL_SECS
        );
        return Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS);
    }
    Duration::from_secs(secs)
}

fn parse_telegram(bot_token: Option<String>, api_url: Option<String>) -> Option<TelegramConfig> {
    let bot_token = bot_token.filter(|token| !token.trim().is_empty())?;
    let api_url = api_url.unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.into());
    Some(TelegramConfig {
        bot_token,
        api_url: api_url.trim_end_matches('/').to_string(),
    })
}

impl Config {
    pub fn new() -> Self {
        let port = parse_var("PORT", std::env::var("PORT").ok(), DEFAULT_PORT);
        let reminder_poll_interval =
            parse_poll_interval(std::env::var("REMINDER_POLL_INTERVAL_SECS").ok());
        let telegram = parse_telegram(
            std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            std::env::var("TELEGRAM_API_URL").ok(),
        );

        Self {
            port,
            reminder_poll_interval,
            telegram,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_or_falls_back_to_default() {
        assert_eq!(parse_var("PORT", None, 5000), 5000);
        assert_eq!(parse_var("PORT", Some("8080".into()), 5000), 8080);
        assert_eq!(parse_var("PORT", Some("eighty".into()), 5000), 5000);
    }

    #[test]
    fn poll_interval_must_be_positive() {
        assert_eq!(parse_poll_interval(None), Duration::from_secs(30));
        assert_eq!(parse_poll_interval(Some("5".into())), Duration::from_secs(5));
        assert_eq!(parse_poll_interval(Some("0".into())), Duration::from_secs(30));
        assert_eq!(parse_poll_interval(Some("-3".into())), Duration::from_secs(30));
    }

    #[test]
    fn telegram_requires_a_token() {
        assert!(parse_telegram(None, None).is_none());
        assert!(parse_telegram(Some("  ".into()), None).is_none());

        let telegram = parse_telegram(Some("123:abc".into()), None).unwrap();
        assert_eq!(telegram.api_url, "https://api.telegram.org");

        let telegram =
            parse_telegram(Some("123:abc".into()), Some("http://localhost:8081/".into())).unwrap();
        assert_eq!(telegram.api_url, "http://localhost:8081");
        assert!(!format!("{:?}", telegram).contains("123:abc"));
    }
}

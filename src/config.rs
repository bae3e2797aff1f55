use clap::ValueEnum;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::WatchError;

pub const DEFAULT_INTERVAL_SECS: u64 = 25;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UNAVAILABLE_TEXT: &str = "full and unavailable";
pub const DEFAULT_MESSAGE: &str = "Resource is available.";

/// HTTP method used for each poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Head,
}

impl Method {
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
        }
    }
}

/// Everything the watcher needs, built once before the loop starts
/// and only ever read afterwards.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollConfig {
    pub url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
    pub keywords: Vec<String>,
    pub regexes: Vec<String>,
    pub regions: Vec<String>,
    pub region_available: bool,
    pub region_unavailable_text: String,
    /// Seconds between polls.
    pub interval: u64,
    /// Seconds before a fetch or Telegram call is abandoned.
    pub timeout: u64,
    pub command: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub telegram_message: String,
    pub include_matches: bool,
    pub align_hour: bool,
    pub once: bool,
    pub print_message: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: Method::Get,
            headers: BTreeMap::new(),
            keywords: Vec::new(),
            regexes: Vec::new(),
            regions: Vec::new(),
            region_available: false,
            region_unavailable_text: DEFAULT_UNAVAILABLE_TEXT.to_string(),
            interval: DEFAULT_INTERVAL_SECS,
            timeout: DEFAULT_TIMEOUT_SECS,
            command: None,
            telegram_token: None,
            telegram_chat_id: None,
            telegram_message: DEFAULT_MESSAGE.to_string(),
            include_matches: false,
            align_hour: false,
            once: false,
            print_message: false,
        }
    }
}

impl PollConfig {
    /// Reject configurations the loop cannot run with.
    pub fn validate(&self) -> Result<(), WatchError> {
        if self.url.trim().is_empty() {
            return Err(WatchError::config("a target URL is required"));
        }
        if self.keywords.is_empty() && self.regexes.is_empty() {
            return Err(WatchError::config(
                "provide at least one keyword or regex",
            ));
        }
        if self.telegram_token.is_some() != self.telegram_chat_id.is_some() {
            return Err(WatchError::config(
                "provide both the Telegram token and chat id together",
            ));
        }
        Ok(())
    }

    /// Treat empty command and Telegram settings as not given.
    pub fn without_blank_options(mut self) -> Self {
        for opt in [&mut self.command, &mut self.telegram_token, &mut self.telegram_chat_id] {
            if opt.as_deref() == Some("") {
                *opt = None;
            }
        }
        self
    }

    /// Token and chat id, present only when both are set.
    pub fn telegram(&self) -> Option<(&str, &str)> {
        match (&self.telegram_token, &self.telegram_chat_id) {
            (Some(token), Some(chat)) => Some((token.as_str(), chat.as_str())),
            _ => None,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Parse the `--headers` JSON object.
pub fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>, WatchError> {
    serde_json::from_str(raw)
        .map_err(|e| WatchError::config(format!("invalid JSON for headers: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PollConfig {
        PollConfig {
            url: "https://example.com".into(),
            keywords: vec!["stock".into()],
            ..PollConfig::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn no_keyword_or_regex_is_rejected() {
        let cfg = PollConfig { keywords: vec![], ..base() };
        let err = cfg.validate().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn regex_alone_is_enough() {
        let cfg = PollConfig {
            keywords: vec![],
            regexes: vec!["^ok".into()],
            ..base()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_telegram_credentials_are_rejected() {
        let token_only = PollConfig { telegram_token: Some("t".into()), ..base() };
        assert!(token_only.validate().is_err());

        let chat_only = PollConfig { telegram_chat_id: Some("1".into()), ..base() };
        assert!(chat_only.validate().is_err());

        let both = PollConfig {
            telegram_token: Some("t".into()),
            telegram_chat_id: Some("1".into()),
            ..base()
        };
        assert!(both.validate().is_ok());
        assert_eq!(both.telegram(), Some(("t", "1")));
    }

    #[test]
    fn blank_options_are_dropped() {
        let cfg = PollConfig {
            command: Some(String::new()),
            telegram_token: Some(String::new()),
            telegram_chat_id: Some("42".into()),
            ..base()
        }
        .without_blank_options();
        assert_eq!(cfg.command, None);
        assert_eq!(cfg.telegram_token, None);
        assert_eq!(cfg.telegram_chat_id.as_deref(), Some("42"));
    }

    #[test]
    fn empty_url_is_rejected() {
        let cfg = PollConfig { url: "  ".into(), ..base() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn header_json_must_be_a_string_map() {
        let headers = parse_headers(r#"{"Authorization":"Bearer x"}"#).unwrap();
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer x"));

        assert!(parse_headers("{not json").unwrap_err().is_config());
        assert!(parse_headers(r#"{"X-Count": 3}"#).is_err());
    }
}

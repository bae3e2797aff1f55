use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::{
    parse_headers, Method, PollConfig, DEFAULT_INTERVAL_SECS, DEFAULT_MESSAGE,
    DEFAULT_TIMEOUT_SECS, DEFAULT_UNAVAILABLE_TEXT,
};

/// CLI arguments for a single target, or --config YAML with the same fields.
#[derive(Parser, Debug)]
#[command(name = "pollwatch")]
#[command(version)]
#[command(about = "Poll a URL and notify when content matches a keyword, regex or region!")]
pub struct Args {
    /// Target URL to poll
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// HTTP method to use
    #[arg(long = "method", value_enum, ignore_case = true, default_value_t = Method::Get)]
    pub method: Method,

    /// JSON object of extra headers, e.g. '{"Authorization":"Bearer ..."}'
    #[arg(long = "headers")]
    pub headers: Option<String>,

    /// Plain-text keyword to match in the response body (repeatable)
    #[arg(short = 'k', long = "keyword")]
    pub keyword: Vec<String>,

    /// Regex to match in the response body (repeatable)
    #[arg(short = 'r', long = "regex")]
    pub regex: Vec<String>,

    /// Region code to restrict notifications to (repeatable, e.g. SG, IN, AU)
    #[arg(long = "region")]
    pub region: Vec<String>,

    /// Only notify when a region appears without the unavailable text
    #[arg(long = "region-available", default_value_t = false)]
    pub region_available: bool,

    /// Text marking a region as unavailable
    #[arg(long = "region-unavailable-text", default_value = DEFAULT_UNAVAILABLE_TEXT)]
    pub region_unavailable_text: String,

    /// Seconds between checks
    #[arg(long = "interval", default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: u64,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Command to run once a match is detected
    #[arg(long = "command")]
    pub command: Option<String>,

    /// Telegram bot token (or ENV TELEGRAM_BOT_TOKEN)
    #[arg(long = "telegram-token", env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_token: Option<String>,

    /// Telegram chat id receiving the notification (or ENV TELEGRAM_CHAT_ID)
    #[arg(long = "telegram-chat-id", env = "TELEGRAM_CHAT_ID")]
    pub telegram_chat_id: Option<String>,

    /// Notification text; '{regions}' is replaced by the available regions
    #[arg(long = "telegram-message", default_value = DEFAULT_MESSAGE)]
    pub telegram_message: String,

    /// Append the matching rules to the notification
    #[arg(long = "include-matches", default_value_t = false)]
    pub include_matches: bool,

    /// Wait for the top of the hour before the first check
    #[arg(long = "align-hour", default_value_t = false)]
    pub align_hour: bool,

    /// Exit after the first match
    #[arg(long = "once", default_value_t = false)]
    pub once: bool,

    /// Also print the notification text to stdout
    #[arg(long = "print-message", default_value_t = false)]
    pub print_message: bool,

    /// YAML configuration file; only the Telegram token and chat id may be combined with it
    #[arg(
        short = 'C',
        long = "config",
        conflicts_with_all = [
            "url", "method", "headers", "keyword", "regex", "region", "region_available",
            "region_unavailable_text", "interval", "timeout", "command", "telegram_message",
            "include_matches", "align_hour", "once", "print_message",
        ]
    )]
    pub config: Option<PathBuf>,

    /// Verbosity (-v, -vv)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Load the configuration from YAML if provided, otherwise from CLI args.
pub fn load_config(args: &Args) -> Result<PollConfig> {
    let config = if let Some(cfg_path) = args.config.as_ref() {
        let text = std::fs::read_to_string(cfg_path)
            .with_context(|| format!("Reading config file: {}", cfg_path.display()))?;
        let mut cfg: PollConfig = serde_yaml::from_str(&text)
            .with_context(|| "Parsing YAML configuration")?;
        // Secrets may stay out of the file.
        if cfg.telegram_token.is_none() {
            cfg.telegram_token = args.telegram_token.clone();
        }
        if cfg.telegram_chat_id.is_none() {
            cfg.telegram_chat_id = args.telegram_chat_id.clone();
        }
        cfg
    } else {
        let url = args
            .url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--url required in CLI mode (or use --config)"))?;
        let headers = match args.headers.as_deref() {
            Some(raw) => parse_headers(raw)?,
            None => Default::default(),
        };

        PollConfig {
            url,
            method: args.method,
            headers,
            keywords: args.keyword.clone(),
            regexes: args.regex.clone(),
            regions: args.region.clone(),
            region_available: args.region_available,
            region_unavailable_text: args.region_unavailable_text.clone(),
            interval: args.interval,
            timeout: args.timeout,
            command: args.command.clone(),
            telegram_token: args.telegram_token.clone(),
            telegram_chat_id: args.telegram_chat_id.clone(),
            telegram_message: args.telegram_message.clone(),
            include_matches: args.include_matches,
            align_hour: args.align_hour,
            once: args.once,
            print_message: args.print_message,
        }
    };

    let config = config.without_blank_options();
    config.validate()?;
    Ok(config)
}

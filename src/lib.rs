pub mod args;
pub mod config;
pub mod error;
pub mod modules;
pub mod notifiers;
pub mod utils;

use regex::Regex;

use crate::config::PollConfig;
use crate::error::WatchError;

/// Content rule: either literal substring or regex.
#[derive(Clone, Debug)]
pub enum Matcher {
    Literal(String),
    Regex(Regex),
}

impl Matcher {
    /// Build every rule from the configuration: keywords first, then regexes.
    pub fn from_config(config: &PollConfig) -> Result<Vec<Self>, WatchError> {
        let mut rules: Vec<Matcher> = config
            .keywords
            .iter()
            .map(|k| Matcher::Literal(k.clone()))
            .collect();
        for pattern in &config.regexes {
            let re = Regex::new(pattern)
                .map_err(|e| WatchError::config(format!("invalid regex '{pattern}': {e}")))?;
            rules.push(Matcher::Regex(re));
        }
        Ok(rules)
    }

    /// Check if the text matches (case-sensitive, first hit is enough).
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Literal(s) => text.contains(s.as_str()),
            Matcher::Regex(r) => r.is_match(text),
        }
    }

    /// Identifier reported when the rule fires, e.g. `keyword:sold`.
    pub fn id(&self) -> String {
        match self {
            Matcher::Literal(s) => format!("keyword:{s}"),
            Matcher::Regex(r) => format!("regex:{}", r.as_str()),
        }
    }
}

/// Which rules fired on one fetched page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matched: bool,
    pub hits: Vec<String>,
}

/// Run every rule against the text, keeping configuration order.
pub fn evaluate_matches(text: &str, rules: &[Matcher]) -> MatchOutcome {
    let hits: Vec<String> = rules
        .iter()
        .filter(|rule| rule.matches(text))
        .map(Matcher::id)
        .collect();
    MatchOutcome { matched: !hits.is_empty(), hits }
}

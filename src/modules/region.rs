//! Region gating.
//!
//! Two independent checks live here:
//!
//! * the *filter*: the page must mention at least one configured region
//!   token as a whole word;
//! * *availability*: a region counts as available when it is mentioned and
//!   is not followed, anywhere later in the page, by the unavailable marker.
//!
//! The availability check is a text heuristic. A region mentioned several
//! times is suppressed by a single marker after its first mention.

use regex::{Regex, RegexBuilder};

use crate::error::WatchError;

/// Regions deemed available on one fetched page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionOutcome {
    pub available: bool,
    pub regions: Vec<String>,
}

#[derive(Clone, Debug)]
struct RegionProbe {
    token: String,
    mentioned: Regex,
    unavailable: Regex,
}

/// Compiled region patterns, built once at startup.
#[derive(Clone, Debug)]
pub struct RegionRules {
    filter: Option<Regex>,
    probes: Vec<RegionProbe>,
}

/// Uppercase and trim region tokens, dropping blanks.
pub fn normalize_regions(regions: &[String]) -> Vec<String> {
    regions
        .iter()
        .map(|r| r.trim().to_uppercase())
        .filter(|r| !r.is_empty())
        .collect()
}

fn build(pattern: &str, dot_all: bool) -> Result<Regex, WatchError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .dot_matches_new_line(dot_all)
        .build()
        .map_err(|e| WatchError::config(format!("invalid region pattern '{pattern}': {e}")))
}

impl RegionRules {
    pub fn new(regions: &[String], unavailable_text: &str) -> Result<Self, WatchError> {
        let tokens = normalize_regions(regions);
        if tokens.is_empty() {
            return Ok(Self { filter: None, probes: Vec::new() });
        }

        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t))
            .collect::<Vec<_>>()
            .join("|");
        let filter = build(&format!(r"\b(?:{alternation})\b"), false)?;

        let marker = regex::escape(unavailable_text);
        let probes = tokens
            .into_iter()
            .map(|token| -> Result<RegionProbe, WatchError> {
                let escaped = regex::escape(&token);
                Ok(RegionProbe {
                    mentioned: build(&format!(r"\b{escaped}\b"), false)?,
                    unavailable: build(&format!(r"\b{escaped}\b.*?{marker}"), true)?,
                    token,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { filter: Some(filter), probes })
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// The filter pattern, reported in match details.
    pub fn filter_pattern(&self) -> Option<&str> {
        self.filter.as_ref().map(Regex::as_str)
    }

    /// True when no region is configured or at least one is mentioned.
    pub fn passes_filter(&self, text: &str) -> bool {
        self.filter.as_ref().map_or(true, |re| re.is_match(text))
    }

    /// Regions mentioned without a trailing unavailable marker, in configuration order.
    pub fn availability(&self, text: &str) -> RegionOutcome {
        let regions: Vec<String> = self
            .probes
            .iter()
            .filter(|p| !p.unavailable.is_match(text))
            .filter(|p| p.mentioned.is_match(text))
            .map(|p| p.token.clone())
            .collect();
        RegionOutcome { available: !regions.is_empty(), regions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(tokens: &[&str], marker: &str) -> RegionRules {
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        RegionRules::new(&tokens, marker).unwrap()
    }

    #[test]
    fn marker_after_region_marks_it_unavailable() {
        let r = rules(&["SG", "IN"], "full and unavailable");
        let out = r.availability("SG: full and unavailable. IN: ready");
        assert_eq!(out.regions, vec!["IN"]);
        assert!(out.available);
    }

    #[test]
    fn all_regions_available_without_marker() {
        let r = rules(&["SG", "IN"], "full and unavailable");
        let out = r.availability("SG ready, IN ready");
        assert_eq!(out.regions, vec!["SG", "IN"]);
        assert!(out.available);
    }

    #[test]
    fn no_mention_means_nothing_available() {
        let r = rules(&["SG", "IN"], "full and unavailable");
        let out = r.availability("DE ready, US ready");
        assert!(out.regions.is_empty());
        assert!(!out.available);
    }

    #[test]
    fn marker_may_be_on_a_later_line_and_differ_in_case() {
        let r = rules(&["sg"], "sold out");
        let out = r.availability("sg\nstatus:\nSOLD OUT");
        assert!(!out.available);
    }

    #[test]
    fn one_later_marker_suppresses_mixed_mentions() {
        let r = rules(&["SG"], "sold out");
        let out = r.availability("SG ready. DE sold out. SG ready again");
        assert!(!out.available);
    }

    #[test]
    fn tokens_match_whole_words_only() {
        let r = rules(&["SG"], "sold out");
        assert!(!r.availability("SGP ready").available);
        assert!(!r.passes_filter("SGP ready"));
        assert!(r.passes_filter("region: sg"));
    }

    #[test]
    fn tokens_are_normalized_and_blanks_dropped() {
        let raw = vec![" sg ".to_string(), "".to_string(), "In".to_string(), "  ".to_string()];
        assert_eq!(normalize_regions(&raw), vec!["SG", "IN"]);

        let r = RegionRules::new(&raw, "x").unwrap();
        assert_eq!(r.filter_pattern(), Some(r"\b(?:SG|IN)\b"));
    }

    #[test]
    fn no_regions_means_open_filter() {
        let r = rules(&[" "], "sold out");
        assert!(r.is_empty());
        assert!(r.passes_filter("anything"));
        assert_eq!(r.filter_pattern(), None);
        assert!(!r.availability("anything").available);
    }

    #[test]
    fn special_characters_are_escaped() {
        let r = rules(&["EU-1"], "(full)");
        let out = r.availability("EU-1 (full). ");
        assert!(!out.available);
        assert!(rules(&["EU-1"], "(full)").availability("EU-1 open").available);
    }
}

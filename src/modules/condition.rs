use crate::config::PollConfig;
use crate::error::WatchError;
use crate::modules::region::{RegionOutcome, RegionRules};
use crate::{evaluate_matches, MatchOutcome, Matcher};

/// Combine the match result with both region gates.
///
/// The region filter and, in availability mode, the availability check are
/// preconditions: when either fails nothing fires, whatever the rules say.
pub fn decide(
    matches: &MatchOutcome,
    region_filter_ok: bool,
    availability_mode: bool,
    regions: &RegionOutcome,
) -> bool {
    if !region_filter_ok {
        return false;
    }
    if availability_mode && !regions.available {
        return false;
    }
    matches.matched
}

/// Result of evaluating one fetched page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub triggered: bool,
    pub hits: Vec<String>,
    pub region_filter: Option<String>,
    pub available_regions: Vec<String>,
}

/// Compiled matching rules for the whole run.
#[derive(Clone, Debug)]
pub struct Rules {
    matchers: Vec<Matcher>,
    regions: RegionRules,
    availability_mode: bool,
}

impl Rules {
    pub fn from_config(config: &PollConfig) -> Result<Self, WatchError> {
        let matchers = Matcher::from_config(config)?;
        let regions = RegionRules::new(&config.regions, &config.region_unavailable_text)?;
        let availability_mode = config.region_available && !regions.is_empty();
        Ok(Self { matchers, regions, availability_mode })
    }

    /// Pure function of the text: same page, same evaluation.
    pub fn evaluate(&self, text: &str) -> Evaluation {
        let region_filter_ok = self.regions.passes_filter(text);
        let regions = if region_filter_ok && self.availability_mode {
            self.regions.availability(text)
        } else {
            RegionOutcome::default()
        };
        let matches = evaluate_matches(text, &self.matchers);

        Evaluation {
            triggered: decide(&matches, region_filter_ok, self.availability_mode, &regions),
            hits: matches.hits,
            region_filter: self.regions.filter_pattern().map(str::to_string),
            available_regions: regions.regions,
        }
    }
}

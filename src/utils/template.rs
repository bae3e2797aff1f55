use crate::modules::condition::Evaluation;

/// The one placeholder recognized in the message template.
pub const REGIONS_PLACEHOLDER: &str = "{regions}";

/// Put the available regions into the message.
///
/// A template carrying `{regions}` gets the comma-joined list in its place
/// (possibly empty). Otherwise a non-empty list is appended on its own line.
pub fn render_regions(template: &str, regions: &[String]) -> String {
    let joined = regions.join(", ");
    if template.contains(REGIONS_PLACEHOLDER) {
        template.replace(REGIONS_PLACEHOLDER, &joined)
    } else if regions.is_empty() {
        template.to_string()
    } else {
        format!("{template}\nAvailable regions: {joined}")
    }
}

/// Build the notification text for a triggered poll.
pub fn build_message(template: &str, eval: &Evaluation, include_matches: bool) -> String {
    let mut message = render_regions(template, &eval.available_regions);
    if include_matches {
        let mut details = eval.hits.clone();
        if let Some(filter) = &eval.region_filter {
            details.push(format!("region:{filter}"));
        }
        if !eval.available_regions.is_empty() {
            details.push(format!("region_available:{}", eval.available_regions.join(", ")));
        }
        message.push_str("\nMatches: ");
        message.push_str(&details.join(", "));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn placeholder_is_substituted() {
        let out = render_regions("Open in {regions}!", &regions(&["SG", "IN"]));
        assert_eq!(out, "Open in SG, IN!");
    }

    #[test]
    fn regions_appended_without_placeholder() {
        let out = render_regions("Resource is available.", &regions(&["SG"]));
        assert_eq!(out, "Resource is available.\nAvailable regions: SG");
    }

    #[test]
    fn template_untouched_without_regions() {
        assert_eq!(render_regions("Up!", &[]), "Up!");
        assert_eq!(render_regions("Up in {regions}", &[]), "Up in ");
    }

    #[test]
    fn match_details_are_listed() {
        let eval = Evaluation {
            triggered: true,
            hits: regions(&["keyword:available", "regex:^ok"]),
            region_filter: Some(r"\b(?:SG|IN)\b".into()),
            available_regions: regions(&["SG", "IN"]),
        };
        let out = build_message("Go", &eval, true);
        assert_eq!(
            out,
            "Go\nAvailable regions: SG, IN\nMatches: keyword:available, regex:^ok, \
             region:\\b(?:SG|IN)\\b, region_available:SG, IN"
        );
    }

    #[test]
    fn match_details_only_when_asked() {
        let eval = Evaluation {
            triggered: true,
            hits: regions(&["keyword:available"]),
            ..Evaluation::default()
        };
        assert_eq!(build_message("Go", &eval, false), "Go");
        assert_eq!(build_message("Go", &eval, true), "Go\nMatches: keyword:available");
    }
}

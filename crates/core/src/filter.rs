//! Keyword-based content safety filter.
//!
//! Only `Strict` mode filters anything. The match is a plain case-insensitive
//! substring check against title and description, so terms can hit inside
//! longer words ("Sexton" contains "sex"). That false positive is accepted
//! behavior, not a bug.

/// Default term list shipped with the filter.
///
/// Overridable at construction time, e.g. from `AppConfig::blacklist_terms`.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "nsfw", "nude", "nudity", "naked", "sex", "porn", "erotic", "explicit", "genital", "penis", "vagina", "fetish",
];

/// Caller-selected content-filter aggressiveness.
///
/// Only `Strict` enables the blacklist check; every other mode, including
/// anything unrecognized on the wire, passes records through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafeMode {
    Strict,
    Moderate,
    Off,
}

impl SafeMode {
    /// Parse the `safe` query parameter. Missing defaults to `Strict`;
    /// unrecognized values fall through to `Off` (fail-open).
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            None => SafeMode::Strict,
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "strict" => SafeMode::Strict,
                "moderate" => SafeMode::Moderate,
                _ => SafeMode::Off,
            },
        }
    }
}

/// Substring blacklist applied to normalized results in `Strict` mode.
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    terms: Vec<String>,
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect())
    }
}

impl SafetyFilter {
    /// Create a filter with a custom term list. Terms are lower-cased once
    /// here so the per-record check only lower-cases the haystack.
    pub fn new(terms: Vec<String>) -> Self {
        Self { terms: terms.into_iter().map(|t| t.to_lowercase()).collect() }
    }

    /// Whether a record with the given title and description passes.
    ///
    /// Non-strict modes pass everything unconditionally.
    pub fn allows(&self, mode: SafeMode, title: &str, description: &str) -> bool {
        if mode != SafeMode::Strict {
            return true;
        }

        let haystack = format!("{} {}", title, description).to_lowercase();
        !self.terms.iter().any(|term| haystack.contains(term.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(SafeMode::from_param(None), SafeMode::Strict);
        assert_eq!(SafeMode::from_param(Some("Strict")), SafeMode::Strict);
        assert_eq!(SafeMode::from_param(Some("strict")), SafeMode::Strict);
        assert_eq!(SafeMode::from_param(Some("Moderate")), SafeMode::Moderate);
        assert_eq!(SafeMode::from_param(Some("Off")), SafeMode::Off);
    }

    #[test]
    fn test_unrecognized_mode_is_fail_open() {
        assert_eq!(SafeMode::from_param(Some("banana")), SafeMode::Off);

        let filter = SafetyFilter::default();
        assert!(filter.allows(SafeMode::from_param(Some("banana")), "explicit content", ""));
    }

    #[test]
    fn test_strict_blocks_blacklisted_term() {
        let filter = SafetyFilter::default();
        assert!(!filter.allows(SafeMode::Strict, "nsfw gallery", ""));
        assert!(!filter.allows(SafeMode::Strict, "Harmless title", "explicit description"));
        assert!(filter.allows(SafeMode::Strict, "Lighthouse at dusk", "A stone lighthouse"));
    }

    #[test]
    fn test_strict_substring_false_positive() {
        // "Sexton" contains "sex"; the substring match is intentional.
        let filter = SafetyFilter::default();
        assert!(!filter.allows(SafeMode::Strict, "Sexton House", ""));
        assert!(filter.allows(SafeMode::Off, "Sexton House", ""));
    }

    #[test]
    fn test_case_insensitive_match() {
        let filter = SafetyFilter::default();
        assert!(!filter.allows(SafeMode::Strict, "NSFW Collection", ""));
    }

    #[test]
    fn test_moderate_passes_everything() {
        let filter = SafetyFilter::default();
        assert!(filter.allows(SafeMode::Moderate, "nsfw gallery", "explicit"));
    }

    #[test]
    fn test_custom_terms() {
        let filter = SafetyFilter::new(vec!["Widget".into()]);
        assert!(!filter.allows(SafeMode::Strict, "widget factory", ""));
        assert!(filter.allows(SafeMode::Strict, "nsfw gallery", ""));
    }

    #[test]
    fn test_missing_fields_treated_as_empty() {
        let filter = SafetyFilter::default();
        assert!(filter.allows(SafeMode::Strict, "", ""));
    }
}

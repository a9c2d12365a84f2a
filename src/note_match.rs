//! Qualifier access and the keyword-tier note matcher shared by the
//! junction, single-copy and direct-IR scans.

use gb_io::seq::{Feature, QualifierKey};

/// Tokens whose presence marks a note as describing a junction, not the
/// region the note would otherwise match.
pub const JUNCTION_BLACKLIST: &[&str] = &["jlb", "jsb", "jsa", "jla", "junction"];

/// First `note` qualifier value, if any. Only the first value is
/// consulted anywhere in the resolver.
pub fn note(feature: &Feature) -> Option<&str> {
    feature.qualifier_values("note".into()).next()
}

/// First `rpt_type` qualifier value, if any.
pub fn rpt_type(feature: &Feature) -> Option<&str> {
    feature.qualifier_values("rpt_type".into()).next()
}

/// Whether the feature carries the qualifier key at all, valued or not
/// (`/pseudo` has no value).
pub fn has_qualifier(feature: &Feature, key: &str) -> bool {
    let key = QualifierKey::from(key);
    feature.qualifiers.iter().any(|(k, _)| *k == key)
}

/// Keyword matcher over lowercased note text: hard identifiers decide a
/// role outright, soft identifiers only nominate it, and blacklist
/// tokens veto any match.
#[derive(Clone, Copy, Debug)]
pub struct NoteMatcher {
    hard: &'static [&'static str],
    soft: &'static [&'static str],
    blacklist: &'static [&'static str],
}

impl NoteMatcher {
    pub const fn new(
        hard: &'static [&'static str],
        soft: &'static [&'static str],
        blacklist: &'static [&'static str],
    ) -> Self {
        Self {
            hard,
            soft,
            blacklist,
        }
    }

    pub fn blocked(&self, note_lower: &str) -> bool {
        self.blacklist.iter().any(|token| note_lower.contains(token))
    }

    pub fn matches_hard(&self, note_lower: &str) -> bool {
        !self.blocked(note_lower) && self.hard.iter().any(|token| note_lower.contains(token))
    }

    pub fn matches_soft(&self, note_lower: &str) -> bool {
        !self.blocked(note_lower) && self.soft.iter().any(|token| note_lower.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_io::seq::{FeatureKind, Location};

    const MATCHER: NoteMatcher = NoteMatcher::new(
        &["inverted repeat a"],
        &["inverted"],
        JUNCTION_BLACKLIST,
    );

    #[test]
    fn hard_and_soft_tiers() {
        assert!(MATCHER.matches_hard("inverted repeat a (ira)"));
        assert!(!MATCHER.matches_hard("inverted repeat"));
        assert!(MATCHER.matches_soft("inverted repeat"));
    }

    #[test]
    fn blacklist_vetoes_both_tiers() {
        assert!(MATCHER.blocked("junction of inverted repeat a and lsc"));
        assert!(!MATCHER.matches_hard("junction of inverted repeat a and lsc"));
        assert!(!MATCHER.matches_soft("jsa; inverted repeat boundary"));
    }

    #[test]
    fn qualifier_access() {
        let feature = Feature {
            kind: FeatureKind::from("repeat_region"),
            location: Location::simple_range(0, 10),
            qualifiers: vec![
                ("rpt_type".into(), Some("inverted".to_string())),
                ("note".into(), Some("IRa".to_string())),
                ("note".into(), Some("second note".to_string())),
                ("pseudo".into(), None),
            ],
        };
        assert_eq!(note(&feature), Some("IRa"));
        assert_eq!(rpt_type(&feature), Some("inverted"));
        assert!(has_qualifier(&feature, "pseudo"));
        assert!(!has_qualifier(&feature, "gene"));
    }
}

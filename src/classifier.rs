//! Identifier classification: the shape of a hotel id decides which source owns it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ClassifierRules;
use crate::domain::SourceCategory;

static DIGITS_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("static pattern"));

impl ClassifierRules {
    /// Total and deterministic. First matching rule wins:
    /// short all-digit ids are demo ids, prefixed or over-long ids are external
    /// places, everything else is a store record key.
    pub fn classify(&self, id: &str) -> SourceCategory {
        if self.is_demo_id(id) {
            return SourceCategory::CuratedDemo;
        }
        if id.starts_with(&self.external_prefix) || id.chars().count() > self.max_record_id_len {
            return SourceCategory::ExternalPlace;
        }
        SourceCategory::PersistentRecord
    }

    fn is_demo_id(&self, id: &str) -> bool {
        if !DIGITS_ONLY.is_match(id) {
            return false;
        }
        // Digit strings too large for u64 are certainly above the demo ceiling
        id.parse::<u64>()
            .map(|n| n <= u64::from(self.max_demo_id))
            .unwrap_or(false)
    }
}

/// Classify with the default rules.
pub fn classify(id: &str) -> SourceCategory {
    ClassifierRules::default().classify(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_boundary() {
        assert_eq!(classify("1"), SourceCategory::CuratedDemo);
        assert_eq!(classify("20"), SourceCategory::CuratedDemo);
        assert_eq!(classify("0"), SourceCategory::CuratedDemo);
        assert_eq!(classify("007"), SourceCategory::CuratedDemo);
        assert_eq!(classify("21"), SourceCategory::PersistentRecord);
    }

    #[test]
    fn test_external_prefix_wins_regardless_of_length() {
        assert_eq!(classify("ChIJabc"), SourceCategory::ExternalPlace);
        assert_eq!(classify("ChIJ"), SourceCategory::ExternalPlace);
        // case sensitive
        assert_eq!(classify("chijabc"), SourceCategory::PersistentRecord);
    }

    #[test]
    fn test_long_ids_are_external() {
        let uuid_like = "123e4567-e89b-12d3-a456-426614174000";
        assert_eq!(uuid_like.len(), 36);
        assert_eq!(classify(uuid_like), SourceCategory::PersistentRecord);
        assert_eq!(classify(&format!("{uuid_like}x")), SourceCategory::ExternalPlace);
    }

    #[test]
    fn test_long_digit_strings_are_not_demo() {
        assert_eq!(classify("99999999999999999999999"), SourceCategory::PersistentRecord);
        assert_eq!(classify(&"9".repeat(40)), SourceCategory::ExternalPlace);
    }

    #[test]
    fn test_residual_cases() {
        assert_eq!(classify("hotel-9f3a7c"), SourceCategory::PersistentRecord);
        assert_eq!(classify(""), SourceCategory::PersistentRecord);
        assert_eq!(classify("-1"), SourceCategory::PersistentRecord);
        assert_eq!(classify("12a"), SourceCategory::PersistentRecord);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ClassifierRules {
            external_prefix: "ext:".into(),
            max_demo_id: 5,
            max_record_id_len: 10,
        };
        assert_eq!(rules.classify("5"), SourceCategory::CuratedDemo);
        assert_eq!(rules.classify("6"), SourceCategory::PersistentRecord);
        assert_eq!(rules.classify("ext:1"), SourceCategory::ExternalPlace);
        assert_eq!(rules.classify("abcdefghijk"), SourceCategory::ExternalPlace);
    }
}

//! Per-field fuzzy comparison of extracted and entered values.

use crate::models::{EnteredFields, ExtractedFields, FieldName, FieldVerdicts};

/// How a field's values are reduced before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchRule {
    /// Lowercase alphanumerics; equality or containment either way.
    Text,
    /// Digits only; exact equality.
    ExactDigits,
    /// Digits only; equality or containment either way.
    Digits,
}

impl MatchRule {
    fn for_field(field: FieldName) -> Self {
        match field {
            FieldName::Name | FieldName::IdNumber => MatchRule::Text,
            FieldName::DateOfBirth => MatchRule::ExactDigits,
            FieldName::PhoneNumber => MatchRule::Digits,
        }
    }

    fn reduce(&self, value: &str) -> String {
        match self {
            MatchRule::Text => value
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect(),
            MatchRule::ExactDigits | MatchRule::Digits => {
                value.chars().filter(|c| c.is_ascii_digit()).collect()
            }
        }
    }

    fn matches(&self, a: &str, b: &str) -> bool {
        if a.is_empty() || b.is_empty() {
            return false;
        }
        match self {
            MatchRule::ExactDigits => a == b,
            MatchRule::Text | MatchRule::Digits => a == b || a.contains(b) || b.contains(a),
        }
    }
}

/// Decide whether an extracted and an entered value denote the same thing.
///
/// Absent or blank values on either side never match.
pub fn compare(field: FieldName, extracted: Option<&str>, entered: &str) -> bool {
    let Some(extracted) = extracted else {
        return false;
    };
    if extracted.trim().is_empty() || entered.trim().is_empty() {
        return false;
    }

    let rule = MatchRule::for_field(field);
    rule.matches(&rule.reduce(extracted), &rule.reduce(entered))
}

/// Compare every field.
pub fn compare_all(extracted: &ExtractedFields, entered: &EnteredFields) -> FieldVerdicts {
    FieldVerdicts::from_fn(|field| compare(field, extracted.get(field), entered.get(field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_or_empty_never_matches() {
        for field in FieldName::ALL {
            assert!(!compare(field, None, "anything"));
            assert!(!compare(field, None, ""));
            assert!(!compare(field, Some("1234"), ""));
            assert!(!compare(field, Some("1234"), "   "));
        }
    }

    #[test]
    fn test_values_without_comparable_characters_never_match() {
        assert!(!compare(FieldName::Name, Some("--"), "--"));
        assert!(!compare(FieldName::PhoneNumber, Some("n/a"), "n/a"));
    }

    #[test]
    fn test_id_number_ignores_spacing() {
        assert!(compare(FieldName::IdNumber, Some("123412341234"), "123412341234"));
        assert!(compare(FieldName::IdNumber, Some("123412341234"), "1234 1234 1234"));
        assert!(!compare(FieldName::IdNumber, Some("123412341234"), "999912341235"));
    }

    #[test]
    fn test_name_containment() {
        assert!(compare(FieldName::Name, Some("Ravi Kumar"), "ravi kumar sharma"));
        assert!(compare(FieldName::Name, Some("Ravi Kumar Sharma"), "RAVI KUMAR"));
        assert!(compare(FieldName::Name, Some("Ravi Kumar"), "Ravi. Kumar"));
        assert!(!compare(FieldName::Name, Some("Ravi Kumar"), "Sita Devi"));
    }

    #[test]
    fn test_text_comparison_is_symmetric() {
        let pairs = [
            ("Ravi Kumar", "ravi kumar sharma"),
            ("Sita Devi", "Ravi Kumar"),
            ("1234 1234 1234", "123412341234"),
        ];
        for field in [FieldName::Name, FieldName::IdNumber] {
            for (a, b) in pairs {
                assert_eq!(compare(field, Some(a), b), compare(field, Some(b), a));
            }
        }
    }

    #[test]
    fn test_date_of_birth_is_exact() {
        assert!(compare(FieldName::DateOfBirth, Some("01/02/1990"), "01-02-1990"));
        assert!(compare(FieldName::DateOfBirth, Some("01/02/1990"), "01021990"));
        assert!(!compare(FieldName::DateOfBirth, Some("01/02/2000"), "02/01/2000"));
        assert!(!compare(FieldName::DateOfBirth, Some("1990"), "01/02/1990"));
    }

    #[test]
    fn test_phone_containment() {
        assert!(compare(FieldName::PhoneNumber, Some("9876543210"), "+919876543210"));
        assert!(compare(FieldName::PhoneNumber, Some("9876543210"), "98765-43210"));
        assert!(!compare(FieldName::PhoneNumber, Some("9876543210"), "9876543211"));
    }

    #[test]
    fn test_compare_all() {
        let extracted = ExtractedFields::default()
            .with(FieldName::Name, "Ravi Kumar")
            .with(FieldName::DateOfBirth, "01/02/1990")
            .with(FieldName::IdNumber, "123412341234");

        let entered = EnteredFields {
            name: "Ravi Kumar".to_string(),
            date_of_birth: "02/01/1990".to_string(),
            id_number: "1234 1234 1234".to_string(),
            phone_number: "9876543210".to_string(),
        };

        let flags = compare_all(&extracted, &entered);
        assert_eq!(
            flags,
            FieldVerdicts {
                name: true,
                date_of_birth: false,
                id_number: true,
                phone_number: false,
            }
        );
    }
}

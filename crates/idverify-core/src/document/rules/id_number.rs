//! National ID number extraction.

use super::patterns::{ID_GENERIC, ID_GROUPED};
use super::phone::validate_mobile;
use super::{ExtractionMatch, FieldExtractor, PatternRule, digits_only, first_match};
use crate::document::NormalizedText;
use crate::models::FieldName;

/// Digit count of the national ID format.
pub const ID_NUMBER_DIGITS: usize = 12;

/// ID number field extractor.
///
/// The 12-digit national format (printed in groups of four) is tried
/// before a generic long digit run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdNumberExtractor;

impl IdNumberExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [PatternRule; 2] {
        [
            PatternRule::new("id_grouped", &ID_GROUPED, validate_national_id),
            PatternRule::new("id_generic", &ID_GENERIC, validate_generic_id),
        ]
    }
}

impl FieldExtractor for IdNumberExtractor {
    fn field(&self) -> FieldName {
        FieldName::IdNumber
    }

    fn extract(&self, text: &NormalizedText) -> Option<ExtractionMatch> {
        first_match(&Self::rules(), &text.flat)
    }
}

fn validate_national_id(candidate: &str) -> Option<String> {
    let digits = candidate.replace(' ', "");
    (digits.len() == ID_NUMBER_DIGITS && digits.chars().all(|c| c.is_ascii_digit()))
        .then_some(digits)
}

/// A long digit run that is not shaped like a mobile number.
fn validate_generic_id(candidate: &str) -> Option<String> {
    let digits = digits_only(candidate);
    (!validate_mobile(&digits)).then_some(digits)
}

/// Extract an ID number from normalized text.
pub fn extract_id_number(text: &NormalizedText) -> Option<String> {
    IdNumberExtractor::new().extract(text).map(|m| m.value)
}

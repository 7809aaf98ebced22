//! Mobile phone number extraction.

use super::patterns::{PHONE_BARE, PHONE_PREFIXED};
use super::{ExtractionMatch, FieldExtractor, PatternRule, digits_only, first_match};
use crate::document::NormalizedText;
use crate::models::FieldName;

/// Digit count of a national mobile number.
pub const MOBILE_DIGITS: usize = 10;

/// Phone number field extractor.
///
/// A number with an optional country-code prefix and internal spacing or
/// dashes is tried before a bare 10-digit run.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhoneExtractor;

impl PhoneExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [PatternRule; 2] {
        [
            PatternRule::new("phone_prefixed", &PHONE_PREFIXED, normalize_mobile),
            PatternRule::new("phone_bare", &PHONE_BARE, normalize_mobile),
        ]
    }
}

impl FieldExtractor for PhoneExtractor {
    fn field(&self) -> FieldName {
        FieldName::PhoneNumber
    }

    fn extract(&self, text: &NormalizedText) -> Option<ExtractionMatch> {
        first_match(&Self::rules(), &text.flat)
    }
}

/// Check the national mobile numbering rule: exactly 10 digits, the first
/// one between 6 and 9.
pub fn validate_mobile(digits: &str) -> bool {
    digits.len() == MOBILE_DIGITS
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.as_bytes()[0], b'6'..=b'9')
}

/// Strip separators and a `+91`, `91` or `0` prefix, then validate.
fn normalize_mobile(candidate: &str) -> Option<String> {
    let digits = digits_only(candidate);
    let digits = match digits.len() {
        12 if digits.starts_with("91") => digits[2..].to_string(),
        11 if digits.starts_with('0') => digits[1..].to_string(),
        _ => digits,
    };
    validate_mobile(&digits).then_some(digits)
}

/// Extract a mobile number from normalized text.
pub fn extract_phone_number(text: &NormalizedText) -> Option<String> {
    PhoneExtractor::new().extract(text).map(|m| m.value)
}

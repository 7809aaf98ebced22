//! Date of birth extraction.

use std::ops::RangeInclusive;

use super::patterns::{DOB_DASH, DOB_LABELED, DOB_SLASH, DOB_YEAR};
use super::{ExtractionMatch, FieldExtractor, PatternRule, first_match};
use crate::document::NormalizedText;
use crate::models::FieldName;

/// Plausible birth years for a document holder.
pub const BIRTH_YEAR_RANGE: RangeInclusive<u32> = 1900..=2010;

/// Date of birth field extractor.
///
/// Rules, in priority order: `DD/MM/YYYY`, `DD-MM-YYYY`, a labeled
/// `DOB:` date, then a bare four digit year.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateOfBirthExtractor;

impl DateOfBirthExtractor {
    pub fn new() -> Self {
        Self
    }

    fn rules() -> [PatternRule; 4] {
        [
            PatternRule::new("dob_slash", &DOB_SLASH, validate_delimited_date),
            PatternRule::new("dob_dash", &DOB_DASH, validate_delimited_date),
            PatternRule::new("dob_labeled", &DOB_LABELED, validate_delimited_date),
            PatternRule::new("dob_year", &DOB_YEAR, validate_bare_year),
        ]
    }
}

impl FieldExtractor for DateOfBirthExtractor {
    fn field(&self) -> FieldName {
        FieldName::DateOfBirth
    }

    fn extract(&self, text: &NormalizedText) -> Option<ExtractionMatch> {
        first_match(&Self::rules(), &text.flat)
    }
}

/// Check that a year string is a plausible birth year.
pub fn validate_birth_year(year: &str) -> bool {
    year.len() == 4
        && year
            .parse::<u32>()
            .is_ok_and(|y| BIRTH_YEAR_RANGE.contains(&y))
}

/// Accept `D/M/Y`-shaped text with exactly three numeric components and a
/// plausible year in last position. The matched text is kept as-is.
fn validate_delimited_date(candidate: &str) -> Option<String> {
    let parts: Vec<&str> = candidate.split(['/', '-', '.']).collect();
    if parts.len() != 3 {
        return None;
    }
    if parts
        .iter()
        .any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    validate_birth_year(parts[2]).then(|| candidate.to_string())
}

fn validate_bare_year(candidate: &str) -> Option<String> {
    validate_birth_year(candidate).then(|| candidate.to_string())
}

/// Extract a date of birth from normalized text.
pub fn extract_date_of_birth(text: &NormalizedText) -> Option<String> {
    DateOfBirthExtractor::new().extract(text).map(|m| m.value)
}

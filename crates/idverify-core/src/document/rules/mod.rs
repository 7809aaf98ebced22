//! Rule-based field extractors for ID documents.

pub mod denylist;
pub mod dob;
pub mod id_number;
pub mod name;
pub mod patterns;
pub mod phone;

pub use denylist::{Denylist, BOILERPLATE_PHRASES};
pub use dob::{DateOfBirthExtractor, extract_date_of_birth, validate_birth_year};
pub use id_number::{IdNumberExtractor, extract_id_number};
pub use name::{NameExtractor, extract_name};
pub use phone::{PhoneExtractor, extract_phone_number, validate_mobile};
pub use patterns::*;

use regex::Regex;

use super::NormalizedText;
use crate::models::FieldName;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The field this extractor fills.
    fn field(&self) -> FieldName;

    /// Extract the first acceptable candidate, or nothing.
    fn extract(&self, text: &NormalizedText) -> Option<ExtractionMatch>;
}

/// An accepted candidate and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch {
    /// Normalized value stored in the extracted record.
    pub value: String,
    /// Name of the rule that produced the value.
    pub rule: &'static str,
    /// Source text that was matched.
    pub source: String,
    /// Byte span in the searched text.
    pub position: Option<(usize, usize)>,
}

impl ExtractionMatch {
    pub fn new(value: impl Into<String>, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            rule,
            source: source.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

/// A matcher paired with the validator its hits must pass.
///
/// The validator returns the value to store, or `None` to reject the hit.
#[derive(Clone, Copy)]
pub struct PatternRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    pub validate: fn(&str) -> Option<String>,
}

impl PatternRule {
    pub fn new(
        name: &'static str,
        pattern: &'static Regex,
        validate: fn(&str) -> Option<String>,
    ) -> Self {
        Self {
            name,
            pattern,
            validate,
        }
    }
}

/// Run rules in order over `text` and return the first validated hit.
///
/// Every match of a rule is tried, in text order, before the next rule.
/// Capture group 1 is the candidate.
pub fn first_match(rules: &[PatternRule], text: &str) -> Option<ExtractionMatch> {
    for rule in rules {
        for caps in rule.pattern.captures_iter(text) {
            let Some(candidate) = caps.get(1) else {
                continue;
            };

            if let Some(value) = (rule.validate)(candidate.as_str()) {
                return Some(
                    ExtractionMatch::new(value, rule.name, candidate.as_str())
                        .with_position(candidate.start(), candidate.end()),
                );
            }
        }
    }
    None
}

/// Keep only ASCII digits.
pub(crate) fn digits_only(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit()).collect()
}

//! ID document field extraction module.

mod extractor;
mod normalize;
pub mod rules;

pub use extractor::{ExtractionResult, RuleExtractor};
pub use normalize::{NormalizedText, normalize};

use crate::models::ExtractedFields;

/// Trait for parsing raw OCR text into extracted fields.
pub trait DocumentParser {
    /// Normalize `raw` and extract fields from it. Never fails; missing
    /// fields are reported as warnings.
    fn parse(&self, raw: &str) -> ExtractionResult;
}

/// Extract fields with the built-in rules.
pub fn extract(text: &NormalizedText) -> ExtractedFields {
    RuleExtractor::new().extract(text)
}

/// Normalize raw OCR text and extract fields with the built-in rules.
pub fn extract_from_text(raw: &str) -> ExtractedFields {
    extract(&normalize(raw))
}

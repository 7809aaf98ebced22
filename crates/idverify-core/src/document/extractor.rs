//! Rule-based extractor combining the per-field rules.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{ExtractedFields, FieldName, IdVerifyConfig};

use super::normalize::{NormalizedText, normalize};
use super::rules::{
    DateOfBirthExtractor, Denylist, FieldExtractor, IdNumberExtractor, NameExtractor,
    PhoneExtractor,
};
use super::DocumentParser;

/// Result of parsing one document's OCR text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted fields.
    pub fields: ExtractedFields,
    /// Normalized text the fields were extracted from.
    pub normalized: NormalizedText,
    /// Rule that produced each present field, in field order.
    pub rules: Vec<(FieldName, String)>,
    /// Extraction warnings, one per missing field.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Extractor running the name, date of birth, ID number and phone rules.
#[derive(Debug, Clone, Default)]
pub struct RuleExtractor {
    name: NameExtractor,
    date_of_birth: DateOfBirthExtractor,
    id_number: IdNumberExtractor,
    phone_number: PhoneExtractor,
}

impl RuleExtractor {
    /// Create an extractor with the built-in denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom name denylist.
    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.name = NameExtractor::new().with_denylist(denylist);
        self
    }

    /// Built-in denylist extended with `extraction.extra_denylist`.
    pub fn from_config(config: &IdVerifyConfig) -> Self {
        let denylist = Denylist::new().with_phrases(&config.extraction.extra_denylist);
        Self::new().with_denylist(denylist)
    }

    fn extractors(&self) -> [&dyn FieldExtractor; 4] {
        [
            &self.name,
            &self.date_of_birth,
            &self.id_number,
            &self.phone_number,
        ]
    }

    /// Extract all four fields. Each field is evaluated independently.
    pub fn extract(&self, text: &NormalizedText) -> ExtractedFields {
        self.extract_with_rules(text).0
    }

    fn extract_with_rules(
        &self,
        text: &NormalizedText,
    ) -> (ExtractedFields, Vec<(FieldName, String)>) {
        let mut fields = ExtractedFields::default();
        let mut rules = Vec::new();

        for extractor in self.extractors() {
            let field = extractor.field();
            match extractor.extract(text) {
                Some(hit) => {
                    debug!(
                        "{} found by rule {} ({} chars)",
                        field,
                        hit.rule,
                        hit.value.chars().count()
                    );
                    rules.push((field, hit.rule.to_string()));
                    fields = fields.with(field, hit.value);
                }
                None => debug!("{} not found", field),
            }
        }

        (fields, rules)
    }
}

impl DocumentParser for RuleExtractor {
    fn parse(&self, raw: &str) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing document from {} characters of text", raw.len());

        let normalized = normalize(raw);
        let (fields, rules) = self.extract_with_rules(&normalized);

        let warnings: Vec<String> = fields
            .iter()
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| format!("Could not extract {}", field.label().to_lowercase()))
            .collect();

        debug!(
            "Extracted {}/{} fields from {} lines",
            fields.present_count(),
            FieldName::ALL.len(),
            normalized.lines.len()
        );

        ExtractionResult {
            fields,
            normalized,
            rules,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

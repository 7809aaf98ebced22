//! Holder name extraction.

use tracing::trace;

use super::patterns::{NAME_FLAT, NAME_LABELED, NAME_LINE, NAME_STRICT};
use super::{Denylist, ExtractionMatch, FieldExtractor};
use crate::document::NormalizedText;
use crate::models::FieldName;

/// Shortest accepted name or name line, in characters.
pub const NAME_MIN_LEN: usize = 4;
/// Longest accepted name or name line, in characters.
pub const NAME_MAX_LEN: usize = 40;

/// Name field extractor.
///
/// Lines are scanned first, in order. A line is a candidate only when it is
/// longer than two characters, free of boilerplate and digits, and within
/// the length window. The flattened text is the fallback.
#[derive(Debug, Clone, Default)]
pub struct NameExtractor {
    denylist: Denylist,
}

impl NameExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom denylist.
    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.denylist = denylist;
        self
    }

    fn accepts(&self, candidate: &str) -> bool {
        !self.denylist.matches(candidate) && NAME_STRICT.is_match(candidate)
    }

    fn from_lines(&self, lines: &[String]) -> Option<ExtractionMatch> {
        let line_rules = [("labeled_name", &*NAME_LABELED), ("name_line", &*NAME_LINE)];

        for (index, line) in lines.iter().enumerate() {
            let len = line.chars().count();
            if len <= 2 {
                continue;
            }
            if let Some(phrase) = self.denylist.find(line) {
                trace!("line {} skipped, boilerplate '{}'", index, phrase);
                continue;
            }
            if line.chars().any(|c| c.is_ascii_digit()) {
                continue;
            }
            if !in_window(len) {
                continue;
            }

            for (rule, pattern) in line_rules {
                let Some(candidate) = pattern.captures(line).and_then(|caps| caps.get(1)) else {
                    continue;
                };
                if self.accepts(candidate.as_str()) {
                    return Some(ExtractionMatch::new(candidate.as_str(), rule, line.as_str()));
                }
            }
        }
        None
    }

    fn from_flat(&self, flat: &str) -> Option<ExtractionMatch> {
        let candidate = NAME_FLAT
            .find_iter(flat)
            .find(|m| !self.denylist.matches(m.as_str()))?;

        if !in_window(candidate.as_str().chars().count()) {
            trace!("flat name candidate outside length window");
            return None;
        }

        Some(
            ExtractionMatch::new(candidate.as_str(), "flat_name", candidate.as_str())
                .with_position(candidate.start(), candidate.end()),
        )
    }
}

fn in_window(len: usize) -> bool {
    (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len)
}

impl FieldExtractor for NameExtractor {
    fn field(&self) -> FieldName {
        FieldName::Name
    }

    fn extract(&self, text: &NormalizedText) -> Option<ExtractionMatch> {
        self.from_lines(&text.lines)
            .or_else(|| self.from_flat(&text.flat))
    }
}

/// Extract a holder name from normalized text.
pub fn extract_name(text: &NormalizedText) -> Option<String> {
    NameExtractor::new().extract(text).map(|m| m.value)
}

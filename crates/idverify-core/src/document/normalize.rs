//! OCR text cleanup.
//!
//! One pass produces both views the extractor needs: the ordered list of
//! non-empty lines and the flattened single-line text.

use serde::{Deserialize, Serialize};

/// Normalized OCR text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedText {
    /// Non-empty, trimmed, whitespace-collapsed lines in reading order.
    pub lines: Vec<String>,
    /// All lines joined with a single space.
    pub flat: String,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Replacements applied everywhere.
const CHARACTER_CORRECTIONS: &[(char, char)] = &[
    ('|', 'I'),
    ('¦', 'I'),
    ('\u{2018}', '\''),
    ('\u{2019}', '\''),
    ('\u{201C}', '"'),
    ('\u{201D}', '"'),
    ('\u{2013}', '-'),
    ('\u{2014}', '-'),
    ('\u{2212}', '-'),
    ('\u{00A0}', ' '),
];

/// Letter/digit look-alikes, replaced only when touching a digit.
///
/// Lossy when a letter legitimately sits next to a digit.
const DIGIT_CONTEXT_CORRECTIONS: &[(char, char)] = &[
    ('O', '0'),
    ('o', '0'),
    ('I', '1'),
    ('l', '1'),
    ('|', '1'),
];

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{000C}' | '\u{2028}' | '\u{2029}')
}

fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}')
        || (c.is_control() && !c.is_whitespace())
}

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

/// Apply the correction tables to one line.
///
/// Digit context is judged on the original neighbours, so a run like
/// `1O0` becomes `100` regardless of replacement order.
fn correct_line(line: &str) -> String {
    let chars: Vec<char> = line.chars().filter(|c| !is_invisible(*c)).collect();
    let mut out = String::with_capacity(line.len());

    for (i, &c) in chars.iter().enumerate() {
        let touches_digit = (i > 0 && chars[i - 1].is_ascii_digit())
            || chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());

        let fixed = touches_digit
            .then(|| lookup(DIGIT_CONTEXT_CORRECTIONS, c))
            .flatten()
            .or_else(|| lookup(CHARACTER_CORRECTIONS, c))
            .unwrap_or(c);
        out.push(fixed);
    }
    out
}

/// Normalize raw OCR output.
pub fn normalize(raw: &str) -> NormalizedText {
    let lines: Vec<String> = raw
        .split(is_line_break)
        .map(|line| {
            correct_line(line)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect();

    let flat = lines.join(" ");
    NormalizedText { lines, flat }
}

//! Regex patterns for ID document field extraction.
//!
//! Patterns are grouped per field and listed in the order they are tried.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Name patterns (run per line, lines are whitespace-collapsed)
    pub static ref NAME_LABELED: Regex = Regex::new(
        r"^(?i:name|naam)\s*[:\-]?\s*([A-Z][a-z]+(?:\s[A-Z][a-z]+){1,3})$"
    ).unwrap();

    pub static ref NAME_LINE: Regex = Regex::new(
        r"^([A-Z][a-z]+(?:\s[A-Z][a-z]+){1,3})$"
    ).unwrap();

    /// Strict proper-case validator applied to every name candidate.
    pub static ref NAME_STRICT: Regex = Regex::new(
        r"^[A-Z][a-z]+(?: [A-Z][a-z]+){1,3}$"
    ).unwrap();

    /// Fallback over the flattened text: 2 to 3 proper-case words.
    pub static ref NAME_FLAT: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+){1,2}\b"
    ).unwrap();

    // Date of birth patterns
    pub static ref DOB_SLASH: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    pub static ref DOB_DASH: Regex = Regex::new(
        r"\b(\d{1,2}-\d{1,2}-\d{4})\b"
    ).unwrap();

    pub static ref DOB_LABELED: Regex = Regex::new(
        r"(?i)\b(?:DOB|D\.O\.B\.?|Date\s+of\s+Birth)\s*[:\-]?\s*(\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4})\b"
    ).unwrap();

    pub static ref DOB_YEAR: Regex = Regex::new(
        r"\b(\d{4})\b"
    ).unwrap();

    // ID number patterns
    // Not directly after a date delimiter, so a birth year is never the
    // first group.
    pub static ref ID_GROUPED: Regex = Regex::new(
        r"(?:^|[^\d/.\-])(\d{4} ?\d{4} ?\d{4})\b"
    ).unwrap();

    pub static ref ID_GENERIC: Regex = Regex::new(
        r"\b(\d{8,16})\b"
    ).unwrap();

    // Phone number patterns
    // A bare 91 prefix needs a separator and an unbroken 10 or 5-5 block,
    // so the head of a 4-4-4 ID group is never read as a country code.
    pub static ref PHONE_PREFIXED: Regex = Regex::new(
        r"(\+91[\s\-]?\d(?:[\s\-]?\d){9}|\b91[\s\-](?:\d{10}|\d{5}[\s\-]\d{5})|\b0\d{10}|\b\d(?:[\s\-]?\d){9})\b"
    ).unwrap();

    pub static ref PHONE_BARE: Regex = Regex::new(
        r"\b([6-9]\d{9})\b"
    ).unwrap();
}

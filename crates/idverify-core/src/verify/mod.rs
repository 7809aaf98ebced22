//! Comparison of extracted against entered values.

mod compare;
mod verdict;

pub use compare::{compare, compare_all};
pub use verdict::{PASS_THRESHOLD, Verdict, aggregate};

use tracing::debug;

use crate::models::{EnteredFields, ExtractedFields};

/// Compare all fields and aggregate the result.
pub fn verify(extracted: &ExtractedFields, entered: &EnteredFields) -> Verdict {
    let verdict = aggregate(compare_all(extracted, entered));
    debug!(
        "Verdict: {}/4 fields matched, overall {}",
        verdict.matched(),
        if verdict.overall() { "pass" } else { "fail" }
    );
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::extract_from_text;
    use crate::models::FieldName;

    #[test]
    fn test_spaced_id_number_matches_compact_entry() {
        let extracted = extract_from_text("Aadhaar\n1234 1234 1234");
        assert_eq!(extracted.id_number(), Some("123412341234"));

        let mut entered = EnteredFields::new();
        entered.set(FieldName::IdNumber, "123412341234");
        assert!(verify(&extracted, &entered).field(FieldName::IdNumber));
    }

    #[test]
    fn test_two_matches_with_phone_absent_fails() {
        let extracted = ExtractedFields::default()
            .with(FieldName::Name, "Ravi Kumar")
            .with(FieldName::DateOfBirth, "01/02/1990")
            .with(FieldName::IdNumber, "123412341234");

        let entered = EnteredFields {
            name: "Ravi Kumar".to_string(),
            date_of_birth: "01/02/1990".to_string(),
            id_number: "999999999999".to_string(),
            phone_number: "9876543210".to_string(),
        };

        let verdict = verify(&extracted, &entered);
        assert!(!verdict.field(FieldName::PhoneNumber));
        assert_eq!(verdict.matched(), 2);
        assert!(!verdict.overall());
    }

    #[test]
    fn test_full_document_passes() {
        let extracted = extract_from_text(
            "GOVERNMENT OF INDIA\nRavi Kumar\nDOB: 15/08/1987\n1234 5678 9012\nMobile 9876543210",
        );
        let entered = EnteredFields {
            name: "ravi kumar sharma".to_string(),
            date_of_birth: "15-08-1987".to_string(),
            id_number: "1234-5678-9012".to_string(),
            phone_number: "+91 98765 43210".to_string(),
        };

        let verdict = verify(&extracted, &entered);
        assert_eq!(verdict.matched(), 4);
        assert!(verdict.overall());
    }
}

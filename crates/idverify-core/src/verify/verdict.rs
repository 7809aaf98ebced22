//! Threshold-based overall verdict.

use serde::{Deserialize, Serialize};

use crate::models::{FieldName, FieldVerdicts};

/// Minimum number of matching fields for an overall pass.
pub const PASS_THRESHOLD: usize = 3;

/// Per-field flags together with the derived overall outcome.
///
/// Only built through [`aggregate`], so `matched` and `overall` always agree
/// with the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    flags: FieldVerdicts,
    matched: usize,
    overall: bool,
}

impl Verdict {
    pub fn flags(&self) -> FieldVerdicts {
        self.flags
    }

    pub fn field(&self, field: FieldName) -> bool {
        self.flags.get(field)
    }

    /// Number of matching fields.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// True when at least [`PASS_THRESHOLD`] fields match.
    pub fn overall(&self) -> bool {
        self.overall
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            flags: FieldVerdicts,
        }

        // Derived values are recomputed rather than trusted.
        Repr::deserialize(deserializer).map(|r| aggregate(r.flags))
    }
}

/// Derive the overall verdict from per-field flags.
pub fn aggregate(flags: FieldVerdicts) -> Verdict {
    let matched = flags.matched_count();
    Verdict {
        flags,
        matched,
        overall: matched >= PASS_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flags_with(count: usize) -> FieldVerdicts {
        let mut n = 0;
        FieldVerdicts::from_fn(|_| {
            n += 1;
            n <= count
        })
    }

    #[test]
    fn test_threshold() {
        for count in 0..=4 {
            let verdict = aggregate(flags_with(count));
            assert_eq!(verdict.matched(), count);
            assert_eq!(verdict.overall(), count >= 3, "count {}", count);
        }
    }

    #[test]
    fn test_every_three_field_combination_passes() {
        for missing in FieldName::ALL {
            let verdict = aggregate(FieldVerdicts::from_fn(|f| f != missing));
            assert!(verdict.overall());
            assert!(!verdict.field(missing));
        }
    }

    #[test]
    fn test_json_shape() {
        let verdict = aggregate(FieldVerdicts::from_fn(|f| f != FieldName::PhoneNumber));
        let json = serde_json::to_value(verdict).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "flags": {
                    "name": true,
                    "dateOfBirth": true,
                    "idNumber": true,
                    "phoneNumber": false
                },
                "matched": 3,
                "overall": true
            })
        );
    }

    #[test]
    fn test_deserialize_recomputes_overall() {
        let verdict: Verdict = serde_json::from_str(
            r#"{"flags":{"name":true,"dateOfBirth":false,"idNumber":false,"phoneNumber":false},"matched":4,"overall":true}"#,
        )
        .unwrap();
        assert_eq!(verdict.matched(), 1);
        assert!(!verdict.overall());
    }
}

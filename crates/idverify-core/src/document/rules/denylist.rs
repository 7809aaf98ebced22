//! Boilerplate phrases that can never be a holder's name.

/// Built-in phrases printed on ID documents: issuing authorities,
/// document-type labels, field labels and gender words.
pub const BOILERPLATE_PHRASES: &[&str] = &[
    // Issuing authorities
    "government of india",
    "govt of india",
    "govt. of india",
    "republic of india",
    "union of india",
    "unique identification authority",
    "identification authority of india",
    "uidai",
    "election commission",
    "income tax department",
    "transport department",
    // Document types
    "aadhaar",
    "aadhar",
    "mera aadhaar",
    "meri pehchaan",
    "permanent account number",
    "driving licence",
    "driving license",
    "identity card",
    "voter id",
    "virtual id",
    "enrolment",
    "enrollment",
    // Field labels
    "date of birth",
    "year of birth",
    "dob:",
    "father",
    "husband",
    "address",
    "signature",
    "issue date",
    "valid till",
    "download date",
    // Gender
    "female",
    "transgender",
    // Common stray words
    "government",
    "authority",
    "helpline",
    "www",
];

/// Case-insensitive substring phrase matcher.
///
/// OCR often merges neighbouring words, so phrases match anywhere in the
/// text ("Aadhaarcard" contains "aadhaar"). Entries short enough to sit
/// inside a real name ("vid" in "David", "male" in "Kamalesh") are left out
/// of the built-in list.
#[derive(Debug, Clone)]
pub struct Denylist {
    phrases: Vec<String>,
}

impl Denylist {
    /// Built-in phrase list.
    pub fn new() -> Self {
        Self::from_phrases(BOILERPLATE_PHRASES.iter().copied())
    }

    /// A list holding only the given phrases.
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self { phrases: Vec::new() };
        list.extend(phrases);
        list
    }

    /// Add phrases; blank entries are ignored.
    pub fn extend<I, S>(&mut self, phrases: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for phrase in phrases {
            let phrase = collapse(&phrase.as_ref().to_lowercase());
            if !phrase.is_empty() && !self.phrases.contains(&phrase) {
                self.phrases.push(phrase);
            }
        }
    }

    /// Builder form of [`Denylist::extend`].
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extend(phrases);
        self
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// The first phrase contained in `text`, if any.
    pub fn find(&self, text: &str) -> Option<&str> {
        let haystack = collapse(&text.to_lowercase());
        self.phrases
            .iter()
            .find(|phrase| haystack.contains(phrase.as_str()))
            .map(|s| s.as_str())
    }

    /// True when `text` contains any phrase.
    pub fn matches(&self, text: &str) -> bool {
        self.find(text).is_some()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::new()
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_phrases_match_case_insensitively() {
        let denylist = Denylist::new();
        assert!(denylist.matches("GOVERNMENT OF INDIA"));
        assert!(denylist.matches("Unique Identification Authority of India"));
        assert!(denylist.matches("Female"));
        assert!(denylist.matches("DOB: 15/08/1987"));
        assert_eq!(denylist.find("Government  of   India"), Some("government of india"));
    }

    #[test]
    fn test_merged_words_still_match() {
        let denylist = Denylist::new();
        assert_eq!(denylist.find("Aadhaarcard Details"), Some("aadhaar"));
        assert_eq!(denylist.find("Governmentof Maharashtra"), Some("government"));
        assert!(denylist.matches("GOVERNMENTOFINDIA"));
    }

    #[test]
    fn test_builtin_phrases_spare_real_names() {
        let denylist = Denylist::new();
        for name in ["Kamalesh Rao", "David Dsouza", "Ricardo Pinto", "Ravi Kumar", "Vidya Balan"] {
            assert!(!denylist.matches(name), "{name}");
        }
    }

    #[test]
    fn test_extra_phrases() {
        let denylist = Denylist::new().with_phrases(["Specimen Copy", "  ", "specimen copy"]);
        assert_eq!(denylist.len(), BOILERPLATE_PHRASES.len() + 1);
        assert!(denylist.matches("SPECIMEN COPY"));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let denylist = Denylist::from_phrases(Vec::<String>::new());
        assert!(denylist.is_empty());
        assert!(!denylist.matches("Government of India"));
    }
}

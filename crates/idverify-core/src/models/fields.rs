//! Field records for ID document verification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fields compared during verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    /// Holder's full name.
    Name,
    /// Date of birth (or year of birth).
    DateOfBirth,
    /// 12-digit national ID number.
    IdNumber,
    /// 10-digit mobile number.
    PhoneNumber,
}

impl FieldName {
    /// All fields in their fixed evaluation order.
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::DateOfBirth,
        FieldName::IdNumber,
        FieldName::PhoneNumber,
    ];

    /// Key used in JSON and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::IdNumber => "idNumber",
            FieldName::PhoneNumber => "phoneNumber",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::DateOfBirth => "Date of birth",
            FieldName::IdNumber => "ID number",
            FieldName::PhoneNumber => "Phone number",
        }
    }

    /// Parse a field key, accepting camelCase, snake_case and short aliases.
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        match key.as_str() {
            "name" | "fullname" => Some(FieldName::Name),
            "dateofbirth" | "dob" | "birthdate" => Some(FieldName::DateOfBirth),
            "idnumber" | "id" | "idno" => Some(FieldName::IdNumber),
            "phonenumber" | "phone" | "mobile" => Some(FieldName::PhoneNumber),
            _ => None,
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Candidate values extracted from one document's OCR text.
///
/// Every field is independently present or absent. A present field is never
/// an empty string. The record is immutable once built; a new document
/// produces a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "ExtractedFieldsRepr")]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date_of_birth: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    id_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ExtractedFieldsRepr {
    name: Option<String>,
    date_of_birth: Option<String>,
    id_number: Option<String>,
    phone_number: Option<String>,
}

impl From<ExtractedFieldsRepr> for ExtractedFields {
    fn from(repr: ExtractedFieldsRepr) -> Self {
        Self::new(repr.name, repr.date_of_birth, repr.id_number, repr.phone_number)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ExtractedFields {
    /// Build a record; empty strings are stored as absent.
    pub fn new(
        name: Option<String>,
        date_of_birth: Option<String>,
        id_number: Option<String>,
        phone_number: Option<String>,
    ) -> Self {
        Self {
            name: non_empty(name),
            date_of_birth: non_empty(date_of_birth),
            id_number: non_empty(id_number),
            phone_number: non_empty(phone_number),
        }
    }

    /// Return a copy with one field set.
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        let value = non_empty(Some(value.into()));
        match field {
            FieldName::Name => self.name = value,
            FieldName::DateOfBirth => self.date_of_birth = value,
            FieldName::IdNumber => self.id_number = value,
            FieldName::PhoneNumber => self.phone_number = value,
        }
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn date_of_birth(&self) -> Option<&str> {
        self.date_of_birth.as_deref()
    }

    pub fn id_number(&self) -> Option<&str> {
        self.id_number.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone_number.as_deref()
    }

    /// Look up a field by name.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        match field {
            FieldName::Name => self.name(),
            FieldName::DateOfBirth => self.date_of_birth(),
            FieldName::IdNumber => self.id_number(),
            FieldName::PhoneNumber => self.phone_number(),
        }
    }

    /// Iterate over all fields in fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, Option<&str>)> + '_ {
        FieldName::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Number of fields that were found.
    pub fn present_count(&self) -> usize {
        self.iter().filter(|(_, v)| v.is_some()).count()
    }

    /// True when no field was found at all.
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }
}

/// Values typed in by the user. Always strings, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnteredFields {
    pub name: String,
    pub date_of_birth: String,
    pub id_number: String,
    pub phone_number: String,
}

impl EnteredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a field by name.
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::DateOfBirth => &self.date_of_birth,
            FieldName::IdNumber => &self.id_number,
            FieldName::PhoneNumber => &self.phone_number,
        }
    }

    /// Replace one field's value.
    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldName::Name => self.name = value,
            FieldName::DateOfBirth => self.date_of_birth = value,
            FieldName::IdNumber => self.id_number = value,
            FieldName::PhoneNumber => self.phone_number = value,
        }
    }

    /// True when every field is blank.
    pub fn is_blank(&self) -> bool {
        FieldName::ALL.iter().all(|f| self.get(*f).trim().is_empty())
    }
}

/// Per-field match flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldVerdicts {
    pub name: bool,
    pub date_of_birth: bool,
    pub id_number: bool,
    pub phone_number: bool,
}

impl FieldVerdicts {
    /// Build flags by evaluating `f` for every field in fixed order.
    pub fn from_fn(mut f: impl FnMut(FieldName) -> bool) -> Self {
        Self {
            name: f(FieldName::Name),
            date_of_birth: f(FieldName::DateOfBirth),
            id_number: f(FieldName::IdNumber),
            phone_number: f(FieldName::PhoneNumber),
        }
    }

    pub fn get(&self, field: FieldName) -> bool {
        match field {
            FieldName::Name => self.name,
            FieldName::DateOfBirth => self.date_of_birth,
            FieldName::IdNumber => self.id_number,
            FieldName::PhoneNumber => self.phone_number,
        }
    }

    /// Number of fields that matched.
    pub fn matched_count(&self) -> usize {
        FieldName::ALL.iter().filter(|f| self.get(**f)).count()
    }
}

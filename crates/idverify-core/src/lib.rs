//! Core library for ID document verification.
//!
//! This crate provides:
//! - OCR text normalization
//! - Rule-based extraction of name, date of birth, ID number and phone number
//! - Fuzzy comparison against user-entered values and a threshold verdict
//! - Upload checks and a step-by-step verification workflow
//! - A pure Rust OCR backend (`native` feature)

pub mod document;
pub mod error;
pub mod models;
pub mod ocr;
pub mod upload;
pub mod verify;
pub mod workflow;

pub use document::{
    DocumentParser, ExtractionResult, NormalizedText, RuleExtractor, extract, extract_from_text,
    normalize,
};
pub use error::{IdVerifyError, Result};
pub use models::{EnteredFields, ExtractedFields, FieldName, FieldVerdicts, IdVerifyConfig};
pub use ocr::{ProgressTracker, TextRecognizer};
#[cfg(feature = "native")]
pub use ocr::PureOcrRecognizer;
pub use upload::UploadGuard;
pub use verify::{PASS_THRESHOLD, Verdict, aggregate, compare, compare_all, verify};
pub use workflow::{Step, Workflow};

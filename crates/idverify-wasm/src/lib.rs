//! WASM bindings for ID document verification.
//!
//! The browser runs OCR itself and hands the recognized text (or text
//! regions) to these bindings.

use std::fmt::Display;

use wasm_bindgen::prelude::*;

use idverify_core::models::{EnteredFields, ExtractedFields, FieldName, IdVerifyConfig};
use idverify_core::ocr::{TextBox, reading_order_text};
use idverify_core::upload::UploadGuard;
use idverify_core::{Step, Workflow};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(js_error)
}

fn parse_field(field: &str) -> Result<FieldName, JsValue> {
    FieldName::from_str(field).ok_or_else(|| js_error(format!("unknown field: {}", field)))
}

fn parse_config(config: JsValue) -> Result<IdVerifyConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        Ok(IdVerifyConfig::default())
    } else {
        serde_wasm_bindgen::from_value(config).map_err(js_error)
    }
}

/// Extract fields from OCR text.
///
/// Returns an object with the fields that were found; missing fields are
/// left out.
#[wasm_bindgen]
pub fn extract_fields(text: &str) -> Result<JsValue, JsValue> {
    to_js(&idverify_core::extract_from_text(text))
}

/// Compare one extracted value against what the user entered.
#[wasm_bindgen]
pub fn compare_field(
    field: &str,
    extracted: Option<String>,
    entered: &str,
) -> Result<bool, JsValue> {
    let field = parse_field(field)?;
    Ok(idverify_core::compare(field, extracted.as_deref(), entered))
}

/// Compare extracted against entered fields and aggregate the verdict.
#[wasm_bindgen]
pub fn verify(extracted: JsValue, entered: JsValue) -> Result<JsValue, JsValue> {
    let extracted: ExtractedFields = serde_wasm_bindgen::from_value(extracted).map_err(js_error)?;
    let entered: EnteredFields = serde_wasm_bindgen::from_value(entered).map_err(js_error)?;
    to_js(&idverify_core::verify(&extracted, &entered))
}

/// Check a picked file's size and media type before it is read.
#[wasm_bindgen]
pub fn check_upload(size: usize, media_type: &str) -> Result<(), JsValue> {
    let guard = UploadGuard::default();
    guard.check_size(size).map_err(js_error)?;
    guard.check_media_type(media_type).map_err(js_error)
}

/// Text regions recognized in the browser.
#[wasm_bindgen]
pub struct RecognizedText {
    boxes: Vec<TextBox>,
}

#[wasm_bindgen]
impl RecognizedText {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Add a recognized region by its axis-aligned rectangle.
    #[wasm_bindgen]
    pub fn add_region(&mut self, text: &str, x0: f32, y0: f32, x1: f32, y1: f32, confidence: f32) {
        self.boxes.push(TextBox {
            bbox: [x0, y0, x1, y0, x1, y1, x0, y1],
            text: text.to_string(),
            confidence,
        });
    }

    /// Number of regions added so far.
    #[wasm_bindgen]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[wasm_bindgen]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Region text in reading order, one region per line.
    #[wasm_bindgen]
    pub fn text(&self) -> String {
        let mut boxes = self.boxes.clone();
        reading_order_text(&mut boxes)
    }
}

impl Default for RecognizedText {
    fn default() -> Self {
        Self::new()
    }
}

/// One verification session: upload, form, result.
#[wasm_bindgen]
pub struct VerificationSession {
    workflow: Workflow,
    guard: UploadGuard,
}

#[wasm_bindgen]
impl VerificationSession {
    /// Create a session. `config` is an optional configuration object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VerificationSession, JsValue> {
        let config = parse_config(config)?;
        Ok(Self {
            workflow: Workflow::new(&config),
            guard: UploadGuard::new(config.upload.clone()),
        })
    }

    /// Current step: `"upload"`, `"form"` or `"result"`.
    #[wasm_bindgen(getter)]
    pub fn step(&self) -> String {
        self.workflow.step().to_string()
    }

    /// Check the bytes of a picked file and return the sniffed media type.
    #[wasm_bindgen]
    pub fn check_upload(&self, bytes: &[u8], media_type: &str) -> Result<String, JsValue> {
        let format = self.guard.check(bytes, Some(media_type)).map_err(js_error)?;
        Ok(format.to_mime_type().to_string())
    }

    /// Extract fields from recognized text and move to the form step.
    #[wasm_bindgen]
    pub fn submit_text(&mut self, text: &str) -> Result<JsValue, JsValue> {
        let extracted = self.workflow.submit_text(text).map_err(js_error)?;
        to_js(extracted)
    }

    /// Like `submit_text`, with the text assembled from regions.
    #[wasm_bindgen]
    pub fn submit_regions(&mut self, regions: &RecognizedText) -> Result<JsValue, JsValue> {
        self.submit_text(&regions.text())
    }

    /// Extracted fields, or `undefined` before a document was accepted.
    #[wasm_bindgen]
    pub fn extracted(&self) -> Result<JsValue, JsValue> {
        match self.workflow.extracted() {
            Some(extracted) => to_js(extracted),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Record one user-entered value.
    #[wasm_bindgen]
    pub fn set_entered(&mut self, field: &str, value: &str) -> Result<(), JsValue> {
        let field = parse_field(field)?;
        self.workflow.entered_mut().set(field, value);
        Ok(())
    }

    /// The user's values so far.
    #[wasm_bindgen]
    pub fn entered(&self) -> Result<JsValue, JsValue> {
        to_js(self.workflow.entered())
    }

    /// Compute a fresh verdict and move to the result step.
    #[wasm_bindgen]
    pub fn verify(&mut self) -> Result<JsValue, JsValue> {
        let verdict = self.workflow.verify().map_err(js_error)?;
        to_js(verdict)
    }

    /// True once a verdict exists and passed.
    #[wasm_bindgen]
    pub fn passed(&self) -> bool {
        self.workflow.step() == Step::Result
            && self.workflow.verdict().is_some_and(|v| v.overall())
    }

    /// Start over.
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        self.workflow.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const CARD_TEXT: &str = "GOVERNMENT OF INDIA\nRavi Kumar\nDOB: 15/08/1987\n1234 1234 1234";

    #[wasm_bindgen_test]
    fn test_compare_field() {
        assert!(compare_field("name", Some("Ravi Kumar".into()), "ravi kumar sharma").unwrap());
        assert!(compare_field("phone", Some("9876543210".into()), "+919876543210").unwrap());
        assert!(!compare_field("dob", None, "01/02/1990").unwrap());
        assert!(compare_field("address", None, "").is_err());
    }

    #[wasm_bindgen_test]
    fn test_check_upload() {
        assert!(check_upload(1024, "image/png").is_ok());
        assert!(check_upload(0, "image/png").is_err());
        assert!(check_upload(11 * 1024 * 1024, "image/png").is_err());
        assert!(check_upload(1024, "application/pdf").is_err());
    }

    #[wasm_bindgen_test]
    fn test_recognized_text_order() {
        let mut regions = RecognizedText::new();
        regions.add_region("Ravi Kumar", 10.0, 40.0, 120.0, 52.0, 0.9);
        regions.add_region("GOVERNMENT OF INDIA", 10.0, 2.0, 200.0, 14.0, 0.9);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions.text(), "GOVERNMENT OF INDIA\nRavi Kumar");
    }

    #[wasm_bindgen_test]
    fn test_session_flow() {
        let mut session = VerificationSession::new(JsValue::UNDEFINED).unwrap();
        assert_eq!(session.step(), "upload");
        assert!(session.verify().is_err());

        assert!(session.submit_text("GOVERNMENT OF INDIA").is_err());
        assert_eq!(session.step(), "upload");

        session.submit_text(CARD_TEXT).unwrap();
        assert_eq!(session.step(), "form");

        session.set_entered("name", "Ravi Kumar").unwrap();
        session.set_entered("dateOfBirth", "15/08/1987").unwrap();
        session.set_entered("idNumber", "1234 1234 1234").unwrap();
        assert!(session.set_entered("address", "x").is_err());

        session.verify().unwrap();
        assert_eq!(session.step(), "result");
        assert!(session.passed());

        session.reset();
        assert_eq!(session.step(), "upload");
        assert!(!session.passed());
    }
}

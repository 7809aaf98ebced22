//! Verification workflow: upload, form entry, result.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::{DocumentParser, RuleExtractor};
use crate::error::{ExtractionError, IdVerifyError, Result, WorkflowError};
use crate::models::{EnteredFields, ExtractedFields, IdVerifyConfig};
use crate::ocr::TextRecognizer;
use crate::upload::UploadGuard;
use crate::verify::{Verdict, verify};

/// Step the workflow is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    /// Waiting for a document.
    Upload,
    /// Fields extracted; waiting for the user's values.
    Form,
    /// A verdict has been computed.
    Result,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Step::Upload => "upload",
            Step::Form => "form",
            Step::Result => "result",
        })
    }
}

/// State of one verification session.
///
/// Extracted fields are replaced, never edited, by each new document.
/// A new document discards entered values and the verdict.
pub struct Workflow {
    guard: UploadGuard,
    extractor: RuleExtractor,
    language: String,
    step: Step,
    extracted: Option<ExtractedFields>,
    entered: EnteredFields,
    verdict: Option<Verdict>,
}

impl Workflow {
    pub fn new(config: &IdVerifyConfig) -> Self {
        Self {
            guard: UploadGuard::new(config.upload.clone()),
            extractor: RuleExtractor::from_config(config),
            language: config.ocr.language.clone(),
            step: Step::Upload,
            extracted: None,
            entered: EnteredFields::new(),
            verdict: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn extracted(&self) -> Option<&ExtractedFields> {
        self.extracted.as_ref()
    }

    pub fn entered(&self) -> &EnteredFields {
        &self.entered
    }

    /// Mutable access to the user's values.
    pub fn entered_mut(&mut self) -> &mut EnteredFields {
        &mut self.entered
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Check, recognize and extract an uploaded document.
    ///
    /// On any failure the workflow is left on the upload step with no
    /// extracted fields.
    pub fn submit_document(
        &mut self,
        bytes: &[u8],
        media_type: Option<&str>,
        recognizer: &dyn TextRecognizer,
        progress: &mut dyn FnMut(f32),
    ) -> Result<&ExtractedFields> {
        self.discard();
        self.guard.check(bytes, media_type)?;

        let raw = recognizer
            .recognize(bytes, &self.language, progress)
            .inspect_err(|e| warn!("Recognition failed: {}", e))?;

        self.submit_text(&raw)
    }

    /// Extract fields from text a host has already recognized.
    pub fn submit_text(&mut self, raw: &str) -> Result<&ExtractedFields> {
        self.discard();

        let result = self.extractor.parse(raw);
        if result.fields.is_empty() {
            warn!("No fields found in {} lines of text", result.normalized.lines.len());
            return Err(ExtractionError::NoData.into());
        }

        info!(
            "Extracted {} fields in {}ms",
            result.fields.present_count(),
            result.processing_time_ms
        );

        self.step = Step::Form;
        Ok(self.extracted.insert(result.fields))
    }

    /// Compare entered values against the extracted ones.
    ///
    /// Each call replaces the previous verdict.
    pub fn verify(&mut self) -> Result<&Verdict> {
        let Some(extracted) = self.extracted.as_ref() else {
            return Err(IdVerifyError::Workflow(WorkflowError::NotReady {
                step: self.step.to_string(),
            }));
        };

        let verdict = verify(extracted, &self.entered);
        self.step = Step::Result;
        Ok(self.verdict.insert(verdict))
    }

    /// Return to the upload step with nothing extracted or entered.
    pub fn reset(&mut self) {
        self.discard();
    }

    fn discard(&mut self) {
        self.step = Step::Upload;
        self.extracted = None;
        self.entered = EnteredFields::new();
        self.verdict = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RecognitionError, UploadError};
    use crate::models::FieldName;
    use pretty_assertions::assert_eq;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

    struct FixedText(&'static str);

    impl TextRecognizer for FixedText {
        fn recognize(
            &self,
            _image: &[u8],
            _language: &str,
            progress: &mut dyn FnMut(f32),
        ) -> std::result::Result<String, RecognitionError> {
            progress(0.5);
            progress(1.0);
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl TextRecognizer for Broken {
        fn recognize(
            &self,
            _image: &[u8],
            _language: &str,
            _progress: &mut dyn FnMut(f32),
        ) -> std::result::Result<String, RecognitionError> {
            Err(RecognitionError::Engine("model crashed".to_string()))
        }
    }

    fn workflow() -> Workflow {
        Workflow::new(&IdVerifyConfig::default())
    }

    #[test]
    fn test_happy_path() {
        let mut flow = workflow();
        let mut seen = Vec::new();
        let recognizer = FixedText("Ravi Kumar\nDOB: 01/02/1990\n1234 1234 1234\n9876543210");

        let extracted = flow
            .submit_document(PNG_MAGIC, Some("image/png"), &recognizer, &mut |p: f32| seen.push(p))
            .unwrap();
        assert_eq!(extracted.present_count(), 4);
        assert_eq!(flow.step(), Step::Form);
        assert_eq!(seen, vec![0.5, 1.0]);

        let entered = flow.entered_mut();
        entered.set(FieldName::Name, "Ravi Kumar");
        entered.set(FieldName::DateOfBirth, "01/02/1990");
        entered.set(FieldName::IdNumber, "123412341234");

        let verdict = flow.verify().unwrap();
        assert_eq!(verdict.matched(), 3);
        assert!(verdict.overall());
        assert_eq!(flow.step(), Step::Result);
    }

    #[test]
    fn test_boilerplate_only_document_reports_no_data() {
        let mut flow = workflow();
        let err = flow
            .submit_text("GOVERNMENT OF INDIA\nUnique Identification Authority of India")
            .unwrap_err();

        assert!(matches!(err, IdVerifyError::Extraction(ExtractionError::NoData)));
        assert_eq!(flow.step(), Step::Upload);
        assert!(flow.extracted().is_none());
    }

    #[test]
    fn test_rejected_upload_never_reaches_ocr() {
        let mut flow = workflow();
        let err = flow
            .submit_document(PNG_MAGIC, Some("application/pdf"), &Broken, &mut |_: f32| {})
            .unwrap_err();
        assert!(matches!(
            err,
            IdVerifyError::Upload(UploadError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_recognition_failure() {
        let mut flow = workflow();
        let err = flow
            .submit_document(PNG_MAGIC, Some("image/png"), &Broken, &mut |_: f32| {})
            .unwrap_err();
        assert!(matches!(err, IdVerifyError::Recognition(_)));
        assert_eq!(flow.step(), Step::Upload);
    }

    #[test]
    fn test_verify_requires_extraction() {
        let mut flow = workflow();
        let err = flow.verify().unwrap_err();
        assert!(matches!(
            err,
            IdVerifyError::Workflow(WorkflowError::NotReady { ref step }) if step == "upload"
        ));
    }

    #[test]
    fn test_verdict_is_replaced_on_each_verify() {
        let mut flow = workflow();
        flow.submit_text("Ravi Kumar\n1234 1234 1234").unwrap();

        flow.entered_mut().set(FieldName::Name, "Sita Devi");
        assert_eq!(flow.verify().unwrap().matched(), 0);

        flow.entered_mut().set(FieldName::Name, "Ravi Kumar");
        flow.entered_mut().set(FieldName::IdNumber, "1234 1234 1234");
        assert_eq!(flow.verify().unwrap().matched(), 2);
    }

    #[test]
    fn test_new_document_discards_previous_state() {
        let mut flow = workflow();
        flow.submit_text("Ravi Kumar").unwrap();
        flow.entered_mut().set(FieldName::Name, "Ravi Kumar");
        flow.verify().unwrap();

        let extracted = flow.submit_text("Sita Devi\n9876543210").unwrap();
        assert_eq!(extracted.name(), Some("Sita Devi"));
        assert!(flow.verdict().is_none());
        assert!(flow.entered().is_blank());
        assert_eq!(flow.step(), Step::Form);

        flow.reset();
        assert_eq!(flow.step(), Step::Upload);
        assert!(flow.extracted().is_none());
    }
}

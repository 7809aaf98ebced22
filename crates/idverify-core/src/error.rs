//! Error types for the idverify-core library.

use thiserror::Error;

/// Main error type for the idverify library.
#[derive(Error, Debug)]
pub enum IdVerifyError {
    /// The uploaded payload was rejected before recognition.
    #[error("upload rejected: {0}")]
    Upload(#[from] UploadError),

    /// The OCR engine failed; no extraction was attempted.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Extraction produced nothing usable.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// A workflow action was invoked in the wrong step.
    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Reasons an upload is refused by the upload guard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    /// Zero-byte payload.
    #[error("payload is empty")]
    Empty,

    /// Payload exceeds the configured size limit.
    #[error("payload is {size} bytes, limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    /// Declared media type is not an accepted image type.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// The payload bytes do not look like any known image format.
    #[error("payload is not a recognizable image")]
    UnrecognizedImage,
}

/// Errors raised at the OCR boundary.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The engine failed while recognizing text.
    #[error("engine failure: {0}")]
    Engine(String),

    /// The image could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to field extraction.
///
/// The extractor itself never fails; this is raised by the workflow layer
/// when a document yields no fields at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No field could be extracted from the document text.
    #[error("no data found in document")]
    NoData,
}

/// Errors from calling workflow actions out of order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The action needs a step the workflow has not reached.
    #[error("action requires extracted fields, workflow is at step {step}")]
    NotReady { step: String },
}

/// Result type for the idverify library.
pub type Result<T> = std::result::Result<T, IdVerifyError>;

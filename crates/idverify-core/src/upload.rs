//! Upload guard applied before a document reaches OCR.

use image::ImageFormat;
use tracing::{debug, warn};

use crate::error::UploadError;
use crate::models::config::UploadConfig;

/// Checks size, declared media type and magic bytes of an uploaded document.
#[derive(Debug, Clone, Default)]
pub struct UploadGuard {
    config: UploadConfig,
}

impl UploadGuard {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    /// Maximum accepted payload size in bytes.
    pub fn max_bytes(&self) -> usize {
        self.config.max_bytes
    }

    /// Check the payload size without looking at its contents.
    pub fn check_size(&self, size: usize) -> Result<(), UploadError> {
        if size == 0 {
            return Err(UploadError::Empty);
        }
        if size > self.config.max_bytes {
            return Err(UploadError::TooLarge {
                size,
                limit: self.config.max_bytes,
            });
        }
        Ok(())
    }

    /// Check a declared media type against the accept list.
    ///
    /// Parameters such as `; charset=` are ignored and the comparison is
    /// case-insensitive.
    pub fn check_media_type(&self, media_type: &str) -> Result<(), UploadError> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let accepted = essence.starts_with("image/")
            && self
                .config
                .accepted_media_types
                .iter()
                .any(|m| m.eq_ignore_ascii_case(&essence));

        if accepted {
            Ok(())
        } else {
            Err(UploadError::UnsupportedMediaType(media_type.to_string()))
        }
    }

    /// Check a payload and return its sniffed image format.
    pub fn check(
        &self,
        bytes: &[u8],
        declared_media_type: Option<&str>,
    ) -> Result<ImageFormat, UploadError> {
        self.check_size(bytes.len()).inspect_err(|e| warn!("Upload rejected: {}", e))?;

        if let Some(media_type) = declared_media_type {
            self.check_media_type(media_type)
                .inspect_err(|e| warn!("Upload rejected: {}", e))?;
        }

        let format = image::guess_format(bytes).map_err(|_| {
            warn!("Upload rejected: unrecognized image bytes");
            UploadError::UnrecognizedImage
        })?;

        debug!("Accepted {:?} upload of {} bytes", format, bytes.len());
        Ok(format)
    }
}

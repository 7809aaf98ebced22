//! Configuration structures for the verification pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upload limit used by the document picker: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Main configuration for the idverify pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdVerifyConfig {
    /// Upload guard configuration.
    pub upload: UploadConfig,

    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration for the native OCR backend.
    pub models: ModelConfig,
}

/// Limits applied to a document before it reaches OCR.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Maximum accepted payload size in bytes.
    pub max_bytes: usize,

    /// Accepted media types. All must be `image/*`.
    pub accepted_media_types: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            accepted_media_types: [
                "image/png",
                "image/jpeg",
                "image/webp",
                "image/bmp",
                "image/tiff",
                "image/gif",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hint passed to the recognizer.
    pub language: String,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            keep_unk: false,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Boilerplate phrases rejected as names, on top of the built-in list.
    pub extra_denylist: Vec<String>,
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

impl IdVerifyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IdVerifyConfig::default();
        assert_eq!(config.upload.max_bytes, 10_485_760);
        assert!(config.upload.accepted_media_types.iter().all(|m| m.starts_with("image/")));
        assert_eq!(config.ocr.language, "eng");
        assert!(config.extraction.extra_denylist.is_empty());
        assert_eq!(config.model_path("det.onnx"), PathBuf::from("models/det.onnx"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: IdVerifyConfig =
            serde_json::from_str(r#"{"upload":{"max_bytes":1024}}"#).unwrap();
        assert_eq!(config.upload.max_bytes, 1024);
        assert!(!config.upload.accepted_media_types.is_empty());
        assert_eq!(config.models.dictionary, "latin_dict.txt");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IdVerifyConfig::default();
        config.extraction.extra_denylist.push("Transport Department".to_string());
        config.save(&path).unwrap();

        let loaded = IdVerifyConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.extra_denylist, vec!["Transport Department"]);
    }
}

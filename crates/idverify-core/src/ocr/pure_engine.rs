//! Pure Rust OCR backend using `pure-onnx-ocr`.

use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info, warn};

use crate::error::RecognitionError;
use crate::models::config::{IdVerifyConfig, OcrConfig};

use super::{ProgressTracker, TextBox, TextRecognizer, reading_order_text};

/// Text recognizer backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
pub struct PureOcrRecognizer {
    engine: pure_onnx_ocr::engine::OcrEngine,
    config: OcrConfig,
}

impl PureOcrRecognizer {
    /// Load the detection model, recognition model and dictionary named in
    /// the configuration.
    pub fn from_config(config: &IdVerifyConfig) -> Result<Self, RecognitionError> {
        let det_path = config.model_path(&config.models.detection_model);
        let rec_path = config.model_path(&config.models.recognition_model);
        let dict_path = config.model_path(&config.models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(RecognitionError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| RecognitionError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!(
            "Loaded pure-onnx-ocr engine from {}",
            config.models.model_dir.display()
        );

        Ok(Self {
            engine,
            config: config.ocr.clone(),
        })
    }
}

impl TextRecognizer for PureOcrRecognizer {
    fn recognize(
        &self,
        image: &[u8],
        language: &str,
        progress: &mut dyn FnMut(f32),
    ) -> Result<String, RecognitionError> {
        let start = Instant::now();
        let mut progress = ProgressTracker::new(progress);
        progress.report(0.0);

        if language != self.config.language {
            debug!(
                "Language hint '{}' ignored, dictionary is fixed at load time",
                language
            );
        }

        let image = image::load_from_memory(image)
            .map_err(|e| RecognitionError::InvalidImage(e.to_string()))?;
        let (width, height) = image.dimensions();
        info!("Processing image: {}x{}", width, height);
        progress.report(0.1);

        let results = self.engine.run_from_image(&image).map_err(|e| {
            warn!("pure-onnx-ocr failed: {}", e);
            RecognitionError::Engine(format!("pure-onnx-ocr: {}", e))
        })?;
        progress.report(0.9);

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        let mut boxes: Vec<TextBox> = results
            .iter()
            .map(|r| TextBox {
                bbox: polygon_to_bbox(&r.bounding_box),
                text: if self.config.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                },
                confidence: r.confidence,
            })
            .collect();

        let text = reading_order_text(&mut boxes);
        progress.finish();

        info!(
            "OCR complete: {} text boxes in {}ms",
            boxes.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}

/// Convert a `Polygon<f64>` to our `[f32; 8]` bbox format.
fn polygon_to_bbox(polygon: &pure_onnx_ocr::Polygon<f64>) -> [f32; 8] {
    let mut bbox = [0.0f32; 8];
    for (i, coord) in polygon.exterior().coords().take(4).enumerate() {
        bbox[i * 2] = coord.x as f32;
        bbox[i * 2 + 1] = coord.y as f32;
    }
    bbox
}

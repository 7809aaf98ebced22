//! OCR boundary.
//!
//! Recognition itself is an external collaborator. The core only needs raw
//! text back, plus progress reports while the engine runs.

mod progress;
#[cfg(feature = "native")]
mod pure_engine;

pub use progress::ProgressTracker;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrRecognizer;

use serde::{Deserialize, Serialize};

use crate::error::RecognitionError;

/// Turns an image into raw text.
pub trait TextRecognizer {
    /// Recognize text in an encoded image.
    ///
    /// `progress` receives non-decreasing fractions in `[0, 1]`.
    fn recognize(
        &self,
        image: &[u8],
        language: &str,
        progress: &mut dyn FnMut(f32),
    ) -> Result<String, RecognitionError>;
}

/// A recognized text region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Quadrilateral corners (x1, y1, x2, y2, x3, y3, x4, y4).
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Height of a reading-order row in pixels.
const ROW_HEIGHT: f32 = 20.0;

/// Sort regions top-to-bottom, then left-to-right within a row, and join
/// their text with newlines.
pub fn reading_order_text(boxes: &mut [TextBox]) -> String {
    boxes.sort_by(|a, b| {
        let (ax, ay, _, _) = a.rect();
        let (bx, by, _, _) = b.rect();

        // Group by approximate vertical position
        let row_a = (ay / ROW_HEIGHT) as i32;
        let row_b = (by / ROW_HEIGHT) as i32;

        row_a
            .cmp(&row_b)
            .then(ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal))
    });

    boxes
        .iter()
        .map(|b| b.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

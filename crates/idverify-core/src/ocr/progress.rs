//! Monotonic progress reporting.

/// Wraps a progress callback so it only sees non-decreasing values in
/// `[0, 1]`. Non-finite values are dropped.
pub struct ProgressTracker<'a> {
    callback: &'a mut dyn FnMut(f32),
    last: Option<f32>,
}

impl<'a> ProgressTracker<'a> {
    pub fn new(callback: &'a mut dyn FnMut(f32)) -> Self {
        Self {
            callback,
            last: None,
        }
    }

    /// Report a progress fraction.
    pub fn report(&mut self, fraction: f32) {
        if !fraction.is_finite() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        if self.last.is_some_and(|last| fraction < last) {
            return;
        }
        self.last = Some(fraction);
        (self.callback)(fraction);
    }

    /// Report completion.
    pub fn finish(&mut self) {
        self.report(1.0);
    }

    /// Last value passed to the callback.
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

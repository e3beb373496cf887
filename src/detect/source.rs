use anyhow::Result;
use rand::Rng;

use crate::detect::result::{BoxCoords, Detection};

/// Source of detection events.
///
/// Implementations wrap whatever inference runtime actually produces
/// detections. The pipeline only polls; a source must not block the
/// detection loop waiting for a frame.
pub trait DetectionSource: Send {
    /// Source identifier for logs.
    fn name(&self) -> &'static str;

    /// Next detection, if one is available this poll.
    fn next_detection(&mut self) -> Result<Option<Detection>>;
}

/// Stub source for tests and the demo loop.
///
/// Synthesizes plausible detections in normalized coordinates: most polls
/// return nothing, the rest a box somewhere in the frame with a confidence
/// above the configured floor.
pub struct StubSource {
    label: String,
    min_confidence: f32,
}

impl StubSource {
    pub fn new(label: impl Into<String>, min_confidence: f32) -> Self {
        Self {
            label: label.into(),
            min_confidence: min_confidence.clamp(0.0, 1.0),
        }
    }
}

impl DetectionSource for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn next_detection(&mut self) -> Result<Option<Detection>> {
        let mut rng = rand::thread_rng();
        if rng.gen_bool(0.6) {
            return Ok(None);
        }

        let left = rng.gen_range(0.0..0.6);
        let top = rng.gen_range(0.0..0.6);
        let width = rng.gen_range(0.1..0.4);
        let height = rng.gen_range(0.1..0.4);

        Ok(Some(Detection {
            label: self.label.clone(),
            confidence: rng.gen_range(self.min_confidence..=1.0),
            bounds: BoxCoords::new(left, top, left + width, top + height),
        }))
    }
}

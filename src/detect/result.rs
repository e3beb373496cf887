use serde::{Deserialize, Serialize};

/// Category label recognized as the person category by the trigger policy.
pub const PERSON_LABEL: &str = "person";

/// A single detection reported by the vision collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detection {
    /// Free-form category label, e.g. "person". Compared case-insensitively.
    pub label: String,
    /// Either a 0..1 fraction or an already-scaled 0..100 percentage,
    /// depending on the detector convention. See [`confidence_percent`].
    pub confidence: f32,
    /// Bounding box in detector space: normalized or source-pixel units.
    pub bounds: BoxCoords,
}

impl Detection {
    /// True when the label names the person category (trimmed,
    /// case-insensitive).
    pub fn is_person(&self) -> bool {
        self.label.trim().eq_ignore_ascii_case(PERSON_LABEL)
    }
}

/// Detector-space rectangle as reported: left, top, right, bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxCoords {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoxCoords {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Display percentage for a detector confidence value.
///
/// Detectors disagree on convention: some report a 0..1 fraction, others an
/// already-scaled percentage. Values <= 1.0 are read as fractions and scaled
/// by 100; anything larger is taken as a percentage as-is. The result is
/// rounded to the nearest integer and clamped to 0..=100. Note the boundary:
/// a value like 1.5 is *not* a fraction, it is a 2% detection.
pub fn confidence_percent(confidence: f32) -> u8 {
    let percent = if confidence <= 1.0 {
        confidence * 100.0
    } else {
        confidence
    };
    percent.round().clamp(0.0, 100.0) as u8
}

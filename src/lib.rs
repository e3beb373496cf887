//! Detection Response Pipeline (DRP)
//!
//! This crate implements the core pipeline between a machine-vision detector
//! and the two things a monitoring surface does with a detection: draw an
//! overlay rectangle where the detection sits on screen, and decide whether
//! to speak at whoever was detected.
//!
//! # Architecture
//!
//! Two components cooperate without shared mutable state:
//!
//! 1. **Overlay projection** (`overlay`): a pure mapping from detector-space
//!    boxes (normalized or pixel-unit) into output-surface coordinates.
//!    Degenerate input draws nothing; projection never fails and never
//!    panics.
//! 2. **Response policy** (`response`): a stateful decision over the
//!    detection stream. Owns exactly one piece of mutable state, the
//!    last-spoken timestamp, and enforces a cooldown window so a steady
//!    stream of detections does not produce continuous chatter.
//!
//! Speech playback and detection inference sit behind narrow trait
//! boundaries (`response::SpeechSink`, `detect::DetectionSource`); the core
//! never touches a speech or inference runtime directly.
//!
//! # Module Structure
//!
//! - `detect`: detection records and the vision source boundary
//! - `overlay`: display transforms and box projection
//! - `response`: trigger policy, message resolution, speech boundary
//! - `pipeline`: per-detection coordinator wiring the above together
//! - `config`: file + environment configuration loading

pub mod config;
pub mod detect;
pub mod overlay;
pub mod pipeline;
pub mod response;

pub use detect::{confidence_percent, BoxCoords, Detection, DetectionSource, StubSource};
pub use overlay::{project, DisplayTransform, ProjectedBox};
pub use pipeline::{DetectionPipeline, FrameOutcome, SpeechOutcome};
pub use response::{
    QueueSink, ResponseKind, ResponsePolicy, SpeechAck, SpeechLocale, SpeechRequest, SpeechSink,
    TriggerConfig,
};

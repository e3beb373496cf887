//! Per-detection coordinator.
//!
//! Overlay projection and response evaluation stay independent: a degenerate
//! box still gets a policy decision, and a suppressed response still gets
//! its overlay rectangle. The pipeline exists so callers feed a detection in
//! once and get both results back.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::detect::Detection;
use crate::overlay::{project, DisplayTransform, ProjectedBox};
use crate::response::{ResponsePolicy, SpeechAck, SpeechRequest, SpeechSink, TriggerConfig};

/// Result of running one detection through the pipeline.
#[derive(Clone, Debug)]
pub struct FrameOutcome {
    /// Rectangle to draw, absent when the box was degenerate.
    pub overlay: Option<ProjectedBox>,
    /// Speech decision for this detection, absent when suppressed.
    pub response: Option<SpeechOutcome>,
}

/// A response request together with the sink's verdict on it.
#[derive(Clone, Debug)]
pub struct SpeechOutcome {
    pub request: SpeechRequest,
    pub ack: SpeechAck,
}

/// Wires one policy, one speech sink, and the shared trigger configuration.
///
/// The configuration sits behind a mutex and is snapshotted per evaluation:
/// the settings owner mutates it through [`DetectionPipeline::config_handle`]
/// and readers observe either the old or the new configuration in full,
/// never a torn update.
pub struct DetectionPipeline<S: SpeechSink> {
    policy: ResponsePolicy,
    sink: S,
    config: Arc<Mutex<TriggerConfig>>,
}

impl<S: SpeechSink> DetectionPipeline<S> {
    pub fn new(config: TriggerConfig, sink: S) -> Self {
        Self {
            policy: ResponsePolicy::new(),
            sink,
            config: Arc::new(Mutex::new(config)),
        }
    }

    /// Shared handle for the settings owner. Mutations land on the next
    /// evaluation.
    pub fn config_handle(&self) -> Arc<Mutex<TriggerConfig>> {
        Arc::clone(&self.config)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Run one detection through projection and policy.
    pub fn handle(
        &mut self,
        detection: &Detection,
        transform: &DisplayTransform,
        now: Instant,
    ) -> FrameOutcome {
        let overlay = project(detection.bounds, transform);

        // Hold the lock only for the clone; evaluation runs on the snapshot.
        let snapshot = match self.config.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };

        let response = self
            .policy
            .evaluate(detection, &snapshot, now)
            .map(|request| {
                let ack = self.sink.submit(&request);
                match ack {
                    SpeechAck::Accepted => {
                        log::info!("speaking ({:?}): {}", request.locale, request.message);
                    }
                    SpeechAck::Rejected => {
                        // The cooldown window is already spent; skip this
                        // utterance rather than retry into a busy engine.
                        log::warn!("speech sink rejected: {}", request.message);
                    }
                }
                SpeechOutcome { request, ack }
            });

        FrameOutcome { overlay, response }
    }
}

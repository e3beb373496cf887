use serde::{Deserialize, Serialize};

use crate::response::message::SpeechLocale;

/// A request for the speech adapter: what to say and in which voice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub message: String,
    pub locale: SpeechLocale,
}

/// Whether the speech adapter accepted a request for playback.
///
/// Rejection is non-fatal and carries no detail: the caller logs it and
/// moves on without retrying.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechAck {
    Accepted,
    Rejected,
}

impl SpeechAck {
    pub fn is_accepted(self) -> bool {
        matches!(self, SpeechAck::Accepted)
    }
}

/// Speech playback boundary.
///
/// The core emits requests; an adapter on the platform side owns the actual
/// speech runtime. Submitting while an utterance is in flight must append to
/// the queue, never cut off a message mid-utterance. Adapters report failure
/// as `Rejected` rather than an error so a busy speech engine cannot fail
/// the detection path.
pub trait SpeechSink: Send {
    fn submit(&mut self, request: &SpeechRequest) -> SpeechAck;
}

/// Queueing sink for tests and the demo loop.
///
/// Appends up to `capacity` pending requests and rejects once full, the way
/// a busy speech engine would.
pub struct QueueSink {
    queue: Vec<SpeechRequest>,
    capacity: usize,
}

impl QueueSink {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Vec::new(),
            capacity,
        }
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&mut self) -> Vec<SpeechRequest> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl SpeechSink for QueueSink {
    fn submit(&mut self, request: &SpeechRequest) -> SpeechAck {
        if self.queue.len() >= self.capacity {
            return SpeechAck::Rejected;
        }
        self.queue.push(request.clone());
        SpeechAck::Accepted
    }
}

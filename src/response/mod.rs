//! Trigger policy, message resolution, and the speech boundary.
//!
//! The policy decides *whether* and *what* to say; it never performs audio
//! I/O itself. Playback lives behind [`SpeechSink`], a deliberately narrow
//! boundary: the core submits a request, the adapter reports acceptance, and
//! nothing else crosses.

mod message;
mod policy;
mod speech;

pub use message::{
    locale_for_message, resolve_message, SpeechLocale, DETERRENT_MESSAGE, RECORDING_MESSAGE,
    WELCOME_MESSAGE,
};
pub use policy::{
    ResponseKind, ResponsePolicy, TriggerConfig, MAX_COOLDOWN_SECS, MIN_COOLDOWN_SECS,
};
pub use speech::{QueueSink, SpeechAck, SpeechRequest, SpeechSink};

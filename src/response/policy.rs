use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::detect::Detection;
use crate::response::message::{locale_for_message, resolve_message};
use crate::response::speech::SpeechRequest;

/// Bounds for the cooldown window, in seconds.
pub const MIN_COOLDOWN_SECS: u32 = 1;
pub const MAX_COOLDOWN_SECS: u32 = 3600;

/// What the camera says when the trigger fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    Deterrent,
    Welcome,
    #[default]
    Recording,
    Custom,
}

impl ResponseKind {
    /// Parse a configuration keyword (trimmed, case-insensitive).
    ///
    /// An unrecognized value falls back to `Recording` with a warning; it is
    /// never dropped and never an error.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "deterrent" => ResponseKind::Deterrent,
            "welcome" => ResponseKind::Welcome,
            "recording" => ResponseKind::Recording,
            "custom" => ResponseKind::Custom,
            other => {
                log::warn!(
                    "unrecognized response kind {:?}, falling back to recording",
                    other
                );
                ResponseKind::Recording
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResponseKind::Deterrent => "deterrent",
            ResponseKind::Welcome => "welcome",
            ResponseKind::Recording => "recording",
            ResponseKind::Custom => "custom",
        }
    }
}

/// Live trigger settings, owned by the hosting application.
///
/// The policy reads these fresh on every evaluation; nothing is cached
/// across calls, so a settings change lands on the very next detection.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerConfig {
    pub enabled: bool,
    pub response: ResponseKind,
    /// Spoken verbatim (trimmed) when `response` is `Custom`.
    pub custom_message: String,
    /// Restrict responses to the person category.
    pub only_for_person: bool,
    /// Seconds between spoken responses. Clamped into
    /// `MIN_COOLDOWN_SECS..=MAX_COOLDOWN_SECS` at the configuration boundary.
    pub cooldown_seconds: u32,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            response: ResponseKind::Recording,
            custom_message: String::new(),
            only_for_person: true,
            cooldown_seconds: 60,
        }
    }
}

impl TriggerConfig {
    /// Clamp the cooldown into its allowed range, warning when the
    /// configured value was out of bounds.
    pub fn clamp_cooldown(&mut self) {
        let clamped = self
            .cooldown_seconds
            .clamp(MIN_COOLDOWN_SECS, MAX_COOLDOWN_SECS);
        if clamped != self.cooldown_seconds {
            log::warn!(
                "cooldown_seconds {} out of range, clamped to {}",
                self.cooldown_seconds,
                clamped
            );
            self.cooldown_seconds = clamped;
        }
    }
}

/// Decides whether a detection produces a spoken response.
///
/// Owns the single piece of mutable state in the core, the timestamp of the
/// last response decision. One instance belongs to one detection-consuming
/// loop; it is not synchronized internally.
#[derive(Debug, Default)]
pub struct ResponsePolicy {
    last_spoken_at: Option<Instant>,
}

impl ResponsePolicy {
    pub fn new() -> Self {
        Self {
            last_spoken_at: None,
        }
    }

    /// Evaluate one detection against the live configuration.
    ///
    /// The cooldown window starts at decision time, not playback time: a
    /// request the speech adapter later rejects still consumes its window,
    /// so a busy engine costs one missed utterance instead of a retry storm.
    /// Suppression reasons are logged here and not distinguished in the
    /// return value.
    pub fn evaluate(
        &mut self,
        detection: &Detection,
        config: &TriggerConfig,
        now: Instant,
    ) -> Option<SpeechRequest> {
        if !config.enabled {
            log::debug!("response suppressed: trigger disabled");
            return None;
        }

        if config.only_for_person && !detection.is_person() {
            log::debug!(
                "response suppressed: label {:?} is not the person category",
                detection.label
            );
            return None;
        }

        let cooldown =
            Duration::from_secs(u64::from(config.cooldown_seconds.max(MIN_COOLDOWN_SECS)));
        if let Some(last) = self.last_spoken_at {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < cooldown {
                log::debug!(
                    "response suppressed: {:.1}s into a {}s cooldown",
                    elapsed.as_secs_f32(),
                    cooldown.as_secs()
                );
                return None;
            }
        }

        let message = resolve_message(config.response, &config.custom_message);
        if message.is_empty() {
            log::debug!("response suppressed: resolved message is empty");
            return None;
        }
        let locale = locale_for_message(&message);

        self.last_spoken_at = Some(now);
        Some(SpeechRequest { message, locale })
    }

    /// Timestamp of the most recent response decision, if any.
    pub fn last_spoken_at(&self) -> Option<Instant> {
        self.last_spoken_at
    }
}

use serde::{Deserialize, Serialize};

use crate::response::policy::ResponseKind;

/// Canonical spoken warnings per response kind. Configuration data, not
/// derived at runtime.
pub const DETERRENT_MESSAGE: &str =
    "Warning. This property is monitored. You are being recorded. Please leave now.";
pub const WELCOME_MESSAGE: &str = "Hello and welcome. This area is under video monitoring.";
pub const RECORDING_MESSAGE: &str =
    "This area is under 24 hour video surveillance. Recording is in progress.";

/// Voice locale for a spoken response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechLocale {
    /// Mandarin voice (zh-CN).
    Chinese,
    /// US English voice (en-US).
    English,
}

/// Resolve the text to speak for a response kind.
///
/// Custom messages are trimmed; an empty custom message falls back to the
/// recording warning so the policy never emits an empty utterance.
pub fn resolve_message(kind: ResponseKind, custom_message: &str) -> String {
    match kind {
        ResponseKind::Deterrent => DETERRENT_MESSAGE.to_string(),
        ResponseKind::Welcome => WELCOME_MESSAGE.to_string(),
        ResponseKind::Recording => RECORDING_MESSAGE.to_string(),
        ResponseKind::Custom => {
            let trimmed = custom_message.trim();
            if trimmed.is_empty() {
                RECORDING_MESSAGE.to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Pick a voice for a message by content, not configuration, so
/// mixed-language custom messages still route sensibly.
///
/// A single CJK ideograph anywhere selects the Chinese voice. A heuristic,
/// not a language detector.
pub fn locale_for_message(message: &str) -> SpeechLocale {
    if message.chars().any(is_cjk_ideograph) {
        SpeechLocale::Chinese
    } else {
        SpeechLocale::English
    }
}

/// CJK Unified Ideographs block, U+4E00..=U+9FFF.
fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

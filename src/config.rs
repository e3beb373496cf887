use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::response::{ResponseKind, TriggerConfig};

const DEFAULT_SOURCE_LABEL: &str = "person";
const DEFAULT_SOURCE_FPS: u32 = 10;
const DEFAULT_SOURCE_WIDTH: u32 = 640;
const DEFAULT_SOURCE_HEIGHT: u32 = 480;
const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;
const DEFAULT_VIEW_WIDTH: u32 = 1080;
const DEFAULT_VIEW_HEIGHT: u32 = 1920;

#[derive(Debug, Deserialize, Default)]
struct ResponderConfigFile {
    trigger: Option<TriggerConfigFile>,
    source: Option<SourceConfigFile>,
    view: Option<ViewConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct TriggerConfigFile {
    enabled: Option<bool>,
    response: Option<String>,
    custom_message: Option<String>,
    only_for_person: Option<bool>,
    cooldown_seconds: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct SourceConfigFile {
    label: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    min_confidence: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct ViewConfigFile {
    width: Option<u32>,
    height: Option<u32>,
}

/// Full daemon configuration: the live trigger settings plus the stub
/// source and output surface used by the demo loop.
#[derive(Debug, Clone)]
pub struct ResponderConfig {
    pub trigger: TriggerConfig,
    pub source: SourceSettings,
    pub view: ViewSettings,
}

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub label: String,
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
    pub min_confidence: f32,
}

/// Output surface size the overlay is projected onto.
#[derive(Debug, Clone)]
pub struct ViewSettings {
    pub width: u32,
    pub height: u32,
}

impl ResponderConfig {
    /// Load configuration: optional JSON file named by `SENTRY_CONFIG`,
    /// then `SENTRY_*` environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("SENTRY_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ResponderConfigFile) -> Self {
        let trigger_file = file.trigger.unwrap_or_default();
        let defaults = TriggerConfig::default();
        let trigger = TriggerConfig {
            enabled: trigger_file.enabled.unwrap_or(defaults.enabled),
            response: trigger_file
                .response
                .as_deref()
                .map(ResponseKind::parse)
                .unwrap_or(defaults.response),
            custom_message: trigger_file
                .custom_message
                .unwrap_or(defaults.custom_message),
            only_for_person: trigger_file
                .only_for_person
                .unwrap_or(defaults.only_for_person),
            cooldown_seconds: trigger_file
                .cooldown_seconds
                .unwrap_or(defaults.cooldown_seconds),
        };
        let source = SourceSettings {
            label: file
                .source
                .as_ref()
                .and_then(|source| source.label.clone())
                .unwrap_or_else(|| DEFAULT_SOURCE_LABEL.to_string()),
            target_fps: file
                .source
                .as_ref()
                .and_then(|source| source.target_fps)
                .unwrap_or(DEFAULT_SOURCE_FPS),
            width: file
                .source
                .as_ref()
                .and_then(|source| source.width)
                .unwrap_or(DEFAULT_SOURCE_WIDTH),
            height: file
                .source
                .as_ref()
                .and_then(|source| source.height)
                .unwrap_or(DEFAULT_SOURCE_HEIGHT),
            min_confidence: file
                .source
                .and_then(|source| source.min_confidence)
                .unwrap_or(DEFAULT_MIN_CONFIDENCE),
        };
        let view = ViewSettings {
            width: file
                .view
                .as_ref()
                .and_then(|view| view.width)
                .unwrap_or(DEFAULT_VIEW_WIDTH),
            height: file
                .view
                .and_then(|view| view.height)
                .unwrap_or(DEFAULT_VIEW_HEIGHT),
        };
        Self {
            trigger,
            source,
            view,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(enabled) = std::env::var("SENTRY_TRIGGER_ENABLED") {
            self.trigger.enabled = parse_bool("SENTRY_TRIGGER_ENABLED", &enabled)?;
        }
        if let Ok(response) = std::env::var("SENTRY_RESPONSE") {
            if !response.trim().is_empty() {
                self.trigger.response = ResponseKind::parse(&response);
            }
        }
        if let Ok(message) = std::env::var("SENTRY_CUSTOM_MESSAGE") {
            self.trigger.custom_message = message;
        }
        if let Ok(only) = std::env::var("SENTRY_ONLY_FOR_PERSON") {
            self.trigger.only_for_person = parse_bool("SENTRY_ONLY_FOR_PERSON", &only)?;
        }
        if let Ok(cooldown) = std::env::var("SENTRY_COOLDOWN_SECS") {
            self.trigger.cooldown_seconds = cooldown.parse().map_err(|_| {
                anyhow!("SENTRY_COOLDOWN_SECS must be an integer number of seconds")
            })?;
        }
        if let Ok(label) = std::env::var("SENTRY_SOURCE_LABEL") {
            if !label.trim().is_empty() {
                self.source.label = label;
            }
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        self.trigger.clamp_cooldown();

        if self.source.target_fps == 0 {
            return Err(anyhow!("source target_fps must be greater than zero"));
        }
        if !(0.0..=1.0).contains(&self.source.min_confidence) {
            return Err(anyhow!("source min_confidence must be within 0.0..=1.0"));
        }
        if self.source.width == 0 || self.source.height == 0 {
            return Err(anyhow!("source size must be non-zero"));
        }
        if self.view.width == 0 || self.view.height == 0 {
            return Err(anyhow!("view size must be non-zero"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<ResponderConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("{} must be a boolean, got {:?}", name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let cfg = ResponderConfig::from_file(ResponderConfigFile::default());
        assert!(cfg.trigger.enabled);
        assert_eq!(cfg.trigger.response, ResponseKind::Recording);
        assert_eq!(cfg.trigger.cooldown_seconds, 60);
        assert_eq!(cfg.source.label, "person");
        assert_eq!(cfg.view.width, 1080);
    }

    #[test]
    fn unrecognized_response_keyword_in_file_falls_back() {
        let file: ResponderConfigFile =
            serde_json::from_str(r#"{ "trigger": { "response": "airhorn" } }"#).unwrap();
        let cfg = ResponderConfig::from_file(file);
        assert_eq!(cfg.trigger.response, ResponseKind::Recording);
    }

    #[test]
    fn validate_clamps_cooldown_instead_of_failing() {
        let file: ResponderConfigFile =
            serde_json::from_str(r#"{ "trigger": { "cooldown_seconds": 99999 } }"#).unwrap();
        let mut cfg = ResponderConfig::from_file(file);
        cfg.validate().expect("clamping is not an error");
        assert_eq!(cfg.trigger.cooldown_seconds, 3600);
    }

    #[test]
    fn validate_rejects_empty_surfaces() {
        let file: ResponderConfigFile =
            serde_json::from_str(r#"{ "view": { "width": 0 } }"#).unwrap();
        let mut cfg = ResponderConfig::from_file(file);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn bool_parsing_accepts_common_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", " Yes ").unwrap());
        assert!(!parse_bool("X", "0").unwrap());
        assert!(parse_bool("X", "maybe").is_err());
    }
}

//! Engine tunables.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Longest cooldown accepted, one day.
pub const MAX_COOLDOWN_SECS: i64 = 86_400;

/// Errors raised by configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid engine config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid engine config: {0}")]
    Invalid(String),
}

/// Thresholds and caps used by the detectors, scheduler and cooldown tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds of human silence before a silence break is considered.
    pub silence_threshold_secs: f64,

    /// How many trailing messages the conflict detector scans.
    pub conflict_window: usize,
    /// Score at which the conflict detector fires.
    pub conflict_threshold: u32,

    /// How many trailing messages the educational-moment detector scans.
    pub educational_window: usize,
    /// How many trailing messages decide whether NPCs are dominating.
    pub npc_interaction_window: usize,

    /// Accuracy below which a player is considered to be struggling.
    pub struggling_ratio: f64,

    /// Maximum triggers executed per batch.
    pub max_triggers_per_batch: usize,
    /// Maximum NPCs responding to a single non-conflict trigger.
    pub max_responders_per_trigger: usize,

    pub default_cooldown_secs: i64,
    pub conflict_cooldown_secs: i64,

    /// Number of trailing messages passed to the message generator.
    pub history_length: usize,

    /// Upper bound for a single generation call; unbounded when unset.
    pub generation_timeout_ms: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            silence_threshold_secs: 30.0,
            conflict_window: 5,
            conflict_threshold: 5,
            educational_window: 3,
            npc_interaction_window: 3,
            struggling_ratio: 0.4,
            max_triggers_per_batch: 2,
            max_responders_per_trigger: 2,
            default_cooldown_secs: 15,
            conflict_cooldown_secs: 5,
            history_length: 5,
            generation_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; keys that are absent keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("conflict_window", self.conflict_window),
            ("educational_window", self.educational_window),
            ("npc_interaction_window", self.npc_interaction_window),
            ("max_triggers_per_batch", self.max_triggers_per_batch),
            ("max_responders_per_trigger", self.max_responders_per_trigger),
        ];
        if let Some((name, _)) = windows.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{} must be at least 1", name)));
        }

        if !(self.struggling_ratio > 0.0 && self.struggling_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "struggling_ratio must be in (0, 1], got {}",
                self.struggling_ratio
            )));
        }

        let cooldowns = [
            ("default_cooldown_secs", self.default_cooldown_secs),
            ("conflict_cooldown_secs", self.conflict_cooldown_secs),
        ];
        if let Some((name, value)) = cooldowns
            .iter()
            .find(|(_, value)| !(0..=MAX_COOLDOWN_SECS).contains(value))
        {
            return Err(ConfigError::Invalid(format!(
                "{} must be in [0, {}], got {}",
                name, MAX_COOLDOWN_SECS, value
            )));
        }

        Ok(())
    }

    /// Clamped to `[0, MAX_COOLDOWN_SECS]` even when the config was never validated.
    pub fn default_cooldown(&self) -> Duration {
        Duration::seconds(self.default_cooldown_secs.clamp(0, MAX_COOLDOWN_SECS))
    }

    pub fn conflict_cooldown(&self) -> Duration {
        Duration::seconds(self.conflict_cooldown_secs.clamp(0, MAX_COOLDOWN_SECS))
    }

    pub fn generation_timeout(&self) -> Option<std::time::Duration> {
        self.generation_timeout_ms
            .map(std::time::Duration::from_millis)
    }
}

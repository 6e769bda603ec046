//! Per-NPC cooldown tracking.

use chrono::{DateTime, Duration, Utc};
use npc_roster::NpcId;
use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::triggers::TriggerType;

/// Last send time of every NPC in one room.
///
/// Timestamps are only written once a message was actually generated.
#[derive(Debug, Clone)]
pub struct CooldownTracker {
    last_message: HashMap<NpcId, DateTime<Utc>>,
    default_cooldown: Duration,
    conflict_cooldown: Duration,
}

impl CooldownTracker {
    pub fn new(default_cooldown: Duration, conflict_cooldown: Duration) -> Self {
        Self {
            last_message: HashMap::new(),
            default_cooldown,
            conflict_cooldown,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.default_cooldown(), config.conflict_cooldown())
    }

    /// Adopt new cooldown durations, keeping recorded timestamps.
    pub fn reconfigure(&mut self, config: &EngineConfig) {
        self.default_cooldown = config.default_cooldown();
        self.conflict_cooldown = config.conflict_cooldown();
    }

    /// Minimum spacing before an NPC may answer this kind of trigger.
    pub fn cooldown_for(&self, trigger_type: TriggerType) -> Duration {
        match trigger_type {
            TriggerType::ConflictResolution => self.conflict_cooldown,
            _ => self.default_cooldown,
        }
    }

    /// Check whether an NPC may speak again. NPCs that never spoke always may.
    pub fn can_respond(&self, npc_id: &NpcId, trigger_type: TriggerType, now: DateTime<Utc>) -> bool {
        self.remaining(npc_id, trigger_type, now) <= Duration::zero()
    }

    /// Time left before the NPC may answer this kind of trigger.
    pub fn remaining(&self, npc_id: &NpcId, trigger_type: TriggerType, now: DateTime<Utc>) -> Duration {
        match self.last_message.get(npc_id) {
            Some(last) => {
                let left = self.cooldown_for(trigger_type) - (now - *last);
                left.max(Duration::zero())
            }
            None => Duration::zero(),
        }
    }

    /// Record that an NPC just sent a message.
    pub fn record(&mut self, npc_id: NpcId, at: DateTime<Utc>) {
        self.last_message.insert(npc_id, at);
    }

    pub fn last_message(&self, npc_id: &NpcId) -> Option<DateTime<Utc>> {
        self.last_message.get(npc_id).copied()
    }

    pub fn clear(&mut self) {
        self.last_message.clear();
    }
}

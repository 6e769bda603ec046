//! The per-room conversation engine.
//!
//! One engine serves one room. Analysis is a pure function of the snapshot;
//! execution books responders, asks the generator for their messages and
//! stamps the cooldown of every NPC that actually spoke.

mod cooldown;
mod registry;
mod scheduler;

pub use cooldown::*;
pub use registry::*;
pub use scheduler::*;

use futures_util::future::join_all;
use npc_roster::{NpcDirectory, NpcId, PlayerId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::generation::{NpcMessageContext, NpcMessageGenerator, NpcResponse};
use crate::snapshot::ConversationSnapshot;
use crate::triggers::{detect_triggers, ConversationTrigger, ResponderTables, TriggerType};

/// A message an NPC should post, and the trigger that caused it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedNpcMessage {
    pub npc_id: NpcId,
    pub trigger_type: TriggerType,
    pub target_user_id: Option<PlayerId>,
    pub response: NpcResponse,
}

pub struct ConversationEngine {
    config: EngineConfig,
    tables: Arc<ResponderTables>,
    directory: Arc<NpcDirectory>,
    generator: Arc<dyn NpcMessageGenerator>,
    clock: Arc<dyn Clock>,
    cooldowns: CooldownTracker,
}

impl ConversationEngine {
    /// Create an engine with default configuration and the civic tables.
    pub fn new(
        directory: Arc<NpcDirectory>,
        generator: Arc<dyn NpcMessageGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let config = EngineConfig::default();
        Self {
            cooldowns: CooldownTracker::from_config(&config),
            config,
            tables: Arc::new(ResponderTables::civic()),
            directory,
            generator,
            clock,
        }
    }

    /// Replace the configuration. Existing cooldown timestamps are kept.
    ///
    /// The config is not re-validated here; load it through
    /// [`EngineConfig::from_toml_str`] or call [`EngineConfig::validate`] first.
    /// Out-of-range cooldowns are clamped rather than rejected.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.cooldowns.reconfigure(&config);
        self.config = config;
        self
    }

    pub fn with_tables(mut self, tables: Arc<ResponderTables>) -> Self {
        self.tables = tables;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cooldowns(&self) -> &CooldownTracker {
        &self.cooldowns
    }

    pub fn reset_cooldowns(&mut self) {
        self.cooldowns.clear();
    }

    /// Detect triggers in the snapshot, highest priority first.
    ///
    /// Equal priorities keep detector order. The batch cap is applied at execution.
    #[tracing::instrument(skip_all, fields(room_id = %snapshot.room_id))]
    pub fn analyze_conversation(&self, snapshot: &ConversationSnapshot) -> Vec<ConversationTrigger> {
        let mut triggers = detect_triggers(snapshot, &self.tables, &self.config);
        triggers.sort_by(|a, b| b.priority.cmp(&a.priority));

        debug!(
            count = triggers.len(),
            types = ?triggers.iter().map(|t| t.trigger_type).collect::<Vec<_>>(),
            "Conversation analyzed"
        );
        triggers
    }

    /// Voice the top triggers of a batch.
    ///
    /// Never fails: NPCs without personality data, and generations that fail,
    /// time out or come back empty simply contribute nothing.
    #[tracing::instrument(skip_all, fields(room_id = %snapshot.room_id))]
    pub async fn execute_conversation_triggers(
        &mut self,
        snapshot: &ConversationSnapshot,
        triggers: &[ConversationTrigger],
    ) -> Vec<GeneratedNpcMessage> {
        let now = self.clock.now();
        let plan = plan_responses(triggers, snapshot, &self.cooldowns, now, &self.config);

        let mut jobs = Vec::with_capacity(plan.len());
        for planned in plan {
            if self.directory.get(&planned.npc_id).is_none() {
                warn!(npc = %planned.npc_id, "No personality data for NPC, skipping");
                continue;
            }
            let context = NpcMessageContext::build(
                planned.trigger,
                &planned.npc_id,
                snapshot,
                &self.tables,
                &self.config,
            );
            jobs.push((planned, context));
        }

        let generator = Arc::clone(&self.generator);
        let timeout = self.config.generation_timeout();
        let outcomes = join_all(jobs.into_iter().map(|(planned, context)| {
            let generator = Arc::clone(&generator);
            async move {
                let response = generate_one(generator.as_ref(), context, timeout).await;
                (planned, response)
            }
        }))
        .await;

        let mut results = Vec::new();
        for (planned, response) in outcomes {
            let Some(response) = response else {
                continue;
            };

            self.cooldowns.record(planned.npc_id.clone(), now);
            info!(
                npc = %planned.npc_id,
                trigger = %planned.trigger.trigger_type,
                tone = ?response.tone,
                "NPC message generated"
            );
            results.push(GeneratedNpcMessage {
                npc_id: planned.npc_id,
                trigger_type: planned.trigger.trigger_type,
                target_user_id: planned.trigger.target_user_id,
                response,
            });
        }

        results
    }

    /// Analyze and execute in one step; what the room loop calls each tick.
    pub async fn tick(&mut self, snapshot: &ConversationSnapshot) -> Vec<GeneratedNpcMessage> {
        let triggers = self.analyze_conversation(snapshot);
        if triggers.is_empty() {
            return Vec::new();
        }
        self.execute_conversation_triggers(snapshot, &triggers).await
    }
}

async fn generate_one(
    generator: &dyn NpcMessageGenerator,
    context: NpcMessageContext,
    timeout: Option<Duration>,
) -> Option<NpcResponse> {
    let npc_id = context.npc_id.clone();

    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, generator.generate(context)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(npc = %npc_id, timeout_ms = limit.as_millis() as u64, "NPC message generation timed out");
                return None;
            }
        },
        None => generator.generate(context).await,
    };

    match result {
        Ok(Some(response)) if !response.message.trim().is_empty() => Some(response),
        Ok(Some(_)) => {
            debug!(npc = %npc_id, "Generator returned an empty message");
            None
        }
        Ok(None) => {
            debug!(npc = %npc_id, "Generator declined to speak");
            None
        }
        Err(e) => {
            warn!(npc = %npc_id, error = %e, "NPC message generation failed");
            None
        }
    }
}

//! Trigger aggregation - which triggers run this batch, and who answers them.

use chrono::{DateTime, Utc};
use npc_roster::NpcId;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::CooldownTracker;
use crate::config::EngineConfig;
use crate::snapshot::ConversationSnapshot;
use crate::triggers::ConversationTrigger;

/// One NPC booked to answer one trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedResponse<'t> {
    pub trigger: &'t ConversationTrigger,
    pub npc_id: NpcId,
}

/// Order triggers by priority (stable), cap the batch, and book responders.
///
/// An NPC is booked at most once per batch, and only if its cooldown for the
/// trigger's type has elapsed.
pub fn plan_responses<'t>(
    triggers: &'t [ConversationTrigger],
    snapshot: &ConversationSnapshot,
    cooldowns: &CooldownTracker,
    now: DateTime<Utc>,
    config: &EngineConfig,
) -> Vec<PlannedResponse<'t>> {
    let mut ordered: Vec<&ConversationTrigger> = triggers.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut booked: HashSet<NpcId> = HashSet::new();
    let mut plan = Vec::new();

    for trigger in ordered.into_iter().take(config.max_triggers_per_batch) {
        let limit = if trigger.is_conflict() {
            1
        } else {
            config.max_responders_per_trigger
        };

        for npc_id in responders_for(trigger, snapshot, limit) {
            if booked.contains(&npc_id) {
                debug!(npc = %npc_id, trigger = %trigger.trigger_type, "NPC already booked this batch");
                continue;
            }
            if !cooldowns.can_respond(&npc_id, trigger.trigger_type, now) {
                debug!(
                    npc = %npc_id,
                    trigger = %trigger.trigger_type,
                    remaining_ms = cooldowns.remaining(&npc_id, trigger.trigger_type, now).num_milliseconds(),
                    "NPC on cooldown"
                );
                continue;
            }

            booked.insert(npc_id.clone());
            plan.push(PlannedResponse { trigger, npc_id });
        }
    }

    plan
}

/// Suggested NPCs still in the room, or any seated NPC when there are none.
fn responders_for(
    trigger: &ConversationTrigger,
    snapshot: &ConversationSnapshot,
    limit: usize,
) -> Vec<NpcId> {
    let seated: Vec<NpcId> = trigger
        .suggested_npcs
        .iter()
        .filter(|id| snapshot.has_npc(id))
        .cloned()
        .collect();

    if seated.len() < trigger.suggested_npcs.len() {
        warn!(
            trigger = %trigger.trigger_type,
            dropped = trigger.suggested_npcs.len() - seated.len(),
            "Suggested NPCs not in room"
        );
    }

    if seated.is_empty() {
        return snapshot
            .npc_ids_present()
            .into_iter()
            .take(1)
            .cloned()
            .collect();
    }

    seated.into_iter().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RoomPlayer;
    use crate::triggers::{priority, TriggerType};
    use npc_roster::RoomId;

    fn snapshot_with(npcs: &[&str]) -> ConversationSnapshot {
        let mut snapshot = ConversationSnapshot::new(RoomId::new("TEST"));
        snapshot.players.push(RoomPlayer::human("Ada"));
        for id in npcs {
            snapshot.players.push(RoomPlayer::npc(*id, *id));
        }
        snapshot
    }

    fn trigger(trigger_type: TriggerType, priority: u8, npcs: &[&str]) -> ConversationTrigger {
        ConversationTrigger::new(trigger_type, priority, "")
            .with_suggested(npcs.iter().map(|id| NpcId::new(*id)).collect())
    }

    fn booked<'a>(plan: &'a [PlannedResponse<'_>]) -> Vec<(TriggerType, &'a str)> {
        plan.iter()
            .map(|p| (p.trigger.trigger_type, p.npc_id.as_str()))
            .collect()
    }

    #[test]
    fn test_priority_order_and_batch_cap() {
        let snapshot = snapshot_with(&["a", "b", "c", "d"]);
        let triggers = vec![
            trigger(TriggerType::NpcInteraction, priority::NPC_INTERACTION, &["a"]),
            trigger(TriggerType::SilenceBreak, priority::SILENCE_BREAK, &["b"]),
            trigger(TriggerType::ConflictResolution, priority::CONFLICT_RESOLUTION, &["c"]),
            trigger(TriggerType::Encouragement, priority::ENCOURAGEMENT, &["d"]),
        ];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());

        // Silence break and encouragement tie at 6; the earlier one wins
        assert_eq!(
            booked(&plan),
            vec![
                (TriggerType::ConflictResolution, "c"),
                (TriggerType::SilenceBreak, "b"),
            ]
        );
    }

    #[test]
    fn test_conflict_gets_one_responder() {
        let snapshot = snapshot_with(&["a", "b", "c"]);
        let triggers = vec![trigger(
            TriggerType::ConflictResolution,
            priority::CONFLICT_RESOLUTION,
            &["a", "b", "c"],
        )];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());
        assert_eq!(booked(&plan), vec![(TriggerType::ConflictResolution, "a")]);
    }

    #[test]
    fn test_other_triggers_get_up_to_two() {
        let snapshot = snapshot_with(&["a", "b", "c"]);
        let triggers = vec![trigger(
            TriggerType::EducationalMoment,
            priority::QUESTION,
            &["a", "b", "c"],
        )];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_absent_suggestions_are_filtered() {
        let snapshot = snapshot_with(&["b"]);
        let triggers = vec![trigger(TriggerType::EducationalMoment, priority::QUESTION, &["a", "b"])];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());
        assert_eq!(booked(&plan), vec![(TriggerType::EducationalMoment, "b")]);
    }

    #[test]
    fn test_empty_suggestions_fall_back_to_first_seated_npc() {
        let snapshot = snapshot_with(&["x", "y"]);
        let triggers = vec![trigger(TriggerType::SilenceBreak, priority::SILENCE_BREAK, &[])];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());
        assert_eq!(booked(&plan), vec![(TriggerType::SilenceBreak, "x")]);

        let empty_room = snapshot_with(&[]);
        assert!(plan_responses(&triggers, &empty_room, &tracker, Utc::now(), &EngineConfig::default()).is_empty());
    }

    #[test]
    fn test_npc_booked_once_per_batch() {
        let snapshot = snapshot_with(&["a", "b"]);
        let triggers = vec![
            trigger(TriggerType::EducationalMoment, priority::QUESTION, &["a"]),
            trigger(TriggerType::NpcInteraction, priority::NPC_INTERACTION, &["a", "b"]),
        ];
        let tracker = CooldownTracker::from_config(&EngineConfig::default());

        let plan = plan_responses(&triggers, &snapshot, &tracker, Utc::now(), &EngineConfig::default());
        assert_eq!(
            booked(&plan),
            vec![
                (TriggerType::EducationalMoment, "a"),
                (TriggerType::NpcInteraction, "b"),
            ]
        );
    }

    #[test]
    fn test_cooling_npc_is_skipped_not_replaced() {
        let snapshot = snapshot_with(&["a", "b", "c"]);
        let triggers = vec![trigger(TriggerType::EducationalMoment, priority::QUESTION, &["a", "b", "c"])];
        let now = Utc::now();
        let mut tracker = CooldownTracker::from_config(&EngineConfig::default());
        tracker.record(NpcId::new("a"), now);

        let plan = plan_responses(&triggers, &snapshot, &tracker, now, &EngineConfig::default());
        assert_eq!(booked(&plan), vec![(TriggerType::EducationalMoment, "b")]);
    }
}

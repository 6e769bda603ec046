//! Conversation triggers - detected opportunities for an NPC to speak.
//!
//! Triggers are rebuilt from scratch on every analysis and consumed by the
//! scheduler in the same call; nothing here is persisted between calls.

mod detectors;
mod tables;

pub use detectors::*;
pub use tables::*;

use npc_roster::{NpcId, NpcTriggerType, PlayerId};
use serde::{Deserialize, Serialize};

/// Why an NPC should speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    SilenceBreak,
    ConflictResolution,
    Encouragement,
    EducationalMoment,
    NpcInteraction,
    /// Not produced by any detector; exists for the generator mapping only.
    Celebration,
}

impl TriggerType {
    /// Collapse onto the situation vocabulary the message generator understands.
    pub fn npc_trigger_type(self) -> NpcTriggerType {
        match self {
            TriggerType::SilenceBreak | TriggerType::Encouragement => {
                NpcTriggerType::OnEncouragementNeeded
            }
            TriggerType::ConflictResolution | TriggerType::EducationalMoment => {
                NpcTriggerType::OnHelpRequest
            }
            TriggerType::NpcInteraction | TriggerType::Celebration => {
                NpcTriggerType::OnCorrectAnswer
            }
        }
    }

    /// Whether the generator gets a situation-specific instruction for this trigger.
    pub fn needs_instruction(self) -> bool {
        matches!(
            self,
            TriggerType::ConflictResolution | TriggerType::EducationalMoment
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::SilenceBreak => "silence_break",
            TriggerType::ConflictResolution => "conflict_resolution",
            TriggerType::Encouragement => "encouragement",
            TriggerType::EducationalMoment => "educational_moment",
            TriggerType::NpcInteraction => "npc_interaction",
            TriggerType::Celebration => "celebration",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trigger priorities, 1-10. Only conflict resolution uses 10.
pub mod priority {
    pub const CONFLICT_RESOLUTION: u8 = 10;
    pub const MISCONCEPTION: u8 = 8;
    pub const QUESTION: u8 = 7;
    pub const SILENCE_BREAK: u8 = 6;
    pub const ENCOURAGEMENT: u8 = 6;
    pub const NPC_INTERACTION: u8 = 4;
}

/// A detected need for an NPC to speak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTrigger {
    pub trigger_type: TriggerType,
    pub priority: u8,
    /// The human player the trigger concerns.
    pub target_user_id: Option<PlayerId>,
    /// Rationale for logs; never shown to players.
    pub context: String,
    /// NPCs that may respond, already filtered to those in the room.
    pub suggested_npcs: Vec<NpcId>,
}

impl ConversationTrigger {
    pub fn new(trigger_type: TriggerType, priority: u8, context: impl Into<String>) -> Self {
        Self {
            trigger_type,
            priority,
            target_user_id: None,
            context: context.into(),
            suggested_npcs: Vec::new(),
        }
    }

    pub fn with_target(mut self, player_id: PlayerId) -> Self {
        self.target_user_id = Some(player_id);
        self
    }

    pub fn with_suggested(mut self, npcs: Vec<NpcId>) -> Self {
        self.suggested_npcs = npcs;
        self
    }

    pub fn is_conflict(&self) -> bool {
        self.trigger_type == TriggerType::ConflictResolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_type_mapping_is_total() {
        use NpcTriggerType::*;

        let cases = [
            (TriggerType::SilenceBreak, OnEncouragementNeeded),
            (TriggerType::Encouragement, OnEncouragementNeeded),
            (TriggerType::ConflictResolution, OnHelpRequest),
            (TriggerType::EducationalMoment, OnHelpRequest),
            (TriggerType::NpcInteraction, OnCorrectAnswer),
            (TriggerType::Celebration, OnCorrectAnswer),
        ];
        for (trigger, expected) in cases {
            assert_eq!(trigger.npc_trigger_type(), expected, "{}", trigger);
        }
    }

    #[test]
    fn test_instruction_only_for_conflict_and_education() {
        assert!(TriggerType::ConflictResolution.needs_instruction());
        assert!(TriggerType::EducationalMoment.needs_instruction());
        assert!(!TriggerType::SilenceBreak.needs_instruction());
        assert!(!TriggerType::Celebration.needs_instruction());
    }

    #[test]
    fn test_trigger_builder() {
        let player = PlayerId::new();
        let trigger = ConversationTrigger::new(TriggerType::Encouragement, priority::ENCOURAGEMENT, "struggling")
            .with_target(player)
            .with_suggested(vec![NpcId::new("civics_teacher")]);

        assert_eq!(trigger.target_user_id, Some(player));
        assert_eq!(trigger.suggested_npcs.len(), 1);
        assert!(!trigger.is_conflict());
    }
}

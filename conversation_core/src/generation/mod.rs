//! Response materialization - the context handed to the message generator.
//!
//! For each (trigger, NPC) pair the engine builds an [`NpcMessageContext`]:
//! 1. **Trigger**: collapse the trigger type onto the generator's vocabulary
//! 2. **Mood**: infer how the target player is feeling from their accuracy
//! 3. **History**: the last few chat messages, tagged by speaker
//! 4. **Quiz**: current topic plus player and room performance
//! 5. **Instruction**: situation-specific steering text for conflicts and questions

mod canned;
mod port;

pub use canned::*;
pub use port::*;

use chrono::{DateTime, Utc};
use npc_roster::{NpcId, NpcTriggerType, PlayerId, RoomId};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::snapshot::{ConversationSnapshot, Difficulty, MessageType, PlayerPerformance};
use crate::triggers::{ConversationTrigger, ResponderTables, TriggerType};

/// How the target player is likely feeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMood {
    Frustrated,
    Struggling,
    Neutral,
    Confident,
}

impl UserMood {
    /// Infer mood from accuracy; no answers means no signal.
    pub fn from_performance(performance: Option<&PlayerPerformance>) -> Self {
        let Some(performance) = performance.filter(|p| p.total_answered > 0) else {
            return UserMood::Neutral;
        };

        let accuracy = performance.accuracy();
        if accuracy < 0.3 {
            UserMood::Frustrated
        } else if accuracy < 0.5 {
            UserMood::Struggling
        } else if accuracy > 0.8 {
            UserMood::Confident
        } else {
            UserMood::Neutral
        }
    }
}

/// One line of chat history as the generator sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub speaker: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
}

/// Aggregate performance of the human players in the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomPerformance {
    /// Mean accuracy in percent.
    pub average_score: f64,
    pub player_count: usize,
    // Always 1 until the room tracks standings.
    pub rank: u32,
}

impl Default for RoomPerformance {
    fn default() -> Self {
        Self {
            average_score: 0.0,
            player_count: 0,
            rank: 1,
        }
    }
}

impl RoomPerformance {
    /// Summarize human players; those who have not answered yet are not averaged.
    pub fn from_snapshot(snapshot: &ConversationSnapshot) -> Self {
        let accuracies: Vec<f64> = snapshot
            .humans()
            .filter_map(|p| p.performance)
            .filter(|perf| perf.total_answered > 0)
            .map(|perf| perf.accuracy())
            .collect();

        let average_score = if accuracies.is_empty() {
            0.0
        } else {
            accuracies.iter().sum::<f64>() / accuracies.len() as f64 * 100.0
        };

        Self {
            average_score,
            player_count: snapshot.humans().count(),
            rank: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizContext {
    pub current_topic: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// The target player's performance, if there is a target.
    pub user_performance: Option<PlayerPerformance>,
    pub room_performance: RoomPerformance,
}

/// Everything the generator needs to voice one NPC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcMessageContext {
    pub npc_id: NpcId,
    pub room_id: RoomId,
    pub target_player_id: Option<PlayerId>,
    pub trigger_type: NpcTriggerType,
    pub user_mood: UserMood,
    pub conversation_history: Vec<HistoryEntry>,
    pub quiz_context: QuizContext,
    /// Advisory steering text; passed through untouched.
    pub situation_instruction: Option<String>,
}

impl NpcMessageContext {
    /// Build the generator context for one NPC answering one trigger.
    pub fn build(
        trigger: &ConversationTrigger,
        npc_id: &NpcId,
        snapshot: &ConversationSnapshot,
        tables: &ResponderTables,
        config: &EngineConfig,
    ) -> Self {
        let target_performance = trigger
            .target_user_id
            .and_then(|id| snapshot.get_player(id))
            .and_then(|p| p.performance);

        let user_mood = if trigger.target_user_id.is_some() {
            UserMood::from_performance(target_performance.as_ref())
        } else {
            UserMood::Neutral
        };

        let conversation_history = snapshot
            .last_messages(config.history_length)
            .iter()
            .map(|m| HistoryEntry {
                speaker: snapshot.speaker_name(m.player_id),
                message: m.text.clone(),
                timestamp: m.timestamp,
                message_type: m.message_type,
            })
            .collect();

        let situation_instruction = match trigger.trigger_type {
            TriggerType::ConflictResolution => Some(tables.conflict_instruction(npc_id).to_string()),
            TriggerType::EducationalMoment => {
                Some(tables.educational_instruction(npc_id).to_string())
            }
            _ => None,
        };

        Self {
            npc_id: npc_id.clone(),
            room_id: snapshot.room_id.clone(),
            target_player_id: trigger.target_user_id,
            trigger_type: trigger.trigger_type.npc_trigger_type(),
            user_mood,
            conversation_history,
            quiz_context: QuizContext {
                current_topic: snapshot.current_question.as_ref().map(|q| q.category.clone()),
                difficulty: snapshot.current_question.as_ref().map(|q| q.difficulty),
                user_performance: target_performance,
                room_performance: RoomPerformance::from_snapshot(snapshot),
            },
            situation_instruction,
        }
    }

    /// Format the context as a prompt string.
    pub fn to_prompt_string(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str("## Situation\n");
        prompt.push_str(&format!(
            "Trigger: {:?}, player mood: {:?}\n\n",
            self.trigger_type, self.user_mood
        ));

        prompt.push_str("## Quiz\n");
        if let Some(topic) = &self.quiz_context.current_topic {
            prompt.push_str(&format!("Topic: {}\n", topic));
        }
        if let Some(perf) = &self.quiz_context.user_performance {
            prompt.push_str(&format!(
                "Player score: {}/{}\n",
                perf.correct_answers, perf.total_answered
            ));
        }
        let room = &self.quiz_context.room_performance;
        prompt.push_str(&format!(
            "Room average: {:.0}% across {} player(s)\n\n",
            room.average_score, room.player_count
        ));

        if !self.conversation_history.is_empty() {
            prompt.push_str("## Recent Chat\n");
            for entry in &self.conversation_history {
                prompt.push_str(&format!("- {}: {}\n", entry.speaker, entry.message));
            }
            prompt.push('\n');
        }

        if let Some(instruction) = &self.situation_instruction {
            prompt.push_str("## Instruction\n");
            prompt.push_str(instruction);
            prompt.push('\n');
        }

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{ChatMessage, CurrentQuestion, RoomPlayer};
    use crate::triggers::priority;

    fn room() -> (ConversationSnapshot, RoomPlayer, RoomPlayer) {
        let mut snapshot = ConversationSnapshot::new(RoomId::new("TEST"));
        let ada = RoomPlayer::human("Ada").with_performance(1, 5);
        let bob = RoomPlayer::human("Bob").with_performance(9, 10);
        snapshot.players.push(ada.clone());
        snapshot.players.push(bob.clone());
        snapshot.players.push(RoomPlayer::npc("civics_teacher", "Ms. Rodriguez"));
        (snapshot, ada, bob)
    }

    #[test]
    fn test_mood_bands() {
        let mood = |c, t| UserMood::from_performance(Some(&PlayerPerformance::new(c, t)));
        assert_eq!(mood(1, 5), UserMood::Frustrated);
        assert_eq!(mood(2, 5), UserMood::Struggling);
        assert_eq!(mood(3, 5), UserMood::Neutral);
        assert_eq!(mood(4, 5), UserMood::Neutral);
        assert_eq!(mood(9, 10), UserMood::Confident);
        assert_eq!(mood(0, 0), UserMood::Neutral);
        assert_eq!(UserMood::from_performance(None), UserMood::Neutral);
    }

    #[test]
    fn test_room_performance_counts_humans_only() {
        let (mut snapshot, _, _) = room();
        snapshot
            .players
            .push(RoomPlayer::npc("political_scholar", "Dr. Chen").with_performance(10, 10));
        snapshot.players.push(RoomPlayer::human("Cy"));

        let summary = RoomPerformance::from_snapshot(&snapshot);
        assert_eq!(summary.player_count, 3);
        // (0.2 + 0.9) / 2
        assert!((summary.average_score - 55.0).abs() < 1e-9);
        assert_eq!(summary.rank, 1);
    }

    #[test]
    fn test_encouragement_context() {
        let (snapshot, ada, _) = room();
        let trigger = ConversationTrigger::new(TriggerType::Encouragement, priority::ENCOURAGEMENT, "")
            .with_target(ada.id);

        let context = NpcMessageContext::build(
            &trigger,
            &NpcId::new("civics_teacher"),
            &snapshot,
            &ResponderTables::civic(),
            &EngineConfig::default(),
        );

        assert_eq!(context.trigger_type, NpcTriggerType::OnEncouragementNeeded);
        assert_eq!(context.user_mood, UserMood::Frustrated);
        assert_eq!(context.quiz_context.user_performance, ada.performance);
        assert!(context.situation_instruction.is_none());
    }

    #[test]
    fn test_untargeted_trigger_is_neutral() {
        let (snapshot, _, _) = room();
        let trigger =
            ConversationTrigger::new(TriggerType::SilenceBreak, priority::SILENCE_BREAK, "");

        let context = NpcMessageContext::build(
            &trigger,
            &NpcId::new("civics_teacher"),
            &snapshot,
            &ResponderTables::civic(),
            &EngineConfig::default(),
        );
        assert_eq!(context.user_mood, UserMood::Neutral);
        assert!(context.quiz_context.user_performance.is_none());
    }

    #[test]
    fn test_conflict_context_carries_instruction_and_history() {
        let (mut snapshot, ada, bob) = room();
        let tables = ResponderTables::civic();
        for i in 0..7 {
            let speaker = if i % 2 == 0 { &ada } else { &bob };
            snapshot
                .recent_messages
                .push(ChatMessage::from_player(speaker, format!("line {}", i), Utc::now()));
        }
        snapshot.current_question = Some(CurrentQuestion {
            id: "q7".to_string(),
            category: "constitution".to_string(),
            difficulty: Difficulty::Hard,
            text: "What does the 10th amendment reserve?".to_string(),
        });
        let trigger = ConversationTrigger::new(
            TriggerType::ConflictResolution,
            priority::CONFLICT_RESOLUTION,
            "",
        );
        let teacher = NpcId::new("civics_teacher");

        let context = NpcMessageContext::build(
            &trigger,
            &teacher,
            &snapshot,
            &tables,
            &EngineConfig::default(),
        );

        assert_eq!(context.trigger_type, NpcTriggerType::OnHelpRequest);
        assert_eq!(
            context.situation_instruction.as_deref(),
            Some(tables.conflict_instruction(&teacher))
        );
        assert_eq!(context.conversation_history.len(), 5);
        assert_eq!(context.conversation_history[0].message, "line 2");
        assert_eq!(context.conversation_history[0].speaker, "Ada");
        assert_eq!(context.quiz_context.current_topic.as_deref(), Some("constitution"));

        let prompt = context.to_prompt_string();
        assert!(prompt.contains("Topic: constitution"));
        assert!(prompt.contains("- Bob: line 3"));
        assert!(prompt.contains("## Instruction"));
    }

    #[test]
    fn test_educational_context_uses_default_instruction() {
        let (snapshot, ada, _) = room();
        let tables = ResponderTables::civic();
        let trigger = ConversationTrigger::new(TriggerType::EducationalMoment, priority::QUESTION, "")
            .with_target(ada.id);

        let context = NpcMessageContext::build(
            &trigger,
            &NpcId::new("local_organizer"),
            &snapshot,
            &tables,
            &EngineConfig::default(),
        );
        assert_eq!(
            context.situation_instruction.as_deref(),
            Some(tables.default_educational_instruction.as_str())
        );

        let json = serde_json::to_value(&context).unwrap();
        assert_eq!(json["trigger_type"], "on_help_request");
        assert_eq!(json["user_mood"], "frustrated");
    }
}

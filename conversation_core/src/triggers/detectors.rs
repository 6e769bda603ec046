//! The five trigger detectors.
//!
//! Each detector is a pure function of the snapshot returning zero or one
//! trigger. They run unconditionally and independently; ordering between them
//! only matters as the tie-break for equal priorities.

use npc_roster::{NpcId, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{priority, ConversationTrigger, ResponderTables, TriggerType};
use crate::config::EngineConfig;
use crate::snapshot::{ChatMessage, ConflictLevel, ConversationSnapshot, GameState};

const HOSTILE_PHRASE_SCORE: u32 = 2;
const PERSONAL_ATTACK_SCORE: u32 = 5;
const SHOUTING_SCORE: u32 = 3;
const SHOUTING_MIN_CHARS: usize = 10;

/// Run every detector against the snapshot, in tie-break order.
pub fn detect_triggers(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Vec<ConversationTrigger> {
    [
        detect_silence_break(snapshot, tables, config),
        detect_conflict(snapshot, tables, config),
        detect_educational_moment(snapshot, tables, config),
        detect_npc_interaction(snapshot, tables, config),
        detect_encouragement(snapshot, tables, config),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Break a long silence in the lobby with a chatty NPC.
pub fn detect_silence_break(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Option<ConversationTrigger> {
    if snapshot.game_state != GameState::Waiting
        || snapshot.silent_duration <= config.silence_threshold_secs
    {
        return None;
    }

    debug!(
        silent_secs = snapshot.silent_duration,
        "Silence break detected"
    );
    Some(
        ConversationTrigger::new(
            TriggerType::SilenceBreak,
            priority::SILENCE_BREAK,
            format!("Room silent for {:.0}s while waiting", snapshot.silent_duration),
        )
        .with_suggested(present(&tables.chatty, snapshot, 1, None)),
    )
}

/// Hostility found in the recent human chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConflictAnalysis {
    pub score: u32,
    pub has_personal_attack: bool,
    /// Authors of scoring messages, oldest first.
    pub flagged_player_ids: Vec<PlayerId>,
}

impl ConflictAnalysis {
    /// Whether the conflict detector should fire.
    pub fn is_conflict(&self, threshold: u32) -> bool {
        self.score >= threshold || self.has_personal_attack
    }

    /// Coarse level, suitable for the snapshot's `conflict_level` field.
    pub fn level(&self) -> ConflictLevel {
        match self.score {
            0 => ConflictLevel::None,
            s if s >= 10 => ConflictLevel::Severe,
            s if s >= 5 || self.has_personal_attack => ConflictLevel::Moderate,
            _ => ConflictLevel::Mild,
        }
    }
}

/// Score the trailing conflict window. NPC messages never count.
pub fn analyze_conflict(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> ConflictAnalysis {
    let mut analysis = ConflictAnalysis::default();

    for message in snapshot.last_messages(config.conflict_window) {
        if message.is_from_npc {
            continue;
        }

        let text = normalize(&message.text);
        let mut message_score = 0;

        message_score += HOSTILE_PHRASE_SCORE * count_hits(&text, &tables.hostile_phrases);

        let attacks = count_hits(&text, &tables.personal_attack_phrases);
        if attacks > 0 {
            message_score += PERSONAL_ATTACK_SCORE * attacks;
            analysis.has_personal_attack = true;
        }

        if is_shouting(&message.text) {
            message_score += SHOUTING_SCORE;
        }

        if message_score > 0 && !analysis.flagged_player_ids.contains(&message.player_id) {
            analysis.flagged_player_ids.push(message.player_id);
        }
        analysis.score += message_score;
    }

    analysis
}

/// De-escalate hostile chat with exactly one diplomatic NPC.
pub fn detect_conflict(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Option<ConversationTrigger> {
    let analysis = analyze_conflict(snapshot, tables, config);
    if !analysis.is_conflict(config.conflict_threshold) {
        return None;
    }

    debug!(
        score = analysis.score,
        personal_attack = analysis.has_personal_attack,
        reported_level = ?snapshot.conflict_level,
        "Conflict detected"
    );
    Some(
        ConversationTrigger::new(
            TriggerType::ConflictResolution,
            priority::CONFLICT_RESOLUTION,
            format!(
                "Conflict score {} (personal attack: {}) from {} player(s)",
                analysis.score,
                analysis.has_personal_attack,
                analysis.flagged_player_ids.len()
            ),
        )
        .with_suggested(present(&tables.diplomatic, snapshot, 1, None)),
    )
}

/// A human asked a question or voiced a misconception.
pub fn detect_educational_moment(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Option<ConversationTrigger> {
    for message in snapshot.last_messages(config.educational_window) {
        if message.is_from_npc {
            continue;
        }

        let text = normalize(&message.text);
        let (priority, kind) = if contains_any(&text, &tables.question_indicators) {
            (priority::QUESTION, "question")
        } else if contains_any(&text, &tables.misconception_indicators) {
            (priority::MISCONCEPTION, "misconception")
        } else {
            continue;
        };

        debug!(kind, player = %message.player_id, "Educational moment detected");
        return Some(
            ConversationTrigger::new(
                TriggerType::EducationalMoment,
                priority,
                format!("Player {}: \"{}\"", kind, message.text),
            )
            .with_target(message.player_id)
            .with_suggested(topic_experts(&text, snapshot, tables)),
        );
    }

    None
}

/// Let a complementary NPC pick up where another NPC left off.
pub fn detect_npc_interaction(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Option<ConversationTrigger> {
    if snapshot.npc_ids_present().len() < 2 {
        return None;
    }

    let last_npc_message = snapshot.recent_messages.iter().rev().find(|m| m.is_from_npc)?;

    let npc_share = snapshot
        .last_messages(config.npc_interaction_window)
        .iter()
        .filter(|m| m.is_from_npc)
        .count();
    if npc_share >= 2 {
        debug!(npc_share, "NPCs already dominating, no interaction");
        return None;
    }

    let speaker = speaker_npc(snapshot, last_npc_message)?;
    let partners = present(tables.complements_of(speaker), snapshot, 1, Some(speaker));
    if partners.is_empty() {
        debug!(speaker = %speaker, "No complementary NPC seated");
        return None;
    }

    debug!(speaker = %speaker, "NPC interaction opportunity");
    Some(
        ConversationTrigger::new(
            TriggerType::NpcInteraction,
            priority::NPC_INTERACTION,
            format!("Follow up on {}", speaker),
        )
        .with_suggested(partners),
    )
}

/// Cheer up the first human who is struggling.
///
/// A performance record with nothing answered has accuracy 0 and counts as
/// struggling. A player without any record gives no signal.
pub fn detect_encouragement(
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
    config: &EngineConfig,
) -> Option<ConversationTrigger> {
    let struggling = snapshot.humans().find(|player| {
        player
            .performance
            .map(|perf| perf.accuracy() < config.struggling_ratio)
            .unwrap_or(false)
    })?;

    debug!(player = %struggling.id, "Struggling player detected");
    Some(
        ConversationTrigger::new(
            TriggerType::Encouragement,
            priority::ENCOURAGEMENT,
            format!("{} is struggling", struggling.name),
        )
        .with_target(struggling.id)
        .with_suggested(present(&tables.supportive, snapshot, 1, None)),
    )
}

/// Candidates seated in the room, in preference order.
fn present(
    candidates: &[NpcId],
    snapshot: &ConversationSnapshot,
    limit: usize,
    exclude: Option<&NpcId>,
) -> Vec<NpcId> {
    candidates
        .iter()
        .filter(|id| Some(*id) != exclude && snapshot.has_npc(id))
        .take(limit)
        .cloned()
        .collect()
}

fn topic_experts(
    text: &str,
    snapshot: &ConversationSnapshot,
    tables: &ResponderTables,
) -> Vec<NpcId> {
    if let Some(topic) = tables.topic_responders(text) {
        let experts = present(&topic.npcs, snapshot, topic.npcs.len(), None);
        if !experts.is_empty() {
            return experts;
        }
        debug!(topic = %topic.keyword, "No topic expert in room, using fallback");
    }
    present(&tables.knowledgeable, snapshot, 1, None)
}

fn speaker_npc<'a>(snapshot: &'a ConversationSnapshot, message: &ChatMessage) -> Option<&'a NpcId> {
    snapshot
        .get_player(message.player_id)
        .and_then(|p| p.personality_id())
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn count_hits(text: &str, phrases: &[String]) -> u32 {
    phrases.iter().filter(|p| text.contains(p.as_str())).count() as u32
}

fn contains_any(text: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|p| text.contains(p.as_str()))
}

/// All-caps and long enough to read as yelling.
fn is_shouting(text: &str) -> bool {
    text.chars().count() > SHOUTING_MIN_CHARS
        && text.chars().any(char::is_alphabetic)
        && text == text.to_uppercase()
}

//! Read-only view of a quiz room, as handed to the engine by the game loop.

use chrono::{DateTime, Utc};
use npc_roster::{NpcId, PlayerId, RoomId};
use serde::{Deserialize, Serialize};

/// Phase of the quiz game in a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    #[default]
    Waiting,
    InProgress,
    BetweenQuestions,
    Completed,
}

/// Conflict level as computed by the caller. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictLevel {
    #[default]
    None,
    Mild,
    Moderate,
    Severe,
}

/// Classification of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Chat,
    Reaction,
    Hint,
    Encouragement,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Quiz performance of a player so far in the room.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPerformance {
    pub correct_answers: u32,
    pub total_answered: u32,
    /// Average seconds per answer.
    pub average_time: f64,
}

impl PlayerPerformance {
    pub fn new(correct_answers: u32, total_answered: u32) -> Self {
        Self {
            correct_answers,
            total_answered,
            average_time: 0.0,
        }
    }

    /// Fraction of answered questions that were correct; 0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        self.correct_answers as f64 / self.total_answered.max(1) as f64
    }
}

/// A participant in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(rename = "isNPC", default)]
    pub is_npc: bool,
    /// Personality key, only meaningful when `is_npc` is set.
    #[serde(default)]
    pub npc_id: Option<NpcId>,
    #[serde(default)]
    pub is_host: bool,
    #[serde(default)]
    pub performance: Option<PlayerPerformance>,
}

impl RoomPlayer {
    /// Create a human player.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(),
            name: name.into(),
            emoji: String::new(),
            is_npc: false,
            npc_id: None,
            is_host: false,
            performance: None,
        }
    }

    /// Create an NPC seat backed by a personality.
    pub fn npc(npc_id: impl Into<NpcId>, name: impl Into<String>) -> Self {
        Self {
            is_npc: true,
            npc_id: Some(npc_id.into()),
            ..Self::human(name)
        }
    }

    pub fn with_performance(mut self, correct_answers: u32, total_answered: u32) -> Self {
        self.performance = Some(PlayerPerformance::new(correct_answers, total_answered));
        self
    }

    /// The personality key of an NPC seat; `None` for humans.
    pub fn personality_id(&self) -> Option<&NpcId> {
        if self.is_npc {
            self.npc_id.as_ref()
        } else {
            None
        }
    }
}

/// A chat message in the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub player_id: PlayerId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "isFromNPC", default)]
    pub is_from_npc: bool,
    #[serde(default)]
    pub message_type: MessageType,
}

impl ChatMessage {
    pub fn from_player(player: &RoomPlayer, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            player_id: player.id,
            text: text.into(),
            timestamp,
            is_from_npc: player.is_npc,
            message_type: MessageType::Chat,
        }
    }
}

/// The question currently on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentQuestion {
    pub id: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub text: String,
}

/// Everything the engine needs to know about a room for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSnapshot {
    pub room_id: RoomId,
    #[serde(default)]
    pub players: Vec<RoomPlayer>,
    /// Oldest first.
    #[serde(default)]
    pub recent_messages: Vec<ChatMessage>,
    #[serde(default)]
    pub current_question: Option<CurrentQuestion>,
    #[serde(default)]
    pub game_state: GameState,
    /// Seconds since the last human message.
    #[serde(default)]
    pub silent_duration: f64,
    #[serde(default)]
    pub conflict_level: ConflictLevel,
}

impl ConversationSnapshot {
    /// Create an empty snapshot for a waiting room.
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            players: Vec::new(),
            recent_messages: Vec::new(),
            current_question: None,
            game_state: GameState::Waiting,
            silent_duration: 0.0,
            conflict_level: ConflictLevel::None,
        }
    }

    /// Get player by ID.
    pub fn get_player(&self, id: PlayerId) -> Option<&RoomPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Human players in seat order.
    pub fn humans(&self) -> impl Iterator<Item = &RoomPlayer> {
        self.players.iter().filter(|p| !p.is_npc)
    }

    /// Personality keys of NPCs seated in the room, in seat order.
    pub fn npc_ids_present(&self) -> Vec<&NpcId> {
        self.players
            .iter()
            .filter_map(RoomPlayer::personality_id)
            .collect()
    }

    /// Check if an NPC personality is seated in the room.
    pub fn has_npc(&self, npc_id: &NpcId) -> bool {
        self.players
            .iter()
            .any(|p| p.personality_id() == Some(npc_id))
    }

    /// The last `count` messages, oldest first.
    pub fn last_messages(&self, count: usize) -> &[ChatMessage] {
        let start = self.recent_messages.len().saturating_sub(count);
        &self.recent_messages[start..]
    }

    /// Display name of a message author, or the raw id for departed players.
    pub fn speaker_name(&self, player_id: PlayerId) -> String {
        self.get_player(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_handles_no_answers() {
        assert_eq!(PlayerPerformance::new(0, 0).accuracy(), 0.0);
        assert!((PlayerPerformance::new(1, 5).accuracy() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_npc_presence() {
        let mut snapshot = ConversationSnapshot::new(RoomId::new("ROOM1"));
        snapshot.players.push(RoomPlayer::human("Ada"));
        snapshot.players.push(RoomPlayer::npc("news_junkie", "Sam"));

        // A human seat with a stray npc id is not an NPC
        let mut imposter = RoomPlayer::human("Eve");
        imposter.npc_id = Some(NpcId::new("civics_teacher"));
        snapshot.players.push(imposter);

        let present: Vec<_> = snapshot.npc_ids_present().iter().map(|id| id.as_str()).collect();
        assert_eq!(present, vec!["news_junkie"]);
        assert!(snapshot.has_npc(&NpcId::new("news_junkie")));
        assert!(!snapshot.has_npc(&NpcId::new("civics_teacher")));
        assert_eq!(snapshot.humans().count(), 2);
    }

    #[test]
    fn test_last_messages_window() {
        let mut snapshot = ConversationSnapshot::new(RoomId::new("ROOM1"));
        let ada = RoomPlayer::human("Ada");
        for i in 0..4 {
            snapshot
                .recent_messages
                .push(ChatMessage::from_player(&ada, format!("msg {}", i), Utc::now()));
        }

        let last = snapshot.last_messages(3);
        assert_eq!(last.len(), 3);
        assert_eq!(last[0].text, "msg 1");
        assert_eq!(snapshot.last_messages(10).len(), 4);
    }

    #[test]
    fn test_deserialize_web_snapshot() {
        let json = r#"{
            "roomId": "QZ4F",
            "players": [
                {"id": "8f14e45f-ceea-467f-a8f2-5b1e0c9f8a11", "name": "Ada", "emoji": "🦉", "isNPC": false, "isHost": true,
                 "performance": {"correctAnswers": 3, "totalAnswered": 4, "averageTime": 9.5}},
                {"id": "c9f0f895-fb98-4b91-9e1c-6e7f1a0d2b33", "name": "Sam", "emoji": "📰", "isNPC": true, "npcId": "news_junkie"}
            ],
            "recentMessages": [
                {"playerId": "8f14e45f-ceea-467f-a8f2-5b1e0c9f8a11", "text": "hi all", "timestamp": "2025-03-01T18:00:00Z",
                 "isFromNPC": false, "messageType": "chat"}
            ],
            "currentQuestion": {"id": "q1", "category": "voting", "difficulty": "medium", "text": "Who can vote?"},
            "gameState": "in_progress",
            "silentDuration": 12.0,
            "conflictLevel": "mild"
        }"#;

        let snapshot: ConversationSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.room_id.as_str(), "QZ4F");
        assert_eq!(snapshot.game_state, GameState::InProgress);
        assert_eq!(snapshot.conflict_level, ConflictLevel::Mild);
        assert!(snapshot.players[0].is_host);
        assert_eq!(snapshot.players[0].performance.unwrap().correct_answers, 3);
        assert_eq!(snapshot.npc_ids_present()[0].as_str(), "news_junkie");
        assert_eq!(snapshot.speaker_name(snapshot.recent_messages[0].player_id), "Ada");
        assert_eq!(snapshot.current_question.unwrap().difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_non_uuid_player_id_rejects_snapshot() {
        let json = r#"{
            "roomId": "QZ4F",
            "players": [{"id": "guest-42", "name": "Guest", "isNPC": false}]
        }"#;

        assert!(serde_json::from_str::<ConversationSnapshot>(json).is_err());
    }
}

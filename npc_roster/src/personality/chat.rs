//! Canned chat lines and the situations they are used in.

use serde::{Deserialize, Serialize};

/// The situations an NPC reacts to in chat.
///
/// This is the vocabulary the message generator understands; the engine's
/// finer-grained trigger types collapse onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NpcTriggerType {
    OnCorrectAnswer,
    OnIncorrectAnswer,
    OnHelpRequest,
    OnEncouragementNeeded,
    OnGameStart,
    OnGameEnd,
}

/// Pre-written lines an NPC can fall back on, grouped by situation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChatMessages {
    #[serde(default)]
    pub on_correct_answer: Vec<String>,
    #[serde(default)]
    pub on_incorrect_answer: Vec<String>,
    #[serde(default)]
    pub on_help_request: Vec<String>,
    #[serde(default)]
    pub on_encouragement_needed: Vec<String>,
    #[serde(default)]
    pub on_game_start: Vec<String>,
    #[serde(default)]
    pub on_game_end: Vec<String>,
}

impl ChatMessages {
    /// Lines available for a situation.
    pub fn lines_for(&self, trigger: NpcTriggerType) -> &[String] {
        match trigger {
            NpcTriggerType::OnCorrectAnswer => &self.on_correct_answer,
            NpcTriggerType::OnIncorrectAnswer => &self.on_incorrect_answer,
            NpcTriggerType::OnHelpRequest => &self.on_help_request,
            NpcTriggerType::OnEncouragementNeeded => &self.on_encouragement_needed,
            NpcTriggerType::OnGameStart => &self.on_game_start,
            NpcTriggerType::OnGameEnd => &self.on_game_end,
        }
    }

    pub fn with_lines(mut self, trigger: NpcTriggerType, lines: &[&str]) -> Self {
        let lines = lines.iter().map(|l| l.to_string()).collect();
        match trigger {
            NpcTriggerType::OnCorrectAnswer => self.on_correct_answer = lines,
            NpcTriggerType::OnIncorrectAnswer => self.on_incorrect_answer = lines,
            NpcTriggerType::OnHelpRequest => self.on_help_request = lines,
            NpcTriggerType::OnEncouragementNeeded => self.on_encouragement_needed = lines,
            NpcTriggerType::OnGameStart => self.on_game_start = lines,
            NpcTriggerType::OnGameEnd => self.on_game_end = lines,
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.on_correct_answer.is_empty()
            && self.on_incorrect_answer.is_empty()
            && self.on_help_request.is_empty()
            && self.on_encouragement_needed.is_empty()
            && self.on_game_start.is_empty()
            && self.on_game_end.is_empty()
    }
}

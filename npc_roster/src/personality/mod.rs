//! Personality records for NPC participants.

mod chat;

pub use chat::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ids::NpcId;

/// How strong an NPC plays when answering quiz questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

/// A full NPC personality definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcPersonality {
    pub id: NpcId,
    pub name: String,
    pub emoji: String,
    #[serde(default)]
    pub skill_level: SkillLevel,

    /// Civic topics the NPC is strong in (e.g. "constitution", "elections").
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,

    /// Percent of questions answered correctly, inclusive bounds.
    pub accuracy_range: (u8, u8),
    /// Seconds taken to answer a question, inclusive bounds.
    pub response_time_range: (f32, f32),

    #[serde(default)]
    pub chat_messages: ChatMessages,

    // Free-form metadata passed through from the web app (avatar colour, bio, ...)
    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl NpcPersonality {
    /// Create a personality with empty tags and a middling answer profile.
    pub fn new(id: impl Into<NpcId>, name: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: emoji.into(),
            skill_level: SkillLevel::default(),
            specialties: Vec::new(),
            weaknesses: Vec::new(),
            accuracy_range: (50, 70),
            response_time_range: (8.0, 15.0),
            chat_messages: ChatMessages::default(),
            extra: HashMap::new(),
        }
    }

    pub fn with_skill_level(mut self, level: SkillLevel) -> Self {
        self.skill_level = level;
        self
    }

    pub fn with_specialties(mut self, specialties: &[&str]) -> Self {
        self.specialties = specialties.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_weaknesses(mut self, weaknesses: &[&str]) -> Self {
        self.weaknesses = weaknesses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_accuracy(mut self, min: u8, max: u8) -> Self {
        self.accuracy_range = (min, max);
        self
    }

    pub fn with_response_time(mut self, min: f32, max: f32) -> Self {
        self.response_time_range = (min, max);
        self
    }

    pub fn with_chat_messages(mut self, chat_messages: ChatMessages) -> Self {
        self.chat_messages = chat_messages;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_personality() {
        let npc = NpcPersonality::new("news_junkie", "Sam", "📰");
        assert_eq!(npc.id.as_str(), "news_junkie");
        assert_eq!(npc.skill_level, SkillLevel::Intermediate);
        assert!(npc.specialties.is_empty());
        assert_eq!(npc.emoji, "📰");
    }

    #[test]
    fn test_specialties_and_weaknesses() {
        let npc = NpcPersonality::new("constitutional_lawyer", "Priya", "⚖️")
            .with_specialties(&["Constitution", "courts"])
            .with_weaknesses(&["local"]);

        assert_eq!(npc.specialties, vec!["Constitution", "courts"]);
        assert_eq!(npc.weaknesses, vec!["local"]);
    }
}

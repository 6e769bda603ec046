//! Responder lookup tables and keyword lists.
//!
//! Pure data: which NPC archetypes answer which kind of trigger, which pairs of
//! NPCs play off each other, and the phrases the detectors look for. Swap in a
//! custom `ResponderTables` to retune the engine without touching control flow.

use npc_roster::NpcId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// NPCs suited to a topic, keyed by a keyword found in chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicResponders {
    pub keyword: String,
    pub npcs: Vec<NpcId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponderTables {
    /// Talkative personalities that break awkward silences.
    pub chatty: Vec<NpcId>,
    /// Calm personalities that de-escalate arguments.
    pub diplomatic: Vec<NpcId>,
    /// Warm personalities that cheer up struggling players.
    pub supportive: Vec<NpcId>,
    /// Fallback experts for questions with no recognised topic.
    pub knowledgeable: Vec<NpcId>,

    /// Checked in order; the first keyword found in the text wins.
    pub topics: Vec<TopicResponders>,

    /// Who plays well off whom, keyed by the NPC that just spoke.
    pub complements: HashMap<NpcId, Vec<NpcId>>,

    pub conflict_instructions: HashMap<NpcId, String>,
    pub default_conflict_instruction: String,
    pub educational_instructions: HashMap<NpcId, String>,
    pub default_educational_instruction: String,

    /// +2 each.
    pub hostile_phrases: Vec<String>,
    /// +5 each, and marks the window as containing a personal attack.
    pub personal_attack_phrases: Vec<String>,

    pub question_indicators: Vec<String>,
    pub misconception_indicators: Vec<String>,
}

impl Default for ResponderTables {
    fn default() -> Self {
        Self::civic()
    }
}

impl ResponderTables {
    /// Tables matching the built-in civic roster.
    pub fn civic() -> Self {
        Self {
            chatty: ids(&["curious_student", "news_junkie", "activist_advocate", "new_citizen"]),
            diplomatic: ids(&["civics_teacher", "local_organizer", "political_scholar"]),
            supportive: ids(&["civics_teacher", "local_organizer", "new_citizen"]),
            knowledgeable: ids(&["political_scholar", "civics_teacher", "constitutional_lawyer"]),
            topics: vec![
                topic("constitution", &["constitutional_lawyer", "political_scholar", "civics_teacher"]),
                topic("voting", &["election_volunteer", "local_organizer", "activist_advocate"]),
                topic("government", &["retired_civil_servant", "political_scholar", "civics_teacher"]),
                topic("news", &["news_junkie", "political_scholar"]),
                topic("local", &["local_organizer", "retired_civil_servant"]),
            ],
            complements: [
                complement("news_junkie", &["political_scholar", "constitutional_lawyer"]),
                complement("political_scholar", &["news_junkie", "curious_student"]),
                complement("new_citizen", &["civics_teacher", "election_volunteer"]),
                complement("curious_student", &["civics_teacher", "political_scholar"]),
                complement("civics_teacher", &["curious_student", "new_citizen"]),
                complement("activist_advocate", &["retired_civil_servant", "constitutional_lawyer"]),
                complement("retired_civil_servant", &["activist_advocate", "local_organizer"]),
                complement("local_organizer", &["activist_advocate", "new_citizen"]),
                complement("constitutional_lawyer", &["news_junkie", "curious_student"]),
                complement("election_volunteer", &["new_citizen", "local_organizer"]),
            ]
            .into_iter()
            .collect(),
            conflict_instructions: instructions(&[
                (
                    "civics_teacher",
                    "Calmly remind everyone that disagreement is part of democracy, then steer the \
                     group back to the question with a neutral fact.",
                ),
                (
                    "local_organizer",
                    "Acknowledge that people care deeply, invite each side to share one reason for \
                     their view, and model respectful tone.",
                ),
                (
                    "political_scholar",
                    "Offer a short historical example of how this debate has been argued civilly, \
                     and separate the facts from the opinions.",
                ),
            ]),
            default_conflict_instruction: "Gently de-escalate. Do not take sides, do not lecture, \
                and redirect attention to the quiz in one or two sentences."
                .to_string(),
            educational_instructions: instructions(&[
                (
                    "constitutional_lawyer",
                    "Explain by pointing to the relevant constitutional text or landmark case, in \
                     plain language.",
                ),
                (
                    "political_scholar",
                    "Give a concise, accurate explanation with one piece of historical context.",
                ),
                (
                    "civics_teacher",
                    "Break the concept into simple steps and check understanding with a friendly \
                     follow-up question.",
                ),
                (
                    "election_volunteer",
                    "Explain using practical, first-hand experience of how elections are run.",
                ),
                (
                    "news_junkie",
                    "Connect the concept to a recent real-world news story, keeping facts accurate.",
                ),
            ]),
            default_educational_instruction: "Answer the question clearly and accurately. Correct \
                any misconception kindly and keep it under three sentences."
                .to_string(),
            hostile_phrases: strings(&[
                "stupid",
                "idiot",
                "dumb",
                "moron",
                "shut up",
                "whatever",
                "you're wrong",
                "ridiculous",
                "pathetic",
                "loser",
                "who cares",
                "hate",
            ]),
            personal_attack_phrases: strings(&[
                "you always",
                "you never",
                "typical",
                "people like you",
            ]),
            question_indicators: strings(&[
                "how does",
                "what is",
                "why do",
                "i don't understand",
                "confused",
            ]),
            misconception_indicators: strings(&["i thought", "isn't it true that", "but i heard"]),
        }
    }

    /// NPCs for the first topic keyword contained in `text` (already lowercased).
    pub fn topic_responders(&self, text: &str) -> Option<&TopicResponders> {
        self.topics.iter().find(|t| text.contains(t.keyword.as_str()))
    }

    /// Preferred conversation partners of an NPC; empty if it has none.
    pub fn complements_of(&self, npc_id: &NpcId) -> &[NpcId] {
        self.complements
            .get(npc_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn conflict_instruction(&self, npc_id: &NpcId) -> &str {
        self.conflict_instructions
            .get(npc_id)
            .unwrap_or(&self.default_conflict_instruction)
    }

    pub fn educational_instruction(&self, npc_id: &NpcId) -> &str {
        self.educational_instructions
            .get(npc_id)
            .unwrap_or(&self.default_educational_instruction)
    }
}

fn ids(raw: &[&str]) -> Vec<NpcId> {
    raw.iter().map(|id| NpcId::new(*id)).collect()
}

fn strings(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn topic(keyword: &str, npcs: &[&str]) -> TopicResponders {
    TopicResponders {
        keyword: keyword.to_string(),
        npcs: ids(npcs),
    }
}

fn complement(npc: &str, partners: &[&str]) -> (NpcId, Vec<NpcId>) {
    (NpcId::new(npc), ids(partners))
}

fn instructions(raw: &[(&str, &str)]) -> HashMap<NpcId, String> {
    raw.iter()
        .map(|(npc, text)| (NpcId::new(*npc), text.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use npc_roster::NpcDirectory;

    #[test]
    fn test_every_table_entry_is_in_the_civic_roster() {
        let directory = NpcDirectory::civic();
        let tables = ResponderTables::civic();

        let listed = tables
            .chatty
            .iter()
            .chain(&tables.diplomatic)
            .chain(&tables.supportive)
            .chain(&tables.knowledgeable)
            .chain(tables.topics.iter().flat_map(|t| &t.npcs))
            .chain(tables.complements.keys())
            .chain(tables.complements.values().flatten())
            .chain(tables.conflict_instructions.keys())
            .chain(tables.educational_instructions.keys());

        for id in listed {
            assert!(directory.contains(id), "{} missing from roster", id);
        }
    }

    #[test]
    fn test_first_topic_keyword_wins() {
        let tables = ResponderTables::civic();
        let hit = tables
            .topic_responders("is local government bound by the constitution?")
            .unwrap();
        assert_eq!(hit.keyword, "constitution");

        assert!(tables.topic_responders("how does the electoral college work?").is_none());
    }

    #[test]
    fn test_no_npc_complements_itself() {
        let tables = ResponderTables::civic();
        for (npc, partners) in &tables.complements {
            assert!(!partners.contains(npc), "{} complements itself", npc);
        }
        assert!(tables.complements_of(&NpcId::new("unknown")).is_empty());
    }

    #[test]
    fn test_instruction_fallbacks() {
        let tables = ResponderTables::civic();
        let teacher = NpcId::new("civics_teacher");
        let sam = NpcId::new("news_junkie");

        assert!(tables.conflict_instruction(&teacher).contains("disagreement"));
        assert_eq!(
            tables.conflict_instruction(&sam),
            tables.default_conflict_instruction
        );
        assert!(tables.educational_instruction(&sam).contains("news story"));
        assert_eq!(
            tables.educational_instruction(&NpcId::new("curious_student")),
            tables.default_educational_instruction
        );
    }
}

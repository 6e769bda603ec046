//! The NPC directory - read-only lookup of personality records by id.

mod civic;

use serde::Deserialize;
use std::collections::HashMap;

use crate::ids::NpcId;
use crate::personality::NpcPersonality;

/// Errors raised while building a directory.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("Invalid roster TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate NPC id in roster: {0}")]
    DuplicateNpc(NpcId),

    #[error("NPC {id} has an invalid {field} range")]
    InvalidRange { id: NpcId, field: &'static str },
}

/// On-disk roster layout: a list of `[[npc]]` tables.
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    npc: Vec<NpcPersonality>,
}

/// Directory of all known NPC personalities.
///
/// Rooms may reference ids the directory does not know (rosters and
/// directories drift); lookups return `None` for those.
#[derive(Debug, Clone, Default)]
pub struct NpcDirectory {
    personalities: HashMap<NpcId, NpcPersonality>,
    // Insertion order, so listings are stable.
    order: Vec<NpcId>,
}

impl NpcDirectory {
    /// Create a new empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from personality records, rejecting duplicate ids.
    pub fn from_personalities(
        personalities: impl IntoIterator<Item = NpcPersonality>,
    ) -> Result<Self, RosterError> {
        let mut directory = Self::new();
        for personality in personalities {
            directory.insert(personality)?;
        }
        Ok(directory)
    }

    /// Load a directory from a TOML document of `[[npc]]` tables.
    pub fn from_toml_str(source: &str) -> Result<Self, RosterError> {
        let file: RosterFile = toml::from_str(source)?;
        Self::from_personalities(file.npc)
    }

    /// Add a personality to the directory.
    pub fn insert(&mut self, personality: NpcPersonality) -> Result<(), RosterError> {
        validate(&personality)?;
        if self.personalities.contains_key(&personality.id) {
            return Err(RosterError::DuplicateNpc(personality.id));
        }
        self.order.push(personality.id.clone());
        self.personalities.insert(personality.id.clone(), personality);
        Ok(())
    }

    /// Get a personality by id.
    pub fn get(&self, id: &NpcId) -> Option<&NpcPersonality> {
        self.personalities.get(id)
    }

    pub fn contains(&self, id: &NpcId) -> bool {
        self.personalities.contains_key(id)
    }

    /// Iterate over personalities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &NpcPersonality> {
        self.order.iter().filter_map(|id| self.personalities.get(id))
    }

    pub fn len(&self) -> usize {
        self.personalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personalities.is_empty()
    }
}

fn validate(personality: &NpcPersonality) -> Result<(), RosterError> {
    let (min_acc, max_acc) = personality.accuracy_range;
    if min_acc > max_acc || max_acc > 100 {
        return Err(RosterError::InvalidRange {
            id: personality.id.clone(),
            field: "accuracy",
        });
    }

    let (min_time, max_time) = personality.response_time_range;
    if min_time < 0.0 || min_time > max_time {
        return Err(RosterError::InvalidRange {
            id: personality.id.clone(),
            field: "response time",
        });
    }

    Ok(())
}

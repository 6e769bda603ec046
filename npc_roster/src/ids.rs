//! Identifiers shared by rooms, players and NPCs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a (human or synthetic) player seat in a room.
///
/// Seats are always UUIDs, guest and NPC seats included. On the wire it is the
/// bare UUID string; anything else fails deserialization of the enclosing value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable key of an NPC personality, e.g. `"news_junkie"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NpcId(String);

impl NpcId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NpcId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for NpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque room code handed out by the lobby.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_requires_uuid() {
        let id: PlayerId = serde_json::from_str("\"8f14e45f-ceea-467f-a8f2-5b1e0c9f8a11\"").unwrap();
        assert_eq!(id.to_string(), "8f14e45f-ceea-467f-a8f2-5b1e0c9f8a11");

        assert!(serde_json::from_str::<PlayerId>("\"guest-42\"").is_err());
    }

    #[test]
    fn test_player_ids_are_unique() {
        assert_ne!(PlayerId::new(), PlayerId::new());
    }

    #[test]
    fn test_npc_id_serializes_as_plain_string() {
        let id = NpcId::new("news_junkie");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"news_junkie\"");

        let back: NpcId = serde_json::from_str("\"civics_teacher\"").unwrap();
        assert_eq!(back.as_str(), "civics_teacher");
    }

    #[test]
    fn test_room_id_display() {
        assert_eq!(RoomId::new("QZ4F").to_string(), "QZ4F");
    }
}

//! One engine per active room.

use npc_roster::{NpcDirectory, RoomId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use super::{ConversationEngine, GeneratedNpcMessage};
use crate::clock::Clock;
use crate::config::EngineConfig;
use crate::generation::NpcMessageGenerator;
use crate::snapshot::ConversationSnapshot;
use crate::triggers::ResponderTables;

/// Engines keyed by room, so cooldowns never bleed between rooms.
pub struct RoomEngines {
    directory: Arc<NpcDirectory>,
    generator: Arc<dyn NpcMessageGenerator>,
    clock: Arc<dyn Clock>,
    config: EngineConfig,
    tables: Arc<ResponderTables>,
    rooms: HashMap<RoomId, ConversationEngine>,
}

impl RoomEngines {
    pub fn new(
        directory: Arc<NpcDirectory>,
        generator: Arc<dyn NpcMessageGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            directory,
            generator,
            clock,
            config: EngineConfig::default(),
            tables: Arc::new(ResponderTables::civic()),
            rooms: HashMap::new(),
        }
    }

    /// Configuration for engines created from now on.
    ///
    /// Not re-validated; see [`ConversationEngine::with_config`].
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tables(mut self, tables: Arc<ResponderTables>) -> Self {
        self.tables = tables;
        self
    }

    /// Get the room's engine, creating it on first use.
    pub fn engine_for(&mut self, room_id: &RoomId) -> &mut ConversationEngine {
        self.rooms.entry(room_id.clone()).or_insert_with(|| {
            debug!(room_id = %room_id, "Creating conversation engine for room");
            ConversationEngine::new(
                Arc::clone(&self.directory),
                Arc::clone(&self.generator),
                Arc::clone(&self.clock),
            )
            .with_config(self.config.clone())
            .with_tables(Arc::clone(&self.tables))
        })
    }

    /// Run one tick for the snapshot's room.
    pub async fn tick(&mut self, snapshot: &ConversationSnapshot) -> Vec<GeneratedNpcMessage> {
        self.engine_for(&snapshot.room_id).tick(snapshot).await
    }

    /// Drop a room's engine and its cooldowns. Returns whether the room existed.
    pub fn close_room(&mut self, room_id: &RoomId) -> bool {
        let existed = self.rooms.remove(room_id).is_some();
        if existed {
            debug!(room_id = %room_id, "Closed conversation engine for room");
        }
        existed
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

//! # Conversation Core
//!
//! Decides whether, and which, NPCs should speak in a live multiplayer quiz room.
//! The engine reads a snapshot of the room (players, recent chat, game phase),
//! detects conversational triggers, schedules at most a couple of them, and asks an
//! external message generator to voice the chosen NPCs.
//!
//! ## Core Components
//!
//! - **snapshot**: Read-only view of room state supplied by the game loop
//! - **triggers**: The five trigger detectors and the responder lookup tables
//! - **engine**: Scheduling, per-NPC cooldowns and the per-room engine
//! - **generation**: Context materialization and the message generator port
//!
//! ## Design Philosophy
//!
//! - **Snapshot-Driven**: Every analysis is recomputed from the snapshot; only cooldowns persist
//! - **One Engine Per Room**: Cooldowns are owned by the room's engine, never shared across rooms
//! - **Best-Effort Generation**: A missing or failed NPC message never fails the batch

pub mod clock;
pub mod config;
pub mod engine;
pub mod generation;
pub mod snapshot;
pub mod triggers;

pub use clock::*;
pub use config::*;
pub use engine::*;
pub use generation::*;
pub use snapshot::*;
pub use triggers::*;

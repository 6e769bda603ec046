//! # NPC Roster
//!
//! The synthetic participants of multiplayer quiz rooms: identifiers, personality
//! records, and the read-only directory the conversation engine looks them up in.
//! This crate holds data only and makes no decisions about who speaks.

pub mod directory;
pub mod ids;
pub mod personality;

pub use directory::*;
pub use ids::*;
pub use personality::*;

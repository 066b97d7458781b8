//! Player identification.
//!
//! ## PlayerId
//!
//! Caller-assigned identifier, unique within a session. A single-player
//! session is simply a session with one registered `PlayerId`.
//!
//! ## Player
//!
//! Binds a `PlayerId` to the board entity that represents the player's piece.

use serde::{Deserialize, Serialize};

use super::entity::EntityId;

/// Player identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A participant: identity plus the entity that moves on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub entity: EntityId,
}

impl Player {
    #[must_use]
    pub const fn new(id: PlayerId, entity: EntityId) -> Self {
        Self { id, entity }
    }
}

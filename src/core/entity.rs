//! Entity identification and ownership.
//!
//! Every mobile object on the board (player, gem, mine, extra life) is an
//! `Entity` stored in the board's entity arena and addressed by `EntityId`.
//!
//! ## Ownership
//!
//! An entity records which cell currently holds it via an optional `CellId`.
//! The link is one-directional: the entity never owns the cell, and the
//! cell's own occupant slot is maintained by the board arena. Whoever moves an
//! entity (the move resolver) updates both sides in lock-step.
//!
//! ```
//! use inertia_rules::core::{CellId, Entity, EntityKind};
//!
//! let mut gem = Entity::new(EntityKind::Gem);
//! assert_eq!(gem.set_owner(Some(CellId(3))), None);
//!
//! // Moving returns the vacated cell so the caller can clear it.
//! assert_eq!(gem.set_owner(Some(CellId(4))), Some(CellId(3)));
//! assert_eq!(gem.owner(), Some(CellId(4)));
//! ```

use serde::{Deserialize, Serialize};

/// Index of a cell in the board arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    /// Create a new cell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Index of an entity in the board arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// What an entity is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A player-controlled piece.
    Player,
    /// Collectable gem; the game ends once none are left.
    Gem,
    /// Kills the player on contact.
    Mine,
    /// Grants one additional life when collected.
    ExtraLife,
}

impl EntityKind {
    /// Whether the player picks this entity up on contact.
    #[must_use]
    pub const fn is_collectable(self) -> bool {
        matches!(self, EntityKind::Gem | EntityKind::ExtraLife)
    }
}

/// A mobile object bindable to at most one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    kind: EntityKind,
    owner: Option<CellId>,
}

impl Entity {
    /// Create an entity that is not yet on any cell.
    #[must_use]
    pub const fn new(kind: EntityKind) -> Self {
        Self { kind, owner: None }
    }

    /// Create an entity already bound to `owner`.
    #[must_use]
    pub const fn with_owner(kind: EntityKind, owner: CellId) -> Self {
        Self {
            kind,
            owner: Some(owner),
        }
    }

    /// The entity's kind.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// The cell currently holding this entity, if any.
    #[must_use]
    pub const fn owner(&self) -> Option<CellId> {
        self.owner
    }

    /// Rebind this entity, returning the previous owner.
    ///
    /// Pass `None` to take the entity off the board.
    pub fn set_owner(&mut self, owner: Option<CellId>) -> Option<CellId> {
        std::mem::replace(&mut self.owner, owner)
    }
}

//! Board cells.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Position};

/// Terrain of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    /// Impassable; never holds an entity.
    Wall,
    /// Stops a sliding player.
    Stop,
    /// Plain sliding surface.
    Ice,
}

impl CellKind {
    /// Whether an entity may rest on this cell.
    #[must_use]
    pub const fn holds_entities(self) -> bool {
        !matches!(self, CellKind::Wall)
    }
}

/// A single board square.
///
/// `occupant` is the cell side of the entity ownership link. It is kept in
/// lock-step with `Entity::owner` by `GameBoard`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    kind: CellKind,
    pub(crate) occupant: Option<EntityId>,
}

impl Cell {
    pub(crate) const fn new(position: Position, kind: CellKind) -> Self {
        Self {
            position,
            kind,
            occupant: None,
        }
    }

    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    /// The entity resting on this cell, if any.
    #[must_use]
    pub const fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }
}

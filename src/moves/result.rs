//! Outcome of an attempted move.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Position;

/// Positions picked up during one move.
///
/// SmallVec keeps the common case (a handful of pickups) off the heap.
pub type Collected = SmallVec<[Position; 4]>;

/// Result of resolving one move.
///
/// Resolution produces `Invalid`, `Alive` or `Dead`. `KickedOut` is only ever
/// created by the controller, from a `Dead` that used up the last life.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    /// Rejected before any state changed (e.g. moving into a wall).
    Invalid { orig_position: Position },

    /// The move happened.
    Valid(Valid),
}

/// Outcomes of a move that was carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Valid {
    /// The player survived. The only undoable outcome.
    Alive(AliveMove),

    /// The player lost a life.
    Dead { orig_position: Position },

    /// The player lost their last life and left the game.
    KickedOut { orig_position: Position },
}

/// A surviving move, with everything needed to reverse it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveMove {
    pub orig_position: Position,
    pub new_position: Position,
    /// Gems picked up, in pickup order.
    pub collected_gems: Collected,
    /// Extra lives picked up, in pickup order.
    pub collected_extra_lives: Collected,
}

impl AliveMove {
    /// An alive move that collected nothing.
    #[must_use]
    pub fn new(orig_position: Position, new_position: Position) -> Self {
        Self {
            orig_position,
            new_position,
            collected_gems: Collected::new(),
            collected_extra_lives: Collected::new(),
        }
    }

    /// Record collected gem positions.
    #[must_use]
    pub fn with_gems(mut self, gems: impl IntoIterator<Item = Position>) -> Self {
        self.collected_gems.extend(gems);
        self
    }

    /// Record collected extra-life positions.
    #[must_use]
    pub fn with_extra_lives(mut self, lives: impl IntoIterator<Item = Position>) -> Self {
        self.collected_extra_lives.extend(lives);
        self
    }

    #[must_use]
    pub fn num_gems(&self) -> u32 {
        self.collected_gems.len() as u32
    }

    #[must_use]
    pub fn num_extra_lives(&self) -> u32 {
        self.collected_extra_lives.len() as u32
    }
}

impl MoveResult {
    #[must_use]
    pub fn invalid(orig_position: Position) -> Self {
        MoveResult::Invalid { orig_position }
    }

    #[must_use]
    pub fn alive(record: AliveMove) -> Self {
        MoveResult::Valid(Valid::Alive(record))
    }

    #[must_use]
    pub fn dead(orig_position: Position) -> Self {
        MoveResult::Valid(Valid::Dead { orig_position })
    }

    #[must_use]
    pub fn kicked_out(orig_position: Position) -> Self {
        MoveResult::Valid(Valid::KickedOut { orig_position })
    }

    /// Where the player stood before the move.
    #[must_use]
    pub fn orig_position(&self) -> Position {
        match self {
            MoveResult::Invalid { orig_position }
            | MoveResult::Valid(Valid::Dead { orig_position })
            | MoveResult::Valid(Valid::KickedOut { orig_position }) => *orig_position,
            MoveResult::Valid(Valid::Alive(record)) => record.orig_position,
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, MoveResult::Valid(_))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        matches!(self, MoveResult::Valid(Valid::Alive(_)))
    }

    /// True for `Dead` only; `KickedOut` is reported separately.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        matches!(self, MoveResult::Valid(Valid::Dead { .. }))
    }

    #[must_use]
    pub fn is_kicked_out(&self) -> bool {
        matches!(self, MoveResult::Valid(Valid::KickedOut { .. }))
    }

    #[must_use]
    pub fn as_alive(&self) -> Option<&AliveMove> {
        match self {
            MoveResult::Valid(Valid::Alive(record)) => Some(record),
            _ => None,
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            MoveResult::Invalid { .. } => "invalid",
            MoveResult::Valid(Valid::Alive(_)) => "alive",
            MoveResult::Valid(Valid::Dead { .. }) => "dead",
            MoveResult::Valid(Valid::KickedOut { .. }) => "kicked_out",
        }
    }
}

//! Robot decision strategies.
//!
//! Strategies only look: they trial moves through a [`BoardView`] and return
//! a direction. Committing the move is the delegation loop's job.

use crate::core::{Direction, GameRng, PlayerId, Position};
use crate::moves::{MoveResult, Valid};
use crate::rules::BoardView;

/// Chooses the next direction for a player.
pub trait MoveStrategy: Send {
    /// Pick a direction, or `None` to skip this tick.
    fn choose(&self, view: &dyn BoardView, player: PlayerId, rng: &mut GameRng) -> Option<Direction>;
}

// =============================================================================
// Random
// =============================================================================

/// Moves randomly, but never into death while a surviving move exists.
///
/// All four directions are trialled in shuffled order. The last surviving
/// direction seen is taken; failing that, the last deadly one; if every
/// direction is invalid the robot stays put.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomRational;

impl MoveStrategy for RandomRational {
    fn choose(&self, view: &dyn BoardView, player: PlayerId, rng: &mut GameRng) -> Option<Direction> {
        let position = view.player_position(player)?;

        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);

        let mut alive = None;
        let mut dead = None;
        for direction in directions {
            match view.trial(position, direction, player) {
                MoveResult::Valid(Valid::Alive(_)) => alive = Some(direction),
                MoveResult::Valid(Valid::Dead { .. }) => dead = Some(direction),
                MoveResult::Invalid { .. } | MoveResult::Valid(Valid::KickedOut { .. }) => {}
            }
        }

        alive.or(dead)
    }
}

// =============================================================================
// Look-ahead
// =============================================================================

/// Points per gem collected.
pub const GEM_SCORE: i32 = 10;
/// Cost of every surviving step.
pub const STEP_COST: i32 = 1;
/// Score of a move that leaves the player where it is.
pub const INVALID_SCORE: i32 = 0;
/// Score of a deadly move.
pub const DEATH_SCORE: i32 = -10;

/// A direction together with the best score reachable through it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredDirection {
    pub direction: Direction,
    pub score: i32,
}

/// Exhaustive search over direction sequences up to a fixed depth.
///
/// Each level scores a surviving move as
/// `GEM_SCORE * gems - STEP_COST + best(depth - 1)`, an invalid move as
/// `INVALID_SCORE` and a deadly one as `DEATH_SCORE`. Ties go to the first
/// maximum in shuffled order.
#[derive(Clone, Copy, Debug)]
pub struct LookAhead {
    depth: u32,
}

impl LookAhead {
    /// Create a search of the given depth. Depth 0 is raised to 1.
    #[must_use]
    pub fn new(depth: u32) -> Self {
        Self {
            depth: depth.max(1),
        }
    }

    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Best direction from `position` looking `depth` moves ahead.
    ///
    /// At depth 0 this returns an `Up` anchor scored 0; callers only read its
    /// score. Returns `None` if no direction produced a scorable outcome.
    pub fn best_direction(
        &self,
        view: &dyn BoardView,
        player: PlayerId,
        position: Position,
        depth: u32,
        rng: &mut GameRng,
    ) -> Option<ScoredDirection> {
        if depth == 0 {
            return Some(ScoredDirection {
                direction: Direction::Up,
                score: 0,
            });
        }

        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);

        let mut best: Option<ScoredDirection> = None;
        for direction in directions {
            let score = match view.trial(position, direction, player) {
                MoveResult::Valid(Valid::Alive(record)) => {
                    let later = self
                        .best_direction(view, player, record.new_position, depth - 1, rng)
                        .map_or(0, |s| s.score);
                    GEM_SCORE * record.num_gems() as i32 - STEP_COST + later
                }
                MoveResult::Invalid { .. } => INVALID_SCORE,
                MoveResult::Valid(Valid::Dead { .. }) => DEATH_SCORE,
                MoveResult::Valid(Valid::KickedOut { .. }) => continue,
            };

            if best.map_or(true, |b| score > b.score) {
                best = Some(ScoredDirection { direction, score });
            }
        }

        best
    }
}

impl Default for LookAhead {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_SEARCH_DEPTH)
    }
}

impl MoveStrategy for LookAhead {
    fn choose(&self, view: &dyn BoardView, player: PlayerId, rng: &mut GameRng) -> Option<Direction> {
        let position = view.player_position(player)?;
        self.best_direction(view, player, position, self.depth, rng)
            .map(|s| s.direction)
    }
}

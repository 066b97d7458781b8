//! Per-player game state.
//!
//! ## Lives
//!
//! A player either has a limited number of lives or unlimited ones. A limited
//! count never goes below zero; zero means the player has been kicked out.
//!
//! ## GameState
//!
//! Counters, lives and undo history for one player, plus a handle to the
//! board shared by the whole session. Only the controller mutates it; every
//! public method here is a read-only query.

use serde::{Deserialize, Serialize};

use crate::board::{read_board, SharedBoard};
use crate::core::{Player, PlayerId};
use crate::moves::MoveStack;

/// Remaining lives of a player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lives {
    /// The player can never be kicked out.
    #[default]
    Unlimited,
    /// Lives left. `Limited(0)` means kicked out.
    Limited(u32),
}

impl Lives {
    /// The number of lives, or `None` when unlimited.
    #[must_use]
    pub const fn count(self) -> Option<u32> {
        match self {
            Lives::Unlimited => None,
            Lives::Limited(n) => Some(n),
        }
    }

    #[must_use]
    pub const fn is_unlimited(self) -> bool {
        matches!(self, Lives::Unlimited)
    }

    #[must_use]
    pub const fn is_exhausted(self) -> bool {
        matches!(self, Lives::Limited(0))
    }

    /// Add lives. No effect when unlimited.
    pub fn increase(&mut self, n: u32) {
        if let Lives::Limited(count) = self {
            *count = count.saturating_add(n);
        }
    }

    /// Take one life, returning the remaining count (`None` when unlimited).
    pub fn decrement(&mut self) -> Option<u32> {
        match self {
            Lives::Unlimited => None,
            Lives::Limited(count) => {
                *count = count.saturating_sub(1);
                Some(*count)
            }
        }
    }

    /// Take back `n` previously granted lives.
    ///
    /// A player who still has lives keeps at least one: only a death can
    /// bring the count to zero.
    pub fn revoke(&mut self, n: u32) {
        if let Lives::Limited(count) = self {
            if *count > 0 {
                *count = count.saturating_sub(n).max(1);
            }
        }
    }
}

/// Game state of one participant.
#[derive(Debug)]
pub struct GameState {
    player: Player,
    board: SharedBoard,
    num_moves: u32,
    num_deaths: u32,
    lives: Lives,
    num_got_gems: u32,
    move_stack: MoveStack,
}

impl GameState {
    /// Create the state for `player` on the session's shared board.
    #[must_use]
    pub fn new(player: Player, board: SharedBoard, lives: Lives) -> Self {
        Self {
            player,
            board,
            num_moves: 0,
            num_deaths: 0,
            lives,
            num_got_gems: 0,
            move_stack: MoveStack::new(),
        }
    }

    /// Create a state with unlimited lives.
    #[must_use]
    pub fn with_unlimited_lives(player: Player, board: SharedBoard) -> Self {
        Self::new(player, board, Lives::Unlimited)
    }

    #[must_use]
    pub fn player(&self) -> Player {
        self.player
    }

    #[must_use]
    pub fn player_id(&self) -> PlayerId {
        self.player.id
    }

    /// The board shared by every state of this session.
    #[must_use]
    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    #[must_use]
    pub fn num_moves(&self) -> u32 {
        self.num_moves
    }

    #[must_use]
    pub fn num_deaths(&self) -> u32 {
        self.num_deaths
    }

    #[must_use]
    pub fn lives(&self) -> Lives {
        self.lives
    }

    /// Lives left, or `None` when unlimited.
    #[must_use]
    pub fn num_lives(&self) -> Option<u32> {
        self.lives.count()
    }

    #[must_use]
    pub fn num_got_gems(&self) -> u32 {
        self.num_got_gems
    }

    #[must_use]
    pub fn move_stack(&self) -> &MoveStack {
        &self.move_stack
    }

    /// Number of undos performed.
    #[must_use]
    pub fn num_undos(&self) -> u32 {
        self.move_stack.pop_count()
    }

    /// Score: 10 per gem, minus 1 per move, 2 per undo and 4 per death.
    #[must_use]
    pub fn score(&self) -> i64 {
        10 * i64::from(self.num_got_gems)
            - i64::from(self.num_moves)
            - 2 * i64::from(self.num_undos())
            - 4 * i64::from(self.num_deaths)
    }

    /// Whether the player has been kicked out.
    #[must_use]
    pub fn has_lost(&self) -> bool {
        self.lives.is_exhausted()
    }

    #[must_use]
    pub fn no_gems_left(&self) -> bool {
        read_board(&self.board).num_gems_left() == 0
    }

    /// All gems are gone and this player is still in the game.
    #[must_use]
    pub fn has_won(&self) -> bool {
        !self.has_lost() && self.no_gems_left()
    }

    // === Controller-only mutation ===

    pub(crate) fn increment_num_moves(&mut self) {
        self.num_moves += 1;
    }

    pub(crate) fn increment_num_deaths(&mut self) {
        self.num_deaths += 1;
    }

    pub(crate) fn increase_num_lives(&mut self, n: u32) {
        self.lives.increase(n);
    }

    pub(crate) fn revoke_num_lives(&mut self, n: u32) {
        self.lives.revoke(n);
    }

    pub(crate) fn decrement_num_lives(&mut self) -> Option<u32> {
        self.lives.decrement()
    }

    pub(crate) fn increase_num_got_gems(&mut self, n: u32) {
        self.num_got_gems += n;
    }

    pub(crate) fn decrease_num_got_gems(&mut self, n: u32) {
        self.num_got_gems = self.num_got_gems.saturating_sub(n);
    }

    pub(crate) fn move_stack_mut(&mut self) -> &mut MoveStack {
        &mut self.move_stack
    }
}

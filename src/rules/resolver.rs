//! Move resolution contract.
//!
//! The board geometry (how far a player slides, what stops it, what it picks
//! up on the way) lives outside this crate. Games implement `MoveResolver`
//! and the controller calls into it; the controller never edits the board
//! itself.

use crate::board::GameBoard;
use crate::core::{Direction, PlayerId, Position};
use crate::moves::{AliveMove, MoveResult};

/// Board-resolution collaborator.
///
/// ## Implementation Notes
///
/// - `resolve`: return `None` when the move is not applicable at all (for
///   example the player has no piece on the board). Never return
///   `KickedOut`; the controller derives it.
/// - `trial`: must not mutate anything. Robots call it thousands of times
///   per decision.
/// - `undo`: receives records previously returned by `resolve`, most recent
///   first.
/// - `kick_out`: called once, when a player's last life is gone.
pub trait MoveResolver: Send {
    /// Carry out a move for `player`, mutating the board.
    fn resolve(
        &mut self,
        board: &mut GameBoard,
        direction: Direction,
        player: PlayerId,
    ) -> Option<MoveResult>;

    /// Report what moving from `position` in `direction` would do.
    fn trial(
        &self,
        board: &GameBoard,
        position: Position,
        direction: Direction,
        player: PlayerId,
    ) -> MoveResult;

    /// Reverse the board effects of an alive move.
    fn undo(&mut self, board: &mut GameBoard, record: &AliveMove);

    /// Remove `player` from active play.
    fn kick_out(&mut self, board: &mut GameBoard, player: PlayerId);
}

/// Read-only view of a session used by automated players.
pub trait BoardView {
    /// Where `player` currently stands; `None` once off the board.
    fn player_position(&self, player: PlayerId) -> Option<Position>;

    /// Non-mutating trial of a move from an arbitrary position.
    fn trial(&self, position: Position, direction: Direction, player: PlayerId) -> MoveResult;
}

//! Usage errors.
//!
//! Every variant signals a caller bug (wrong player id, single-player call in
//! a multi-player session, ...). Ordinary game outcomes such as an invalid
//! move or an empty undo history are not errors; they are reported through
//! `MoveResult`, `Option` and `bool` return values.

use derive_more::{Display, Error};

use crate::core::PlayerId;

/// Contract violation reported by the controller or move history.
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A controller needs at least one game state.
    #[display("a game session needs at least one player")]
    NoGameStates,

    /// The id is not registered in this session.
    #[display("{_0} is not part of this session")]
    UnknownPlayer(#[error(not(source))] PlayerId),

    /// Two game states were registered for the same player.
    #[display("{_0} was registered twice")]
    DuplicatePlayer(#[error(not(source))] PlayerId),

    /// Game states of one session must share a single board instance.
    #[display("game states do not share the same board")]
    BoardMismatch,

    /// The operation is only defined for single-player sessions.
    #[display("operation requires a single-player session, found {player_count} players")]
    NotSinglePlayer { player_count: usize },

    /// Only alive moves can be recorded for undo.
    #[display("only alive moves can be pushed onto the move history")]
    NonAliveMove,
}

//! Undo history of a single player.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::result::{AliveMove, MoveResult, Valid};

/// LIFO record of a player's alive moves.
///
/// Only `Alive` outcomes can be undone, so only they are stored. `pop_count`
/// counts every successful pop and is never decremented.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStack {
    /// Index 0 = oldest, last = most recent.
    moves: Vec<AliveMove>,
    pop_count: u32,
}

impl MoveStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a move result.
    ///
    /// Fails with [`EngineError::NonAliveMove`] for anything but `Alive`.
    pub fn push(&mut self, result: MoveResult) -> Result<(), EngineError> {
        match result {
            MoveResult::Valid(Valid::Alive(record)) => {
                self.push_alive(record);
                Ok(())
            }
            MoveResult::Invalid { .. }
            | MoveResult::Valid(Valid::Dead { .. })
            | MoveResult::Valid(Valid::KickedOut { .. }) => Err(EngineError::NonAliveMove),
        }
    }

    /// Record an alive move.
    pub fn push_alive(&mut self, record: AliveMove) {
        self.moves.push(record);
    }

    /// Remove and return the most recent move.
    pub fn pop(&mut self) -> Option<AliveMove> {
        let record = self.moves.pop()?;
        self.pop_count += 1;
        Some(record)
    }

    /// The most recent move, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&AliveMove> {
        self.moves.last()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Total number of successful pops.
    #[must_use]
    pub fn pop_count(&self) -> u32 {
        self.pop_count
    }

    /// Iterate from oldest to most recent.
    pub fn iter(&self) -> impl Iterator<Item = &AliveMove> {
        self.moves.iter()
    }
}

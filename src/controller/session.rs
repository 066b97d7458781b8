//! Thread-safe handle to one game session.
//!
//! Every path that changes a session (human input, undo, robot ticks) goes
//! through the same mutex, so life, score and history updates of one move
//! are never interleaved with another. Separate sessions do not contend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{instrument, warn};

use crate::core::{Direction, PlayerId};
use crate::error::EngineError;
use crate::moves::MoveResult;
use crate::robot::MoveProcessor;
use crate::rules::MoveResolver;

use super::game::GameController;

/// Cloneable, serialized access to a [`GameController`].
pub struct Session<R: MoveResolver> {
    inner: Arc<Mutex<GameController<R>>>,
}

impl<R: MoveResolver> Clone for Session<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: MoveResolver> Session<R> {
    #[must_use]
    pub fn new(controller: GameController<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// See [`GameController::process_move`].
    #[instrument(skip(self), level = "trace")]
    pub fn process_move(
        &self,
        direction: Direction,
        player: PlayerId,
    ) -> Result<Option<MoveResult>, EngineError> {
        self.lock().process_move(direction, player)
    }

    /// See [`GameController::process_move_single`].
    #[instrument(skip(self), level = "trace")]
    pub fn process_move_single(
        &self,
        direction: Direction,
    ) -> Result<Option<MoveResult>, EngineError> {
        self.lock().process_move_single(direction)
    }

    /// See [`GameController::process_undo`].
    #[instrument(skip(self), level = "trace")]
    pub fn process_undo(&self) -> Result<bool, EngineError> {
        self.lock().process_undo()
    }

    /// See [`GameController::winners`].
    #[must_use]
    pub fn winners(&self) -> Option<Vec<PlayerId>> {
        self.lock().winners()
    }

    /// Run a read-only projection while holding the session lock.
    pub fn read<T>(&self, f: impl FnOnce(&GameController<R>) -> T) -> T {
        f(&*self.lock())
    }

    /// A move processor that submits moves for `player` into this session.
    #[must_use]
    pub fn processor(&self, player: PlayerId) -> SessionProcessor<R> {
        SessionProcessor {
            session: self.clone(),
            player,
        }
    }

    /// Lock, recovering from poisoning.
    fn lock(&self) -> MutexGuard<'_, GameController<R>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Submits directions for one player into a [`Session`].
pub struct SessionProcessor<R: MoveResolver> {
    session: Session<R>,
    player: PlayerId,
}

impl<R: MoveResolver> SessionProcessor<R> {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }
}

impl<R: MoveResolver> MoveProcessor for SessionProcessor<R> {
    fn submit(&self, direction: Direction) {
        if let Err(err) = self.session.process_move(direction, self.player) {
            warn!(player = %self.player, %direction, %err, "Rejected submitted move");
        }
    }
}

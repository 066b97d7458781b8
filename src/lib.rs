//! # inertia-rules
//!
//! Rules engine for a grid sliding puzzle: players slide across ice, collect
//! gems and extra lives, and avoid mines.
//!
//! ## Design Principles
//!
//! 1. **Board geometry is pluggable**: how far a piece slides and what it
//!    picks up is decided by a `MoveResolver`. This crate owns the
//!    bookkeeping around it: lives, scores, undo history and winners.
//!
//! 2. **N-Player First**: one controller serves any number of players on a
//!    shared board. Single-player shortcuts check that there really is
//!    exactly one player.
//!
//! 3. **One lock per session**: every mutation of a session, whether human
//!    input, undo or robot tick, is serialized through a `Session`.
//!
//! ## Modules
//!
//! - `core`: Entity and player IDs, positions, directions, RNG
//! - `board`: Cell grid and entity arena with single ownership links
//! - `moves`: Move outcomes and the undo stack
//! - `rules`: `MoveResolver` and `BoardView` traits
//! - `controller`: Per-player state, the game controller, sessions
//! - `robot`: Automated players and background delegation
//! - `error`: Usage errors

pub mod board;
pub mod controller;
pub mod core;
pub mod error;
pub mod moves;
pub mod robot;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CellId, Direction, Entity, EntityId, EntityKind, GameRng, Player, PlayerId, Position,
    PositionOffset,
};

pub use crate::board::{Cell, CellKind, GameBoard, SharedBoard};

pub use crate::moves::{AliveMove, MoveResult, MoveStack, Valid};

pub use crate::rules::{BoardView, MoveResolver};

pub use crate::controller::{GameController, GameState, Lives, Session, SessionProcessor};

pub use crate::robot::{
    LookAhead, MoveDelegate, MoveProcessor, MoveStrategy, RandomRational, Robot, RobotConfig,
    Strategy,
};

pub use crate::error::EngineError;

//! Core engine types: entities, positions, players, RNG.
//!
//! These carry no game rules. The board, controller and robots are built on
//! top of them.

pub mod entity;
pub mod player;
pub mod position;
pub mod rng;

pub use entity::{CellId, Entity, EntityId, EntityKind};
pub use player::{Player, PlayerId};
pub use position::{Direction, Position, PositionOffset};
pub use rng::GameRng;

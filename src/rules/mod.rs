//! Contracts between the rules engine and the game it runs.
//!
//! Games implement [`MoveResolver`] to define:
//! - How a move changes the board and what it collects
//! - What a move *would* do, without changing anything
//! - How a move is reversed, and how a player leaves the board
//!
//! [`BoardView`] is the read-only surface robots decide against.

pub mod resolver;

pub use resolver::{BoardView, MoveResolver};

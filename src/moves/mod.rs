//! Move outcomes and the per-player undo history.
//!
//! [`MoveResult`] is the vocabulary every other component speaks: the
//! resolver produces it, the controller applies it, robots score it.
//! [`MoveStack`] keeps the alive moves that can still be undone.

mod history;
mod result;

pub use history::MoveStack;
pub use result::{AliveMove, Collected, MoveResult, Valid};

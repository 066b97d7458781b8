//! Game controller, per-player state and the session handle.
//!
//! - `GameState`: counters, lives and undo history of one player
//! - `GameController`: applies move outcomes, answers win/lose queries
//! - `Session`: shares a controller between threads behind one lock

pub mod game;
pub mod session;
pub mod state;

pub use game::{ControllerView, GameController};
pub use session::{Session, SessionProcessor};
pub use state::{GameState, Lives};

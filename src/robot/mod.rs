//! Automated players.
//!
//! - `strategy`: pick a direction from a read-only board view
//! - `delegate`: run a strategy on a background thread, cancellably
//! - `interval`: how long to wait between moves

pub mod config;
pub mod delegate;
pub mod interval;
pub mod strategy;

pub use config::{RobotConfig, Strategy, DEFAULT_SEARCH_DEPTH};
pub use delegate::{MoveDelegate, MoveProcessor, Robot};
pub use interval::{FixedInterval, IntervalSource, JitteredInterval};
pub use strategy::{LookAhead, MoveStrategy, RandomRational, ScoredDirection};

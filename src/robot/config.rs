//! Robot configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::strategy::{LookAhead, MoveStrategy, RandomRational};

/// Search depth used by the look-ahead strategy unless configured otherwise.
pub const DEFAULT_SEARCH_DEPTH: u32 = 10;

/// Which decision strategy a robot uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Random, but avoids dying when any surviving move exists.
    #[default]
    Random,
    /// Bounded-depth look-ahead maximizing gems per move.
    Smart,
}

/// Robot configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Decision strategy.
    pub strategy: Strategy,

    /// Look-ahead depth for `Strategy::Smart` (clamped to at least 1).
    pub search_depth: u32,

    /// Seed for direction shuffling and interval jitter.
    /// `None` seeds from OS entropy.
    pub seed: Option<u64>,

    /// Pause before each move.
    pub interval: Duration,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Random,
            search_depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
            interval: Duration::from_secs(1),
        }
    }
}

impl RobotConfig {
    /// Create a new config with a custom strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Create a new config with a custom look-ahead depth.
    pub fn with_search_depth(mut self, depth: u32) -> Self {
        self.search_depth = depth;
        self
    }

    /// Create a new config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Create a new config with a custom move interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Instantiate the configured strategy.
    #[must_use]
    pub fn build_strategy(&self) -> Box<dyn MoveStrategy> {
        match self.strategy {
            Strategy::Random => Box::new(RandomRational),
            Strategy::Smart => Box::new(LookAhead::new(self.search_depth)),
        }
    }
}

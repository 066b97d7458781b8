//! Pacing of robot moves.

use std::time::Duration;

use crate::core::GameRng;

/// Produces the pause before each robot move.
pub trait IntervalSource: Send + Sync {
    fn next_interval(&self, rng: &mut GameRng) -> Duration;
}

/// The same pause every time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedInterval(pub Duration);

impl FixedInterval {
    #[must_use]
    pub fn every_second() -> Self {
        Self(Duration::from_secs(1))
    }
}

impl IntervalSource for FixedInterval {
    fn next_interval(&self, _rng: &mut GameRng) -> Duration {
        self.0
    }
}

/// A pause drawn uniformly from `[min, max]`, at millisecond granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JitteredInterval {
    min: Duration,
    max: Duration,
}

impl JitteredInterval {
    /// Bounds are swapped if given in the wrong order.
    #[must_use]
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl IntervalSource for JitteredInterval {
    fn next_interval(&self, rng: &mut GameRng) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range_inclusive(lo..=hi))
    }
}

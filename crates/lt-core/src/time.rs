//! Step clock and run configuration.

use std::fmt;

use crate::{LtError, LtResult};

/// Number of completed simulation steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// The current step and its length in simulated milliseconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub step_length_ms: u32,
    pub current_tick:   Tick,
}

impl SimClock {
    pub fn new(step_length_ms: u32, begin: Tick) -> Self {
        Self { step_length_ms, current_tick: begin }
    }

    /// Called once at the end of every step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick.0 += 1;
    }

    /// Simulated time at `current_tick`.
    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.current_tick.0 * u64::from(self.step_length_ms)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} ms", self.current_tick, self.now_ms())
    }
}

/// Run configuration handed to `lt_sim::SimBuilder`.
///
/// With the `serde` feature every field is optional in the serialized form
/// and falls back to [`SimConfig::default`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated milliseconds per step.  Must be non-zero.
    pub step_length_ms: u32,

    pub begin_tick: u64,

    /// Extra edges the relocation walk may advance beyond the route length
    /// before giving up with `RelocationUnreachable`.
    pub relocation_slack: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step_length_ms:   1_000,
            begin_tick:       0,
            relocation_slack: 2,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> LtResult<()> {
        if self.step_length_ms == 0 {
            return Err(LtError::Config("step_length_ms must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_length_ms, Tick(self.begin_tick))
    }
}

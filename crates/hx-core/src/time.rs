//! Simulation time and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one
//! synchronous round: message exchange, decision, commit.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level run configuration.
///
/// Typically built from a scenario file by `hx-sim` and passed to the
/// simulation runner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Clear every agent's cluster assignment every N ticks, forcing a fresh
    /// clustering on the following tick.  0 = cluster once for the whole run.
    pub recluster_interval_ticks: u64,

    /// Penalty steps charged to an agent whose planned move is rejected
    /// during arbitration (wall or occupied cell).
    pub penalty_steps: u32,

    /// Emit a position snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks:              100,
            seed:                     0,
            recluster_interval_ticks: 0,
            penalty_steps:            2,
            output_interval_ticks:    1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// `true` if the epoch closes at the end of `tick`.
    #[inline]
    pub fn is_epoch_end(&self, tick: Tick) -> bool {
        self.recluster_interval_ticks > 0
            && (tick.0 + 1).is_multiple_of(self.recluster_interval_ticks)
    }

    /// `true` if a position snapshot is due at `tick`.
    #[inline]
    pub fn is_snapshot_tick(&self, tick: Tick) -> bool {
        self.output_interval_ticks > 0 && tick.0.is_multiple_of(self.output_interval_ticks)
    }
}

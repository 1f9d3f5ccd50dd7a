//! Simulation observer trait for progress reporting and data collection.

use hx_behavior::AgentMessage;
use hx_core::Tick;

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.interval == 0 {
///             println!("{}: diameter {}", summary.tick, summary.diameter);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the commit phase with the tick's swarm metrics.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with every agent's post-commit message, in agent order.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &[AgentMessage]) {}

    /// Called once after the final tick completes, with every agent's final
    /// message in agent order.
    fn on_sim_end(&mut self, _final_tick: Tick, _agents: &[AgentMessage]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

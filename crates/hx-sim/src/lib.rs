//! `hx-sim` — tick loop orchestrator for the hexswarm simulator.
//!
//! # Synchronous tick protocol
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Message      — every agent publishes; one shared PeerSnapshot is
//!                    delivered to all agents.
//!   ② Clusters     — if any agent lacks a cluster, resolve clusters once
//!                    from the snapshot and hand out labels + centroids.
//!   ③ Decide       — compute_action on every agent (parallel with the
//!                    `parallel` feature).
//!   ④ Correct      — publish intended moves, deliver the second snapshot,
//!                    correct_next_move on every agent.
//!   ⑤ Arbitrate    — reject moves into walls or contested cells
//!                    (ascending AgentId keeps its claim).
//!   ⑥ Commit       — do_action on every agent.
//!   ⑦ Observe      — per-tick metrics, periodic position snapshots.
//!   ⑧ Epoch        — every `recluster_interval_ticks`, reset() all agents.
//! ```
//!
//! Every phase finishes for all agents before the next begins.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs phases ③ and ④ on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the arbitration cell-claim map.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hx_sim::{NoopObserver, Scenario};
//!
//! let scenario = Scenario::from_path("scenarios/corridor.json")?;
//! let mut sim = scenario.build_sim()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod arbitration;
pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::TickSummary;
pub use observer::{NoopObserver, SimObserver};
pub use scenario::{ClusteringMethod, Scenario, ScenarioSim};
pub use sim::Sim;

//! Per-tick swarm metrics.

use std::collections::BTreeSet;

use hx_behavior::AgentMessage;
use hx_core::{HexCoord, Tick};

/// Swarm-level measurements taken after the commit phase of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummary {
    pub tick:                 Tick,
    /// Mean hex distance from each agent to the target.
    pub mean_target_distance: f64,
    /// Largest hex distance between any two agents.
    pub diameter:             u32,
    /// Distinct cluster labels among agents with a defined cluster.
    pub num_clusters:         u32,
    /// Agents standing on the target cell.
    pub agents_at_target:     u32,
}

impl TickSummary {
    pub fn measure(tick: Tick, agents: &[AgentMessage], target: HexCoord) -> Self {
        let total_distance: u64 = agents.iter().map(|a| a.location.distance(target) as u64).sum();
        let mean_target_distance = if agents.is_empty() {
            0.0
        } else {
            total_distance as f64 / agents.len() as f64
        };

        let diameter = agents
            .iter()
            .enumerate()
            .flat_map(|(i, a)| agents[i + 1..].iter().map(move |b| a.location.distance(b.location)))
            .max()
            .unwrap_or(0);

        let num_clusters = agents
            .iter()
            .filter(|a| a.cluster_defined)
            .map(|a| a.cluster_id)
            .collect::<BTreeSet<_>>()
            .len() as u32;

        let agents_at_target = agents.iter().filter(|a| a.location == target).count() as u32;

        Self { tick, mean_target_distance, diameter, num_clusters, agents_at_target }
    }
}

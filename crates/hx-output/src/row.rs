//! Plain data row types written by output backends.

use hx_behavior::AgentMessage;
use hx_core::Tick;
use hx_sim::TickSummary;

/// One agent's cell and cluster label at a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub agent_id:   u32,
    pub tick:       u64,
    pub row:        i32,
    pub column:     i32,
    /// `None` while the agent has no cluster for the current epoch.
    pub cluster_id: Option<u32>,
}

impl AgentSnapshotRow {
    pub fn from_message(tick: Tick, msg: &AgentMessage) -> Self {
        Self {
            agent_id:   msg.agent_id.0,
            tick:       tick.0,
            row:        msg.location.row,
            column:     msg.location.column,
            cluster_id: msg.cluster_defined.then_some(msg.cluster_id.0),
        }
    }
}

/// Swarm metrics for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:                 u64,
    pub mean_target_distance: f64,
    pub diameter:             u32,
    pub num_clusters:         u32,
    pub agents_at_target:     u32,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:                 s.tick.0,
            mean_target_distance: s.mean_target_distance,
            diameter:             s.diameter,
            num_clusters:         s.num_clusters,
            agents_at_target:     s.agents_at_target,
        }
    }
}

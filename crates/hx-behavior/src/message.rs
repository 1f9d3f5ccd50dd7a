//! Messages agents publish each tick and the snapshot built from them.

use std::collections::BTreeMap;

use hx_core::{AgentId, ClusterId, HexCoord};

/// The state an agent exposes to its peers for one tick.
///
/// A plain value: peers never hold a handle to the publishing agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentMessage {
    pub agent_id:        AgentId,
    pub location:        HexCoord,
    /// The intended unit move (or zero) at the time of publishing.
    pub next_move:       HexCoord,
    pub cluster_id:      ClusterId,
    pub cluster_defined: bool,
    /// How strongly peers should weight this agent's direction (0 or 1).
    pub confidence:      f32,
}

/// A read-only, agent-ordered view of every published message for one tick.
///
/// Built once per exchange by the orchestrator and shared (behind an `Arc`)
/// with every agent, so all agents see identical peer state.
#[derive(Clone, Debug, Default)]
pub struct PeerSnapshot {
    messages: BTreeMap<AgentId, AgentMessage>,
}

impl PeerSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&AgentMessage> {
        self.messages.get(&agent)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Messages in ascending agent order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentMessage> {
        self.messages.values()
    }

    /// `(agent, location)` pairs in ascending agent order — the input of a
    /// cluster resolution pass.
    pub fn positions(&self) -> Vec<(AgentId, HexCoord)> {
        self.messages.values().map(|m| (m.agent_id, m.location)).collect()
    }

    /// Peers sharing `cluster`, excluding `agent` itself.
    pub fn cluster_mates(
        &self,
        agent:   AgentId,
        cluster: ClusterId,
    ) -> impl Iterator<Item = &AgentMessage> {
        self.messages
            .values()
            .filter(move |m| m.agent_id != agent && m.cluster_defined && m.cluster_id == cluster)
    }
}

impl FromIterator<AgentMessage> for PeerSnapshot {
    fn from_iter<I: IntoIterator<Item = AgentMessage>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().map(|m| (m.agent_id, m)).collect(),
        }
    }
}

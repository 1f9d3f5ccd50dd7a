//! One authoritative clustering pass per epoch.
//!
//! The orchestrator runs [`ClusterResolution::resolve`] once on the tick's
//! published positions and hands each agent its [`ClusterAssignment`].  No
//! agent ever writes cluster state onto another agent.

use std::collections::BTreeMap;

use hx_core::{AgentId, ClusterId, HexCoord};

use crate::ClusterAssigner;

/// The cluster fields an agent receives for the current epoch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ClusterAssignment {
    pub cluster_id: ClusterId,
    /// Truncated mean of all member positions.
    pub centroid:   HexCoord,
}

/// Cluster labels and centroids for every agent of one epoch.
#[derive(Clone, Debug, Default)]
pub struct ClusterResolution {
    assignments:  BTreeMap<AgentId, ClusterAssignment>,
    num_clusters: usize,
}

impl ClusterResolution {
    /// Partition `members` with `assigner` and compute each cluster's centroid.
    ///
    /// An empty `members` slice yields an empty resolution.
    pub fn resolve<C: ClusterAssigner + ?Sized>(
        assigner: &C,
        members:  &[(AgentId, HexCoord)],
    ) -> Self {
        if members.is_empty() {
            return Self::default();
        }

        let points: Vec<HexCoord> = members.iter().map(|&(_, p)| p).collect();
        let labels = assigner.assign(&points);
        let num_clusters = labels.iter().max().map_or(0, |&m| m + 1);

        let mut sums = vec![(HexCoord::ZERO, 0i32); num_clusters];
        for (&label, &p) in labels.iter().zip(&points) {
            sums[label].0 += p;
            sums[label].1 += 1;
        }
        let centroids: Vec<HexCoord> = sums
            .into_iter()
            .map(|(sum, count)| if count == 0 { HexCoord::ZERO } else { sum / count })
            .collect();

        let assignments = members
            .iter()
            .zip(&labels)
            .map(|(&(agent, _), &label)| {
                (agent, ClusterAssignment {
                    cluster_id: ClusterId(label as u32),
                    centroid:   centroids[label],
                })
            })
            .collect();

        Self { assignments, num_clusters }
    }

    /// The assignment for `agent`, if it took part in the resolution.
    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<ClusterAssignment> {
        self.assignments.get(&agent).copied()
    }

    /// Number of distinct clusters.
    pub fn num_clusters(&self) -> usize {
        self.num_clusters
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterate `(agent, assignment)` in ascending agent order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, ClusterAssignment)> + '_ {
        self.assignments.iter().map(|(&a, &c)| (a, c))
    }
}

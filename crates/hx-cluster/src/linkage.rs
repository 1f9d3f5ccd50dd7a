//! Radius-bounded complete-linkage clustering.
//!
//! Starts from singletons and repeatedly merges the two closest clusters,
//! where the distance between clusters is the largest hex distance between
//! any of their members.  A merge only happens while that distance is within
//! `radius`, so every finished cluster has a hex diameter of at most
//! `radius`.
//!
//! Ties between equally close cluster pairs go to the pair with the lowest
//! indices, which makes the result independent of any RNG.

use hx_core::HexCoord;

use crate::assigner::{ClusterAssigner, densify};

/// Complete-linkage agglomerative clustering with a hex-distance cut-off.
#[derive(Clone, Debug)]
pub struct RadiusLinkage {
    pub radius: u32,
}

impl RadiusLinkage {
    pub fn new(radius: u32) -> Self {
        Self { radius }
    }
}

impl ClusterAssigner for RadiusLinkage {
    fn assign(&self, points: &[HexCoord]) -> Vec<usize> {
        let n = points.len();

        // `owner[i]` is the cluster slot point `i` currently belongs to; a slot
        // is identified by its lowest member, so slot order is input order.
        let mut owner: Vec<usize> = (0..n).collect();
        let mut alive = vec![true; n];
        let mut dist: Vec<Vec<u32>> = points
            .iter()
            .map(|a| points.iter().map(|&b| a.distance(b)).collect())
            .collect();

        loop {
            let mut best: Option<(u32, usize, usize)> = None;
            for a in (0..n).filter(|&a| alive[a]) {
                for b in (a + 1..n).filter(|&b| alive[b]) {
                    let d = dist[a][b];
                    if d <= self.radius && best.is_none_or(|(bd, _, _)| d < bd) {
                        best = Some((d, a, b));
                    }
                }
            }
            let Some((_, a, b)) = best else { break };

            // Lance–Williams update for complete linkage.
            for x in 0..n {
                let merged = dist[a][x].max(dist[b][x]);
                dist[a][x] = merged;
                dist[x][a] = merged;
            }
            alive[b] = false;
            for o in owner.iter_mut().filter(|o| **o == b) {
                *o = a;
            }
        }

        densify(&mut owner);
        owner
    }
}

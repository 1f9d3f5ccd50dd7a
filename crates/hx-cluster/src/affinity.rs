//! Affinity propagation over agent positions.
//!
//! # Algorithm
//!
//! Points exchange "responsibility" and "availability" messages until a
//! stable set of exemplars emerges (Frey & Dueck, 2007).  Similarity is the
//! negative squared Euclidean distance of `(row, column)`; every point's
//! self-preference is the median similarity, which lets the data pick the
//! number of clusters.
//!
//! A small amount of seeded noise is added to the similarity matrix to break
//! ties between perfectly symmetric configurations, so the result is fully
//! determined by the input and `seed`.

use hx_core::{HexCoord, SimRng};
use tracing::warn;

use crate::assigner::{ClusterAssigner, densify};

/// Exemplar-based clustering with median preference.
#[derive(Clone, Debug)]
pub struct AffinityPropagation {
    /// Seed for the tie-breaking noise.
    pub seed: u64,
    /// Message damping factor in `[0.5, 1)`.
    pub damping: f64,
    /// Hard iteration cap.
    pub max_iter: usize,
    /// Iterations with an unchanged exemplar set required to stop early.
    pub convergence_iter: usize,
}

impl AffinityPropagation {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            damping:          0.5,
            max_iter:         200,
            convergence_iter: 15,
        }
    }

    fn similarity(points: &[HexCoord]) -> Vec<Vec<f64>> {
        points
            .iter()
            .map(|a| {
                points
                    .iter()
                    .map(|b| {
                        let dr = (a.row - b.row) as f64;
                        let dc = (a.column - b.column) as f64;
                        -(dr * dr + dc * dc)
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for AffinityPropagation {
    fn default() -> Self {
        Self::new(5)
    }
}

impl ClusterAssigner for AffinityPropagation {
    fn assign(&self, points: &[HexCoord]) -> Vec<usize> {
        let n = points.len();
        if n <= 1 {
            return vec![0; n];
        }

        let mut s = Self::similarity(points);
        let preference = median(s.iter().flatten().copied().collect());

        // All points coincide: every similarity equals the preference and
        // the message passing has nothing to separate.
        if s.iter().flatten().all(|&v| v == preference) {
            return vec![0; n];
        }

        for (i, row) in s.iter_mut().enumerate() {
            row[i] = preference;
        }

        let mut rng = SimRng::new(self.seed);
        for row in s.iter_mut() {
            for v in row.iter_mut() {
                *v += (f64::EPSILON * *v + f64::MIN_POSITIVE * 100.0) * (rng.unit_f64() - 0.5);
            }
        }

        let mut r = vec![vec![0.0_f64; n]; n];
        let mut a = vec![vec![0.0_f64; n]; n];
        let mut history = vec![vec![false; self.convergence_iter]; n];
        let mut exemplars = vec![false; n];
        let mut converged = false;

        for it in 0..self.max_iter {
            // ── Responsibilities ──────────────────────────────────────────
            for i in 0..n {
                let (mut first, mut first_k, mut second) = (f64::NEG_INFINITY, 0, f64::NEG_INFINITY);
                for k in 0..n {
                    let v = a[i][k] + s[i][k];
                    if v > first {
                        second = first;
                        first = v;
                        first_k = k;
                    } else if v > second {
                        second = v;
                    }
                }
                for k in 0..n {
                    let competitor = if k == first_k { second } else { first };
                    let new = s[i][k] - competitor;
                    r[i][k] = self.damping * r[i][k] + (1.0 - self.damping) * new;
                }
            }

            // ── Availabilities ────────────────────────────────────────────
            for k in 0..n {
                let column_sum: f64 = (0..n)
                    .map(|i| if i == k { r[k][k] } else { r[i][k].max(0.0) })
                    .sum();
                for i in 0..n {
                    let own = if i == k { r[k][k] } else { r[i][k].max(0.0) };
                    let mut new = column_sum - own;
                    if i != k {
                        new = new.min(0.0);
                    }
                    a[i][k] = self.damping * a[i][k] + (1.0 - self.damping) * new;
                }
            }

            // ── Convergence ───────────────────────────────────────────────
            for (i, e) in exemplars.iter_mut().enumerate() {
                *e = a[i][i] + r[i][i] > 0.0;
                history[i][it % self.convergence_iter] = *e;
            }
            let k = exemplars.iter().filter(|&&e| e).count();
            if it >= self.convergence_iter {
                let stable = history.iter().all(|h| {
                    let on = h.iter().filter(|&&e| e).count();
                    on == 0 || on == self.convergence_iter
                });
                if stable && k > 0 {
                    converged = true;
                    break;
                }
            }
        }

        let centers: Vec<usize> = (0..n).filter(|&i| exemplars[i]).collect();
        if !converged || centers.is_empty() {
            warn!(points = n, "affinity propagation did not converge; using a single cluster");
            return vec![0; n];
        }

        let mut labels = nearest_center(&s, &centers);

        // Refine: each cluster's exemplar becomes the member with the highest
        // total similarity to the rest of the cluster.
        let refined: Vec<usize> = (0..centers.len())
            .map(|c| {
                let members: Vec<usize> = (0..n).filter(|&i| labels[i] == c).collect();
                members
                    .iter()
                    .copied()
                    .max_by(|&x, &y| {
                        let sx: f64 = members.iter().map(|&m| s[m][x]).sum();
                        let sy: f64 = members.iter().map(|&m| s[m][y]).sum();
                        sx.total_cmp(&sy)
                    })
                    .unwrap_or(centers[c])
            })
            .collect();

        labels = nearest_center(&s, &refined);
        densify(&mut labels);
        labels
    }
}

/// Label every point with the index (into `centers`) of its most similar
/// center; centers always label themselves.
fn nearest_center(s: &[Vec<f64>], centers: &[usize]) -> Vec<usize> {
    let mut labels: Vec<usize> = s
        .iter()
        .map(|row| {
            (0..centers.len())
                .max_by(|&x, &y| row[centers[x]].total_cmp(&row[centers[y]]))
                .unwrap_or(0)
        })
        .collect();
    for (c, &i) in centers.iter().enumerate() {
        labels[i] = c;
    }
    labels
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

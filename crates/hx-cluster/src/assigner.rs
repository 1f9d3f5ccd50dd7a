//! The `ClusterAssigner` trait.

use hx_core::HexCoord;

/// Pluggable partitioning of a point set into clusters.
///
/// # Contract
///
/// - The returned `Vec` has the same length and order as `points`.
/// - Labels are dense: for `k` distinct labels they are exactly `0..k`.
/// - An empty input yields an empty output.
/// - The result depends only on `points` and the assigner's configuration.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so the orchestrator can hold them
/// alongside behaviors that run on Rayon workers.
pub trait ClusterAssigner: Send + Sync {
    fn assign(&self, points: &[HexCoord]) -> Vec<usize>;
}

impl<T: ClusterAssigner + ?Sized> ClusterAssigner for Box<T> {
    fn assign(&self, points: &[HexCoord]) -> Vec<usize> {
        (**self).assign(points)
    }
}

/// Relabel `labels` so that clusters are numbered `0..k` in order of first
/// appearance.
pub(crate) fn densify(labels: &mut [usize]) {
    let mut mapping: Vec<(usize, usize)> = Vec::new();
    for label in labels.iter_mut() {
        let next = mapping.len();
        let dense = match mapping.iter().find(|(raw, _)| raw == label) {
            Some(&(_, dense)) => dense,
            None => {
                mapping.push((*label, next));
                next
            }
        };
        *label = dense;
    }
}

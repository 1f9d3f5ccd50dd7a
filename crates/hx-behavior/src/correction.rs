//! Trust/confidence-weighted blending of an agent's direction with its
//! cluster-mates' directions.
//!
//! For every peer the raw angular difference `own - peer` (both in
//! `0..360`) is accumulated with weight
//! `peer.confidence * self.trust / (distance * DISTANCE_DAMPING)`.
//! The total (own direction plus weighted differences) is divided by the
//! number of peers that carried a non-zero weight plus one.  The result is
//! not wrapped here; [`HexCoord::direction_from_degrees`] folds it modulo
//! 360 when it is turned back into a move.
//!
//! Peers at distance zero are weighted as if at distance one.
//!
//! [`HexCoord::direction_from_degrees`]: hx_core::HexCoord::direction_from_degrees

/// Empirical damping applied to the peer distance.
pub const DISTANCE_DAMPING: f64 = 0.7;

/// One cluster-mate's contribution to a correction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeerIntent {
    /// Direction of the peer's intended move, in degrees.
    pub direction_degrees: f64,
    pub confidence:        f32,
    /// Hex distance between the correcting agent and the peer.
    pub distance:          u32,
}

/// Blend `own_degrees` with `peers`; returns the (unwrapped) averaged angle.
///
/// With no peer carrying weight the result is exactly `own_degrees`.
pub fn blend_direction<I>(own_degrees: f64, trust: f32, peers: I) -> f64
where
    I: IntoIterator<Item = PeerIntent>,
{
    let mut total = own_degrees;
    let mut accepted = 0u32;

    for peer in peers {
        let weight = peer.confidence as f64 * trust as f64;
        if weight == 0.0 {
            continue;
        }
        let delta = own_degrees - peer.direction_degrees;
        let distance = peer.distance.max(1) as f64;
        total += delta * weight / (distance * DISTANCE_DAMPING);
        accepted += 1;
    }

    total / (accepted + 1) as f64
}

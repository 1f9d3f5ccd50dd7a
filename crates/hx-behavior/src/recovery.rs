//! Local search for a replacement move when the intended one hits a wall.

use hx_core::{AgentRng, HexCoord, WallSet};

/// Pick the legal unit move that brings `location` closest to `target`.
///
/// A move is legal if its destination is neither a wall nor
/// `previous_location` (stepping straight back would oscillate).  Candidates
/// are scanned in [`HexCoord::possible_moves`] order; a strictly closer
/// candidate replaces the current best, an equally close one replaces it on a
/// coin flip.
///
/// If no move is legal the reverse of `intended` is returned unchanged; the
/// orchestrator's arbitration rejects it if it is still blocked.
pub fn recover_from_obstacle(
    location:          HexCoord,
    previous_location: HexCoord,
    intended:          HexCoord,
    target:            HexCoord,
    walls:             &WallSet,
    rng:               &mut AgentRng,
) -> HexCoord {
    let mut best: Option<(HexCoord, u32)> = None;

    for &candidate in HexCoord::possible_moves() {
        let destination = location + candidate;
        if walls.contains(destination) || destination == previous_location {
            continue;
        }
        let distance = destination.distance(target);
        best = match best {
            Some((_, best_distance)) if distance < best_distance => Some((candidate, distance)),
            Some((_, best_distance)) if distance == best_distance && rng.coin_flip() => {
                Some((candidate, distance))
            }
            None => Some((candidate, distance)),
            keep => keep,
        };
    }

    best.map_or(-intended, |(m, _)| m)
}

//! Move arbitration between the decision and commit phases.
//!
//! Rules, applied until nothing changes:
//!
//! 1. A move whose destination is a wall is rejected.
//! 2. Agents that will not move hold their own cell.
//! 3. Movers claim destinations in ascending agent order; a mover whose
//!    destination is already held or claimed is rejected and then holds its
//!    own cell, which may in turn displace a later claim on the next pass.
//!
//! Two agents may swap cells in one tick.

use hx_core::{HexCoord, WallSet};

#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<HexCoord, usize>;
#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<HexCoord, usize>;

/// One agent's position and planned offset for the tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub from: HexCoord,
    pub step: HexCoord,
}

impl MovePlan {
    #[inline]
    fn destination(self) -> HexCoord {
        self.from + self.step
    }
}

/// Return the indices (into `plans`) of rejected moves, ascending.
///
/// Assumes no two plans share a `from` cell.
pub fn arbitrate(plans: &[MovePlan], walls: &WallSet) -> Vec<usize> {
    let mut moving: Vec<bool> = plans
        .iter()
        .map(|p| p.step != HexCoord::ZERO && !walls.contains(p.destination()))
        .collect();
    let mut rejected: Vec<bool> = plans
        .iter()
        .map(|p| p.step != HexCoord::ZERO && walls.contains(p.destination()))
        .collect();

    loop {
        let mut claims = CellMap::default();
        for (i, p) in plans.iter().enumerate().filter(|(i, _)| !moving[*i]) {
            claims.insert(p.from, i);
        }

        let mut changed = false;
        for (i, p) in plans.iter().enumerate() {
            if !moving[i] {
                continue;
            }
            if claims.contains_key(&p.destination()) {
                moving[i] = false;
                rejected[i] = true;
                changed = true;
            } else {
                claims.insert(p.destination(), i);
            }
        }

        if !changed {
            break;
        }
    }

    rejected
        .iter()
        .enumerate()
        .filter_map(|(i, &r)| r.then_some(i))
        .collect()
}

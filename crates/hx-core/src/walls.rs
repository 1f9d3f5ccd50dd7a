//! The static obstacle set shared by every agent for a whole run.

use rustc_hash::FxHashSet;

use crate::HexCoord;

/// An immutable set of wall cells.
///
/// Built once at simulation start and shared read-only (usually behind an
/// `Arc`) by the orchestrator and every agent behavior.
#[derive(Clone, Debug, Default)]
pub struct WallSet {
    cells: FxHashSet<HexCoord>,
}

impl WallSet {
    /// An empty wall set (open plane).
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` if `cell` is a wall.
    #[inline]
    pub fn contains(&self, cell: HexCoord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate the wall cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<HexCoord> for WallSet {
    fn from_iter<I: IntoIterator<Item = HexCoord>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

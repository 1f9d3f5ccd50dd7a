//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub`; prefer
//! `.index()` when indexing a `Vec`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Agent identifier; also the agent's index in the simulation's agent list.
    pub struct AgentId(u32);
}

typed_id! {
    /// Cluster label produced by a cluster assigner.
    ///
    /// Labels are only meaningful within one epoch.  `ClusterId(0)` doubles as
    /// the "unassigned" value, so always pair it with the agent's
    /// cluster-defined flag.
    pub struct ClusterId(u32);
}

impl ClusterId {
    pub const UNASSIGNED: ClusterId = ClusterId(0);
}

impl Default for ClusterId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

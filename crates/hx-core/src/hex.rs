//! Axial hex-grid coordinates and the movement algebra over them.
//!
//! # Layout
//!
//! Cells are addressed by `(row, column)` on an axial lattice (column = `q`,
//! row = `r`).  The six unit offsets, listed counter-clockwise from east:
//!
//! ```text
//!   index  offset (row, col)  degrees
//!   0      ( 0, +1)           0
//!   1      (-1, +1)           60
//!   2      (-1,  0)           120
//!   3      ( 0, -1)           180
//!   4      (+1, -1)           240
//!   5      (+1,  0)           300
//! ```
//!
//! This order is the enumeration order of [`HexCoord::possible_moves`] and
//! therefore the tie-break order of [`HexCoord::compute_move`]: when several
//! offsets reach the same minimal distance, the one with the smallest angle
//! wins.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Neg, Sub};
use std::str::FromStr;

use crate::{AgentRng, CoreError};

/// A cell on the axial hex lattice.  Also used for relative offsets ("moves").
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[i32; 2]", into = "[i32; 2]"))]
pub struct HexCoord {
    pub row:    i32,
    pub column: i32,
}

/// The six unit offsets in counter-clockwise order starting east.
const UNIT_MOVES: [HexCoord; 6] = [
    HexCoord::new(0, 1),
    HexCoord::new(-1, 1),
    HexCoord::new(-1, 0),
    HexCoord::new(0, -1),
    HexCoord::new(1, -1),
    HexCoord::new(1, 0),
];

const DEGREES_PER_DIRECTION: f64 = 60.0;

impl HexCoord {
    /// The zero offset ("stay").
    pub const ZERO: HexCoord = HexCoord::new(0, 0);

    #[inline]
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// Hex-grid distance in cells.
    #[inline]
    pub fn distance(self, other: HexCoord) -> u32 {
        let dr = self.row - other.row;
        let dc = self.column - other.column;
        (dr.unsigned_abs() + dc.unsigned_abs() + (dr + dc).unsigned_abs()) / 2
    }

    /// The six unit offsets, in fixed enumeration order.  Excludes "stay".
    #[inline]
    pub fn possible_moves() -> &'static [HexCoord; 6] {
        &UNIT_MOVES
    }

    /// The six neighboring cells of `self`, in [`possible_moves`] order.
    ///
    /// [`possible_moves`]: Self::possible_moves
    pub fn neighbors(self) -> impl Iterator<Item = HexCoord> {
        UNIT_MOVES.iter().map(move |&m| self + m)
    }

    /// `true` if `self` is one of the six unit offsets.
    #[inline]
    pub fn is_unit_move(self) -> bool {
        UNIT_MOVES.contains(&self)
    }

    /// A uniformly random unit offset.
    pub fn random_move(rng: &mut AgentRng) -> HexCoord {
        UNIT_MOVES[rng.gen_range(0..UNIT_MOVES.len())]
    }

    /// Angle of a unit offset in degrees (`0, 60, …, 300`).
    ///
    /// Returns `None` for the zero offset and for anything that is not a unit
    /// offset.
    pub fn direction_in_degrees(self) -> Option<f64> {
        UNIT_MOVES
            .iter()
            .position(|&m| m == self)
            .map(|i| i as f64 * DEGREES_PER_DIRECTION)
    }

    /// The unit offset whose angle is nearest to `degrees`, wrapping modulo 360.
    ///
    /// Exact half-way angles (e.g. 30°) round away from zero before wrapping.
    pub fn direction_from_degrees(degrees: f64) -> HexCoord {
        let steps = (degrees / DEGREES_PER_DIRECTION).round() as i64;
        UNIT_MOVES[steps.rem_euclid(UNIT_MOVES.len() as i64) as usize]
    }

    /// The unit offset (or zero) that minimizes the distance from `self` to
    /// `target` after one step.
    ///
    /// Only a strict improvement replaces the current best, so ties go to the
    /// first offset in enumeration order and `ZERO` is returned when no
    /// neighbor is closer (in particular when `self == target`).
    pub fn compute_move(self, target: HexCoord) -> HexCoord {
        let mut best = HexCoord::ZERO;
        let mut best_distance = self.distance(target);
        for &m in &UNIT_MOVES {
            let d = (self + m).distance(target);
            if d < best_distance {
                best = m;
                best_distance = d;
            }
        }
        best
    }
}

impl Add for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.row + rhs.row, self.column + rhs.column)
    }
}

impl AddAssign for HexCoord {
    #[inline]
    fn add_assign(&mut self, rhs: HexCoord) {
        self.row += rhs.row;
        self.column += rhs.column;
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.row - rhs.row, self.column - rhs.column)
    }
}

impl Neg for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn neg(self) -> HexCoord {
        HexCoord::new(-self.row, -self.column)
    }
}

/// Component-wise division truncating toward zero (centroid averaging).
///
/// # Panics
/// Panics if `rhs == 0`.
impl Div<i32> for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn div(self, rhs: i32) -> HexCoord {
        HexCoord::new(self.row / rhs, self.column / rhs)
    }
}

impl From<[i32; 2]> for HexCoord {
    fn from([row, column]: [i32; 2]) -> Self {
        HexCoord::new(row, column)
    }
}

impl From<HexCoord> for [i32; 2] {
    fn from(c: HexCoord) -> Self {
        [c.row, c.column]
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Parses `"row,column"` (whitespace around either number is ignored).
impl FromStr for HexCoord {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once(',')
            .ok_or_else(|| CoreError::Parse(format!("expected `row,column`, got `{s}`")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|e| CoreError::Parse(format!("invalid coordinate `{part}`: {e}")))
        };
        Ok(HexCoord::new(parse(row)?, parse(column)?))
    }
}

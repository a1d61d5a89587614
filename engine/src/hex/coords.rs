//! Hex Coordinates
//!
//! Axial coordinates (q, r) are the canonical position identity on the map.
//! Offset coordinates (x, y) only exist for rectangular initialization and
//! for reading legacy map files.
//!
//! # Coordinate System
//!
//! - **Axial (q, r)**: two-component addressing; cube `s = -(q + r)`
//! - **Offset (x, y)**: rectangular column/row; odd columns shift
//!
//! ```text
//! offset -> axial:  q = x,  r = y - (x - (x & 1)) / 2
//! axial -> offset:  x = q,  y = r + (q - (q & 1)) / 2
//! ```
//!
//! Every conversion is total. Integer steps wrap at the `i32` edges instead
//! of overflowing, and cube arithmetic runs in `i64`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axial hex coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct AxialCoord {
    pub q: i32,
    pub r: i32,
}

static_assertions::assert_eq_size!(AxialCoord, (i32, i32));

impl AxialCoord {
    pub const ORIGIN: AxialCoord = AxialCoord { q: 0, r: 0 };

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub const fn s(&self) -> i64 {
        -(self.q as i64) - self.r as i64
    }

    /// Number of steps between two hexes.
    pub fn distance(&self, other: &Self) -> u64 {
        let dq = self.q.abs_diff(other.q) as u64;
        let dr = self.r.abs_diff(other.r) as u64;
        let ds = self.s().abs_diff(other.s());
        (dq + dr + ds) / 2
    }

    /// The adjacent hex in `direction`.
    pub fn neighbor(&self, direction: HexDirection) -> Self {
        let step = direction.offset();
        Self::new(self.q.wrapping_add(step.q), self.r.wrapping_add(step.r))
    }

    /// All 6 neighbors in [`HexDirection::ALL`] order.
    pub fn neighbors(&self) -> [AxialCoord; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }

    /// Every hex within `radius` steps, including `self`.
    ///
    /// Yields `3 * radius * (radius + 1) + 1` coordinates.
    pub fn hexes_in_range(&self, radius: u32) -> Vec<AxialCoord> {
        let range = radius as i32;
        let mut results = Vec::with_capacity((3 * radius * (radius + 1) + 1) as usize);
        for dq in -range..=range {
            for dr in (-range).max(-dq - range)..=range.min(-dq + range) {
                results.push(AxialCoord::new(self.q.wrapping_add(dq), self.r.wrapping_add(dr)));
            }
        }
        results
    }

    pub fn to_offset(self) -> OffsetCoord {
        axial_to_offset(self.q, self.r)
    }
}

impl fmt::Display for AxialCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for AxialCoord {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// Rectangular column/row coordinate used by legacy files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OffsetCoord {
    pub x: i32,
    pub y: i32,
}

impl OffsetCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_axial(self) -> AxialCoord {
        offset_to_axial(self.x, self.y)
    }
}

/// The six hex directions, in the order consumers index them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// All directions. The order is part of the public contract.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];

    /// Axial step for this direction.
    pub const fn offset(&self) -> AxialCoord {
        match self {
            HexDirection::East => AxialCoord::new(1, 0),
            HexDirection::NorthEast => AxialCoord::new(1, -1),
            HexDirection::NorthWest => AxialCoord::new(0, -1),
            HexDirection::West => AxialCoord::new(-1, 0),
            HexDirection::SouthWest => AxialCoord::new(-1, 1),
            HexDirection::SouthEast => AxialCoord::new(0, 1),
        }
    }

    pub const fn opposite(&self) -> Self {
        match self {
            HexDirection::East => HexDirection::West,
            HexDirection::NorthEast => HexDirection::SouthWest,
            HexDirection::NorthWest => HexDirection::SouthEast,
            HexDirection::West => HexDirection::East,
            HexDirection::SouthWest => HexDirection::NorthEast,
            HexDirection::SouthEast => HexDirection::NorthWest,
        }
    }
}

/// Converts offset (x, y) to axial (q, r).
pub fn offset_to_axial(x: i32, y: i32) -> AxialCoord {
    // (x - (x & 1)) is always even, so the division is exact.
    AxialCoord::new(x, y.wrapping_sub((x - (x & 1)) / 2))
}

/// Converts axial (q, r) to offset (x, y). Exact inverse of [`offset_to_axial`].
pub fn axial_to_offset(q: i32, r: i32) -> OffsetCoord {
    OffsetCoord::new(q, r.wrapping_add((q - (q & 1)) / 2))
}

/// Rounds a fractional axial position to the nearest hex.
///
/// Rounds each cube component independently, then recomputes the one with
/// the largest rounding error from the other two so that `q + r + s == 0`.
pub fn round_axial(q: f64, r: f64) -> AxialCoord {
    let s = -q - r;

    let mut rq = q.round();
    let mut rr = r.round();
    let rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    }
    // Otherwise s carries the error and is simply dropped.

    AxialCoord::new(rq as i32, rr as i32)
}

/// Hex distance between two axial positions.
pub fn axial_distance(a: AxialCoord, b: AxialCoord) -> u64 {
    a.distance(&b)
}

/// The 6 neighbors of (q, r): E, NE, NW, W, SW, SE.
pub fn axial_neighbors(q: i32, r: i32) -> [AxialCoord; 6] {
    AxialCoord::new(q, r).neighbors()
}

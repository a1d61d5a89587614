//! Hex Map Store
//!
//! The authoritative in-memory map: a sparse mapping from axial position to
//! a stack of hexes, one per height level.
//!
//! # Stack invariant
//!
//! - Every stack is sorted ascending by `height`.
//! - A stack holds at most one hex per height.
//! - An empty stack is never stored; removing the last hex drops the key.
//!
//! # Example
//!
//! ```
//! use warlords_map_engine::map::{Hex, HexMap, Terrain};
//!
//! let mut map = HexMap::new(10, 10).unwrap();
//! map.set_hex(3, 3, Hex::new(3, 3, Terrain::Plains)).unwrap();
//! map.set_hex(3, 3, Hex::new(3, 3, Terrain::Forest).with_height(1)).unwrap();
//!
//! // No height means "topmost"
//! assert_eq!(map.get_hex(3, 3, None).unwrap().terrain, Terrain::Forest);
//! assert_eq!(map.get_next_height(3, 3), 2);
//! ```

use std::collections::HashMap;

use super::hex::{Hex, Terrain};
use super::MAX_STACK_HEIGHT;
use crate::error::MapError;
use crate::hex::{AxialCoord, offset_to_axial};

/// Default cap on `width * height`.
pub const DEFAULT_MAX_AREA: u64 = 1_000_000;

/// Sparse, height-stacked hex map.
#[derive(Clone, Debug, PartialEq)]
pub struct HexMap {
    width: u32,
    height: u32,
    /// Sparse storage of stacks indexed by axial position
    hexes: HashMap<AxialCoord, Vec<Hex>>,
}

impl HexMap {
    /// Creates an empty map, capped at [`DEFAULT_MAX_AREA`].
    pub fn new(width: u32, height: u32) -> Result<Self, MapError> {
        Self::with_max_area(width, height, DEFAULT_MAX_AREA)
    }

    /// Creates an empty map with an explicit area cap.
    pub fn with_max_area(width: u32, height: u32, max_area: u64) -> Result<Self, MapError> {
        if width == 0 || height == 0 {
            return Err(MapError::InvalidDimensions {
                width,
                height,
                reason: "width and height must be positive".to_string(),
            });
        }
        let area = width as u64 * height as u64;
        if area > max_area {
            return Err(MapError::InvalidDimensions {
                width,
                height,
                reason: format!("map too large: {area} hexes exceeds the limit of {max_area}"),
            });
        }
        Ok(Self {
            width,
            height,
            hexes: HashMap::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks `0 <= q < width` and `-width <= r < height + width`.
    ///
    /// The `r` range is wider than any rectangular offset grid needs, so
    /// that offset -> axial skew never pushes an edge column out of bounds.
    pub fn is_valid_coordinate(&self, q: i32, r: i32) -> bool {
        let (q, r) = (q as i64, r as i64);
        let width = self.width as i64;
        let height = self.height as i64;
        (0..width).contains(&q) && (-width..height + width).contains(&r)
    }

    /// Returns the hex at `height`, or the topmost hex when `height` is `None`.
    pub fn get_hex(&self, q: i32, r: i32, height: Option<u8>) -> Option<&Hex> {
        let stack = self.get_hex_stack(q, r);
        match height {
            Some(h) => stack.iter().find(|hex| hex.height == h),
            None => stack.last(),
        }
    }

    /// Edits the hex at `height` (topmost when `None`) in place and returns
    /// it, or `None` if there is no such hex.
    ///
    /// The hex keeps its stack level: a `height` written by `edit` is
    /// discarded. Move hexes between levels with [`HexMap::remove_hex`] and
    /// [`HexMap::set_hex`].
    pub fn update_hex<F>(&mut self, q: i32, r: i32, height: Option<u8>, edit: F) -> Option<&Hex>
    where
        F: FnOnce(&mut Hex),
    {
        let stack = self.hexes.get_mut(&AxialCoord::new(q, r))?;
        let hex = match height {
            Some(h) => stack.iter_mut().find(|hex| hex.height == h),
            None => stack.last_mut(),
        }?;
        let level = hex.height;
        edit(hex);
        hex.height = level;
        Some(hex)
    }

    /// The stack at (q, r), bottom first. Empty for missing or invalid positions.
    pub fn get_hex_stack(&self, q: i32, r: i32) -> &[Hex] {
        self.hexes
            .get(&AxialCoord::new(q, r))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Places `hex` into the stack at (q, r).
    ///
    /// An existing hex at the same height is replaced in place and
    /// returned. Otherwise the hex is added and the stack re-sorted.
    ///
    /// # Errors
    ///
    /// - [`MapError::CoordinateMismatch`] if the hex's own position differs
    /// - [`MapError::OutOfBounds`] if (q, r) is not a valid coordinate
    /// - [`MapError::InvalidHeight`] if the hex sits above the top level
    pub fn set_hex(&mut self, q: i32, r: i32, hex: Hex) -> Result<Option<Hex>, MapError> {
        let coord = AxialCoord::new(q, r);
        if hex.coord() != coord {
            return Err(MapError::CoordinateMismatch {
                expected: coord,
                found: hex.coord(),
            });
        }
        if !self.is_valid_coordinate(q, r) {
            return Err(MapError::OutOfBounds { q, r });
        }
        if hex.height > MAX_STACK_HEIGHT {
            return Err(MapError::InvalidHeight(hex.height));
        }

        let stack = self.hexes.entry(coord).or_default();
        if let Some(slot) = stack.iter_mut().find(|h| h.height == hex.height) {
            return Ok(Some(std::mem::replace(slot, hex)));
        }
        stack.push(hex);
        stack.sort_by_key(|h| h.height);
        Ok(None)
    }

    /// Removes the hex at `height`, or the topmost one when `height` is `None`.
    ///
    /// Drops the position entirely once its stack is empty. Missing hexes
    /// and invalid coordinates are a no-op.
    pub fn remove_hex(&mut self, q: i32, r: i32, height: Option<u8>) -> Option<Hex> {
        let coord = AxialCoord::new(q, r);
        let stack = self.hexes.get_mut(&coord)?;
        let removed = match height {
            Some(h) => {
                let index = stack.iter().position(|hex| hex.height == h)?;
                stack.remove(index)
            }
            None => stack.pop()?,
        };
        if stack.is_empty() {
            self.hexes.remove(&coord);
        }
        Some(removed)
    }

    /// Whether a hex exists at `height`, or at any height when `None`.
    pub fn has_hex(&self, q: i32, r: i32, height: Option<u8>) -> bool {
        self.get_hex(q, r, height).is_some()
    }

    /// Next stacking level: 0 for an empty position, else one above the
    /// topmost hex, capped at [`MAX_STACK_HEIGHT`].
    ///
    /// Gaps below the top are not considered; check with
    /// [`HexMap::has_hex`] when a guaranteed-free slot is needed.
    pub fn get_next_height(&self, q: i32, r: i32) -> u8 {
        match self.get_hex_stack(q, r).last() {
            Some(top) => (top.height + 1).min(MAX_STACK_HEIGHT),
            None => 0,
        }
    }

    /// The in-bounds subset of the 6 neighbors, in direction order.
    pub fn get_neighbor_coordinates(&self, q: i32, r: i32) -> Vec<AxialCoord> {
        AxialCoord::new(q, r)
            .neighbors()
            .into_iter()
            .filter(|n| self.is_valid_coordinate(n.q, n.r))
            .collect()
    }

    /// Covers the rectangular offset grid `width x height` with ground-level
    /// hexes of one terrain, replacing whatever sits at height 0.
    pub fn fill_rectangle(&mut self, terrain: &Terrain) -> Result<(), MapError> {
        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                let coord = offset_to_axial(x, y);
                self.set_hex(coord.q, coord.r, Hex::at(coord, terrain.clone()))?;
            }
        }
        Ok(())
    }

    /// Iterates over non-empty stacks in unspecified order.
    pub fn iter_stacks(&self) -> impl Iterator<Item = (AxialCoord, &[Hex])> {
        self.hexes
            .iter()
            .map(|(coord, stack)| (*coord, stack.as_slice()))
    }

    /// Iterates over every hex in every stack.
    pub fn iter_hexes(&self) -> impl Iterator<Item = &Hex> {
        self.hexes.values().flatten()
    }

    /// Number of occupied positions.
    pub fn position_count(&self) -> usize {
        self.hexes.len()
    }

    /// Total number of hexes across all stacks.
    pub fn hex_count(&self) -> usize {
        self.hexes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }

    pub fn clear(&mut self) {
        self.hexes.clear();
    }
}

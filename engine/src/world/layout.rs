//! Hex Layout Module
//!
//! Converts axial hex positions to 2D layout (pixel) space and to centered
//! world-space placement, and back.
//!
//! ## Pixel space
//! - x = size * (sqrt(3) * q + sqrt(3)/2 * r)
//! - y = size * 3/2 * r
//!
//! ## World space
//! Goes through offset coordinates. Columns are `1.5 * R * size` apart
//! (R = 2/sqrt(3)), rows `2 * size` apart, and odd columns drop by `size`.
//! The whole grid is shifted by half its extent so the map is centered on
//! the origin. Returned vectors carry world X in `x` and world Z in `y`.

use glam::DVec2;

use crate::hex::{AxialCoord, axial_to_offset, offset_to_axial, round_axial};

/// Default hex size used by the editor scene.
pub const DEFAULT_HEX_SIZE: f64 = 3.5;

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Circumradius factor for a hex of unit inradius (2 / sqrt(3)).
const CIRCUMRADIUS_FACTOR: f64 = 2.0 / SQRT_3;

/// Axial -> pixel (layout) position.
pub fn axial_to_pixel(q: i32, r: i32, hex_size: f64) -> DVec2 {
    let (q, r) = (q as f64, r as f64);
    DVec2::new(
        hex_size * (SQRT_3 * q + SQRT_3 / 2.0 * r),
        hex_size * (3.0 / 2.0 * r),
    )
}

/// Pixel -> nearest axial position.
pub fn pixel_to_axial(x: f64, y: f64, hex_size: f64) -> AxialCoord {
    // Inverse of the axial_to_pixel formulas
    let r = (2.0 / 3.0 * y) / hex_size;
    let q = (x / hex_size - SQRT_3 / 2.0 * r) / SQRT_3;
    round_axial(q, r)
}

/// Horizontal distance between adjacent column centers.
fn column_spacing(hex_size: f64) -> f64 {
    1.5 * CIRCUMRADIUS_FACTOR * hex_size
}

/// Vertical distance between adjacent row centers.
fn row_spacing(hex_size: f64) -> f64 {
    2.0 * hex_size
}

fn centering_offset(map_width: u32, map_height: u32, hex_size: f64) -> DVec2 {
    DVec2::new(
        map_width as f64 * column_spacing(hex_size) / 2.0,
        map_height as f64 * row_spacing(hex_size) / 2.0,
    )
}

/// Axial -> centered world position (`x` = world X, `y` = world Z).
pub fn axial_to_world(q: i32, r: i32, map_width: u32, map_height: u32, hex_size: f64) -> DVec2 {
    let offset = axial_to_offset(q, r);
    let odd_shift = if offset.x & 1 == 1 { hex_size } else { 0.0 };

    let x = offset.x as f64 * column_spacing(hex_size);
    let z = offset.y as f64 * row_spacing(hex_size) + odd_shift;

    DVec2::new(x, z) - centering_offset(map_width, map_height, hex_size)
}

/// Centered world position -> axial. Exact inverse of [`axial_to_world`]
/// for hex centers; other points resolve to the nearest offset cell.
pub fn world_to_axial(
    world_x: f64,
    world_z: f64,
    map_width: u32,
    map_height: u32,
    hex_size: f64,
) -> AxialCoord {
    let local = DVec2::new(world_x, world_z) + centering_offset(map_width, map_height, hex_size);

    let x = (local.x / column_spacing(hex_size)).round() as i32;
    let odd_shift = if x & 1 == 1 { hex_size } else { 0.0 };
    let y = ((local.y - odd_shift) / row_spacing(hex_size)).round() as i32;

    offset_to_axial(x, y)
}

/// Layout parameters shared by the rendering and picking code.
///
/// Bundles the hex size with the map dimensions so callers don't thread
/// three scalars through every conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    /// Hex scale. Pixel and world positions scale linearly with it.
    pub hex_size: f64,
    /// Map width in columns
    pub map_width: u32,
    /// Map height in rows
    pub map_height: u32,
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            hex_size: DEFAULT_HEX_SIZE,
            map_width: 1,
            map_height: 1,
        }
    }
}

impl HexLayout {
    pub fn new(map_width: u32, map_height: u32, hex_size: f64) -> Self {
        Self {
            hex_size,
            map_width,
            map_height,
        }
    }

    pub fn to_pixel(&self, coord: AxialCoord) -> DVec2 {
        axial_to_pixel(coord.q, coord.r, self.hex_size)
    }

    pub fn from_pixel(&self, pos: DVec2) -> AxialCoord {
        pixel_to_axial(pos.x, pos.y, self.hex_size)
    }

    pub fn to_world(&self, coord: AxialCoord) -> DVec2 {
        axial_to_world(coord.q, coord.r, self.map_width, self.map_height, self.hex_size)
    }

    pub fn from_world(&self, pos: DVec2) -> AxialCoord {
        world_to_axial(pos.x, pos.y, self.map_width, self.map_height, self.hex_size)
    }

    /// Width (X) and depth (Z) covered by the hex centers' grid.
    pub fn world_extent(&self) -> DVec2 {
        centering_offset(self.map_width, self.map_height, self.hex_size) * 2.0
    }
}

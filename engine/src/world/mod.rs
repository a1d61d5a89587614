//! World Module
//!
//! Continuous-space placement of hexes: 2D layout (pixel) coordinates and
//! centered world coordinates used by the renderer and picker.

pub mod layout;

pub use layout::{
    DEFAULT_HEX_SIZE, HexLayout, axial_to_pixel, axial_to_world, pixel_to_axial, world_to_axial,
};

//! Hex Grid Module
//!
//! Integer hex-grid addressing: axial and offset coordinates, directions,
//! distance, neighbors and rounding.

pub mod coords;

pub use coords::{
    AxialCoord, HexDirection, OffsetCoord, axial_distance, axial_neighbors, axial_to_offset,
    offset_to_axial, round_axial,
};

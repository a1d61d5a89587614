//! Map Module
//!
//! The hex entity and the height-stacked map store it lives in.
//!
//! - [`hex`] - `Hex`, terrain tags and model references
//! - [`store`] - `HexMap`, the sparse stack-per-position grid
//! - [`rotation`] - degree/radian boundary for hex facings
//! - [`size`] - map size tags and presets

pub mod hex;
pub mod rotation;
pub mod size;
pub mod store;

/// Highest stack level a hex may occupy (levels are 0..=4).
pub const MAX_STACK_HEIGHT: u8 = 4;

pub use hex::{Hex, ModelData, Terrain};
pub use size::MapSize;
pub use store::{DEFAULT_MAX_AREA, HexMap};

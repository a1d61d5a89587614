//! Warlords Map Engine
//!
//! Hex-map data model, coordinate conversions and map file format for the
//! Warlords map editor. Rendering, editor UI and map generation live
//! elsewhere and talk to this crate through the store, converter and
//! serializer entry points.
//!
//! # Modules
//!
//! - [`hex`] - Axial/offset coordinates, directions, distance, rounding
//! - [`world`] - Pixel and centered world-space conversions
//! - [`map`] - `Hex` entity and the height-stacked `HexMap` store
//! - [`io`] - Versioned JSON map files (save, load, migrate, validate)
//! - [`config`] - Map limits and layout defaults
//! - [`error`] - `MapError`
//!
//! # Example
//!
//! ```
//! use warlords_map_engine::io::{self, SerializeOptions};
//! use warlords_map_engine::map::{Hex, HexMap, MapSize, Terrain};
//!
//! let mut map = HexMap::new(10, 10)?;
//! map.set_hex(3, 3, Hex::new(3, 3, Terrain::Plains))?;
//!
//! let json = io::serialize(&map, MapSize::Tiny, &SerializeOptions::default())?;
//! let loaded = io::deserialize(&json)?;
//! assert_eq!(loaded.map, map);
//! # Ok::<(), warlords_map_engine::MapError>(())
//! ```

pub mod config;
pub mod error;
pub mod hex;
pub mod io;
pub mod map;
pub mod world;

// Re-export the most used types at crate level for convenience
pub use config::MapConfig;
pub use error::MapError;
pub use hex::{AxialCoord, HexDirection, OffsetCoord};
pub use map::{Hex, HexMap, MapSize, ModelData, Terrain};
pub use world::HexLayout;

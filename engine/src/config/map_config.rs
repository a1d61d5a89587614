//! Map Configuration
//!
//! Limits and defaults used when creating and laying out maps. `Default`
//! matches the editor's built-in values; a JSON file can override any
//! subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::io::{self, LoadedMap};
use crate::map::{DEFAULT_MAX_AREA, HexMap, Terrain};
use crate::world::{DEFAULT_HEX_SIZE, HexLayout};

/// Central configuration for map creation and layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Upper bound on `width * height` for new or loaded maps
    pub max_area: u64,
    /// Hex scale for pixel/world conversions
    pub hex_size: f64,
    /// Terrain used to fill freshly created maps
    pub default_terrain: Terrain,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            max_area: DEFAULT_MAX_AREA,
            hex_size: DEFAULT_HEX_SIZE,
            default_terrain: Terrain::Plains,
        }
    }
}

impl MapConfig {
    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, MapError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// An empty map of the given size under this config's area cap.
    pub fn new_map(&self, width: u32, height: u32) -> Result<HexMap, MapError> {
        HexMap::with_max_area(width, height, self.max_area)
    }

    /// Reads a map document under this config's area cap.
    pub fn load_map(&self, json: &str) -> Result<LoadedMap, MapError> {
        io::deserialize_with_max_area(json, self.max_area)
    }

    /// Layout for a map of the given size at this config's hex size.
    pub fn layout(&self, map: &HexMap) -> HexLayout {
        HexLayout::new(map.width(), map.height(), self.hex_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::SerializeOptions;
    use crate::map::MapSize;

    #[test]
    fn test_defaults() {
        let config = MapConfig::default();
        assert_eq!(config.max_area, 1_000_000);
        assert_eq!(config.hex_size, 3.5);
        assert_eq!(config.default_terrain, Terrain::Plains);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "maxArea": 400, "defaultTerrain": "water" }"#;
        let config = MapConfig::from_json(json).unwrap();
        assert_eq!(config.max_area, 400);
        assert_eq!(config.default_terrain, Terrain::Water);
        assert_eq!(config.hex_size, DEFAULT_HEX_SIZE);
    }

    #[test]
    fn test_new_map_respects_cap() {
        let config = MapConfig {
            max_area: 100,
            ..Default::default()
        };
        assert!(config.new_map(10, 10).is_ok());
        assert!(matches!(
            config.new_map(11, 10),
            Err(MapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_load_map_respects_cap() {
        let config = MapConfig {
            max_area: 100,
            ..Default::default()
        };
        let options = SerializeOptions::default();
        let small = config.new_map(10, 10).unwrap();
        let json = io::serialize(&small, MapSize::Tiny, &options).unwrap();
        assert_eq!(config.load_map(&json).unwrap().map.width(), 10);

        let large = HexMap::new(20, 10).unwrap();
        let json = io::serialize(&large, MapSize::Tiny, &options).unwrap();
        assert!(matches!(
            config.load_map(&json),
            Err(MapError::InvalidDimensions { .. })
        ));
        assert!(io::deserialize(&json).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = MapConfig::load(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(MapError::Io(_))));
    }

    #[test]
    fn test_layout_uses_hex_size() {
        let config = MapConfig {
            hex_size: 2.0,
            ..Default::default()
        };
        let map = config.new_map(8, 6).unwrap();
        let layout = config.layout(&map);
        assert_eq!(layout.hex_size, 2.0);
        assert_eq!((layout.map_width, layout.map_height), (8, 6));
    }
}

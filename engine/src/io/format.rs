//! Map File Format
//!
//! Typed schema for `.json` map files. Two layouts exist on disk:
//!
//! - **1.0** (legacy): hex keys, hex records and buildings use offset
//!   coordinates (`"x"`, `"y"`).
//! - **2.0** (current): everything is axial (`"q"`, `"r"`).
//!
//! Both layouts share [`MapDocument`]; only the record types differ. The
//! layout is picked once from the `version` field in [`MapFile::from_value`],
//! and [`MapFile::into_current`] migrates legacy documents to 2.0.
//!
//! Optional hex fields are omitted when at their default (rotation 0, no
//! model, no river) to keep files small.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MapError;
use crate::hex::{AxialCoord, offset_to_axial};
use crate::map::{Hex, MapSize, ModelData, Terrain};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Value of the `format` discriminator.
pub const FORMAT_ID: &str = "warlords-map";

/// Version written by the serializer.
pub const CURRENT_VERSION: &str = "2.0";

/// Offset-coordinate layout.
pub const LEGACY_VERSION: &str = "1.0";

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

fn is_false(value: &bool) -> bool {
    !*value
}

// ============================================================================
// SHARED SECTIONS
// ============================================================================

/// Map metadata block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Epoch milliseconds
    #[serde(default)]
    pub created_at: i64,
    /// Epoch milliseconds; refreshed on every save
    #[serde(default)]
    pub modified_at: i64,
    pub map_size: MapSize,
}

/// `map` block: store dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

/// A building placed on the map, stored apart from terrain stacks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingPlacement {
    pub q: i32,
    pub r: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u8>,
    pub model_data: ModelData,
}

impl BuildingPlacement {
    pub fn coord(&self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }
}

/// Whole-document layout shared by both versions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDocument<H, B> {
    pub version: String,
    pub format: String,
    pub metadata: MapMetadata,
    pub map: MapDimensions,
    /// Position key (`"a,b"`) -> stack records
    pub hexes: BTreeMap<String, Vec<H>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buildings: Option<Vec<B>>,
}

// ============================================================================
// VERSION 2.0 RECORDS
// ============================================================================

/// One hex of a stack, axial layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexRecord {
    pub q: i32,
    pub r: i32,
    pub terrain: Terrain,
    #[serde(default)]
    pub height: u8,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_data: Option<ModelData>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_river: bool,
}

impl From<&Hex> for HexRecord {
    fn from(hex: &Hex) -> Self {
        Self {
            q: hex.q(),
            r: hex.r(),
            terrain: hex.terrain.clone(),
            height: hex.height,
            // JSON has no NaN; a non-finite facing is written as "unrotated".
            rotation: if hex.rotation.is_finite() { hex.rotation } else { 0.0 },
            model_data: hex.model_data.clone(),
            has_river: hex.has_river,
        }
    }
}

impl HexRecord {
    pub fn into_hex(self) -> Hex {
        let mut hex = Hex::new(self.q, self.r, self.terrain)
            .with_height(self.height)
            .with_rotation(self.rotation)
            .with_river(self.has_river);
        hex.model_data = self.model_data;
        hex
    }
}

pub type MapFileV2 = MapDocument<HexRecord, BuildingPlacement>;

// ============================================================================
// VERSION 1.0 RECORDS
// ============================================================================

/// One hex of a stack, offset layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyHexRecord {
    pub x: i32,
    pub y: i32,
    pub terrain: Terrain,
    #[serde(default)]
    pub height: u8,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub model_data: Option<ModelData>,
    #[serde(default)]
    pub has_river: bool,
}

impl LegacyHexRecord {
    fn migrate(self) -> HexRecord {
        let coord = offset_to_axial(self.x, self.y);
        HexRecord {
            q: coord.q,
            r: coord.r,
            terrain: self.terrain,
            height: self.height,
            rotation: self.rotation,
            model_data: self.model_data,
            has_river: self.has_river,
        }
    }
}

/// Building placement, offset layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBuildingPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub height: Option<u8>,
    pub model_data: ModelData,
}

impl LegacyBuildingPlacement {
    fn migrate(self) -> BuildingPlacement {
        let coord = offset_to_axial(self.x, self.y);
        BuildingPlacement {
            q: coord.q,
            r: coord.r,
            height: self.height,
            model_data: self.model_data,
        }
    }
}

pub type MapFileV1 = MapDocument<LegacyHexRecord, LegacyBuildingPlacement>;

// ============================================================================
// POSITION KEYS
// ============================================================================

/// `"q,r"` key for the `hexes` object.
pub fn position_key(coord: AxialCoord) -> String {
    format!("{},{}", coord.q, coord.r)
}

/// Parses a `"a,b"` key. The pair is returned as-is; callers decide whether
/// it is axial or offset.
pub fn parse_position_key(key: &str) -> Result<AxialCoord, MapError> {
    let invalid = || MapError::InvalidPositionKey(key.to_string());
    let (a, b) = key.split_once(',').ok_or_else(invalid)?;
    let a = a.trim().parse::<i32>().map_err(|_| invalid())?;
    let b = b.trim().parse::<i32>().map_err(|_| invalid())?;
    Ok(AxialCoord::new(a, b))
}

// ============================================================================
// VERSIONED FILE
// ============================================================================

/// A parsed map file in whichever layout it was written.
#[derive(Clone, Debug, PartialEq)]
pub enum MapFile {
    V1(MapFileV1),
    V2(MapFileV2),
}

impl MapFile {
    /// Checks the format discriminator and decodes the layout named by
    /// `version`. Unknown versions are decoded as the current layout.
    pub fn from_value(value: Value) -> Result<Self, MapError> {
        let format = value.get("format").and_then(Value::as_str).unwrap_or("");
        if format != FORMAT_ID {
            return Err(MapError::FormatMismatch(format.to_string()));
        }

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match version.as_str() {
            LEGACY_VERSION => {
                log::warn!(
                    "[MapFile] Migrating version {LEGACY_VERSION} map from offset to axial coordinates"
                );
                Ok(MapFile::V1(serde_json::from_value(value)?))
            }
            CURRENT_VERSION => Ok(MapFile::V2(serde_json::from_value(value)?)),
            other => {
                log::warn!(
                    "[MapFile] Unknown map version \"{other}\", loading as {CURRENT_VERSION} (best effort)"
                );
                Ok(MapFile::V2(serde_json::from_value(value)?))
            }
        }
    }

    /// Version string as stored in the file.
    pub fn version(&self) -> &str {
        match self {
            MapFile::V1(doc) => &doc.version,
            MapFile::V2(doc) => &doc.version,
        }
    }

    /// Converts to the current layout. Legacy keys, records and building
    /// positions go through `offset_to_axial`; the stored version string is
    /// kept so callers can tell a migration happened.
    pub fn into_current(self) -> Result<MapFileV2, MapError> {
        let legacy = match self {
            MapFile::V2(doc) => return Ok(doc),
            MapFile::V1(doc) => doc,
        };

        let mut hexes = BTreeMap::new();
        for (key, records) in legacy.hexes {
            let offset = parse_position_key(&key)?;
            let coord = offset_to_axial(offset.q, offset.r);
            let migrated: Vec<HexRecord> =
                records.into_iter().map(LegacyHexRecord::migrate).collect();
            hexes.insert(position_key(coord), migrated);
        }

        let buildings = legacy
            .buildings
            .map(|list| list.into_iter().map(LegacyBuildingPlacement::migrate).collect());

        Ok(MapDocument {
            version: legacy.version,
            format: legacy.format,
            metadata: legacy.metadata,
            map: legacy.map,
            hexes,
            buildings,
        })
    }
}

//! Map Save/Load
//!
//! Turns a [`HexMap`] into a version 2.0 JSON document and back.
//!
//! - [`serialize`] always writes the current version.
//! - [`deserialize`] accepts 1.0 (migrated), 2.0, and unknown versions
//!   (loaded as 2.0 with a warning).
//! - [`validate`] is a structural pre-check that reports every problem at
//!   once, for display in a load dialog.
//!
//! The whole document is produced or consumed in one call.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use super::format::{
    BuildingPlacement, CURRENT_VERSION, FORMAT_ID, HexRecord, MapDimensions, MapDocument, MapFile,
    MapMetadata, parse_position_key, position_key,
};
use crate::error::MapError;
use crate::map::{DEFAULT_MAX_AREA, HexMap, MapSize};

/// Rough per-hex cost of a serialized record, in bytes.
const ESTIMATED_BYTES_PER_HEX: usize = 80;

/// Rough cost of the envelope (version, metadata, map block).
const ESTIMATED_OVERHEAD_BYTES: usize = 256;

// ============================================================================
// OPTIONS / RESULTS
// ============================================================================

/// Extra data written alongside the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SerializeOptions {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Original creation time (epoch ms). `None` stamps the current time.
    pub created_at: Option<i64>,
    /// Write the `buildings` array (only if `buildings` is non-empty).
    pub include_buildings: bool,
    pub buildings: Vec<BuildingPlacement>,
    /// Indented output
    pub pretty: bool,
}

/// Everything recovered from a map file.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedMap {
    pub map: HexMap,
    pub map_size: MapSize,
    pub buildings: Option<Vec<BuildingPlacement>>,
    pub metadata: MapMetadata,
    /// Version string the file was written with
    pub version: String,
}

impl LoadedMap {
    /// Options that re-save this map with its original name, description,
    /// creation time and buildings.
    pub fn save_options(&self) -> SerializeOptions {
        SerializeOptions {
            name: self.metadata.name.clone(),
            description: self.metadata.description.clone(),
            created_at: Some(self.metadata.created_at),
            include_buildings: self.buildings.is_some(),
            buildings: self.buildings.clone().unwrap_or_default(),
            pretty: false,
        }
    }

    /// Whether the file was written in an older layout and was migrated.
    pub fn was_migrated(&self) -> bool {
        self.version != CURRENT_VERSION
    }
}

/// Outcome of [`validate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

// ============================================================================
// SERIALIZE
// ============================================================================

/// Writes `map` as a version 2.0 document.
///
/// # Errors
///
/// Only fails if `serde_json` does; the document itself is always well-formed.
pub fn serialize(
    map: &HexMap,
    map_size: MapSize,
    options: &SerializeOptions,
) -> Result<String, MapError> {
    let now = Utc::now().timestamp_millis();

    let hexes: BTreeMap<String, Vec<HexRecord>> = map
        .iter_stacks()
        .map(|(coord, stack)| {
            (
                position_key(coord),
                stack.iter().map(HexRecord::from).collect(),
            )
        })
        .collect();

    let buildings = (options.include_buildings && !options.buildings.is_empty())
        .then(|| options.buildings.clone());

    let document = MapDocument {
        version: CURRENT_VERSION.to_string(),
        format: FORMAT_ID.to_string(),
        metadata: MapMetadata {
            name: options.name.clone(),
            description: options.description.clone(),
            created_at: options.created_at.unwrap_or(now),
            modified_at: now,
            map_size,
        },
        map: MapDimensions {
            width: map.width(),
            height: map.height(),
        },
        hexes,
        buildings,
    };

    let json = if options.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };

    log::debug!(
        "[Serializer] Saved {} hexes at {} positions ({} bytes)",
        map.hex_count(),
        map.position_count(),
        json.len()
    );
    Ok(json)
}

// ============================================================================
// DESERIALIZE
// ============================================================================

/// Reads a map document of any known version under the default area cap.
///
/// # Errors
///
/// - [`MapError::Json`] for malformed JSON or missing/mistyped fields
/// - [`MapError::FormatMismatch`] if `format` is not `"warlords-map"`
/// - [`MapError::InvalidDimensions`] for an unusable `map` block
/// - [`MapError::InvalidPositionKey`] for an unparsable `hexes` key
/// - store placement errors for records that don't fit their key or the map
pub fn deserialize(json: &str) -> Result<LoadedMap, MapError> {
    deserialize_with_max_area(json, DEFAULT_MAX_AREA)
}

/// [`deserialize`] with a caller-chosen cap on `width * height`.
pub fn deserialize_with_max_area(json: &str, max_area: u64) -> Result<LoadedMap, MapError> {
    let value: Value = serde_json::from_str(json)?;
    load_document(value, max_area)
}

/// [`deserialize`] for an already-parsed document.
pub fn deserialize_value(value: Value) -> Result<LoadedMap, MapError> {
    load_document(value, DEFAULT_MAX_AREA)
}

fn load_document(value: Value, max_area: u64) -> Result<LoadedMap, MapError> {
    let file = MapFile::from_value(value)?;
    let version = file.version().to_string();
    let document = file.into_current()?;

    let mut map = HexMap::with_max_area(document.map.width, document.map.height, max_area)?;
    for (key, records) in document.hexes {
        let coord = parse_position_key(&key)?;
        for record in records {
            map.set_hex(coord.q, coord.r, record.into_hex())?;
        }
    }

    log::debug!(
        "[Serializer] Loaded version {version} map {}x{} with {} hexes",
        map.width(),
        map.height(),
        map.hex_count()
    );

    Ok(LoadedMap {
        map,
        map_size: document.metadata.map_size,
        buildings: document.buildings,
        metadata: document.metadata,
        version,
    })
}

// ============================================================================
// VALIDATE
// ============================================================================

fn is_positive_integer(value: Option<&Value>) -> bool {
    value.and_then(Value::as_u64).is_some_and(|n| n > 0)
}

/// Structural check of a parsed document. Never fails; collects every
/// violation instead of stopping at the first.
pub fn validate(document: &Value) -> ValidationReport {
    let mut errors = Vec::new();

    match document.get("format").and_then(Value::as_str) {
        Some(FORMAT_ID) => {}
        Some(other) => errors.push(format!(
            "Invalid format: expected \"{FORMAT_ID}\", found \"{other}\""
        )),
        None => errors.push("Missing format field".to_string()),
    }

    if !document.get("version").is_some_and(Value::is_string) {
        errors.push("Missing version field".to_string());
    }

    match document.get("map") {
        Some(map) if map.is_object() => {
            if !is_positive_integer(map.get("width")) {
                errors.push("Missing or invalid map.width".to_string());
            }
            if !is_positive_integer(map.get("height")) {
                errors.push("Missing or invalid map.height".to_string());
            }
        }
        _ => errors.push("Missing map dimensions".to_string()),
    }

    if !document.get("hexes").is_some_and(Value::is_object) {
        errors.push("Missing or invalid hexes object".to_string());
    }

    match document.get("metadata") {
        Some(metadata) if metadata.is_object() => {
            if metadata.get("mapSize").is_none() {
                errors.push("Missing metadata.mapSize".to_string());
            }
        }
        _ => errors.push("Missing metadata".to_string()),
    }

    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}

// ============================================================================
// SIZE ESTIMATE
// ============================================================================

/// Approximate serialized size in bytes, for display only.
pub fn estimate_size(map: &HexMap) -> usize {
    map.hex_count() * ESTIMATED_BYTES_PER_HEX + ESTIMATED_OVERHEAD_BYTES
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Hex, ModelData, Terrain};
    use serde_json::json;

    fn sample_map() -> HexMap {
        let mut map = HexMap::new(10, 10).unwrap();
        map.set_hex(3, 3, Hex::new(3, 3, Terrain::Plains)).unwrap();
        map.set_hex(3, 3, Hex::new(3, 3, Terrain::Hills).with_height(1))
            .unwrap();
        let mut rotated = Hex::new(5, -2, Terrain::Road).with_river(true);
        rotated.set_rotation_degrees(240.0);
        map.set_hex(5, -2, rotated).unwrap();
        map.set_hex(
            0,
            0,
            Hex::new(0, 0, "castle_ground")
                .with_height(2)
                .with_model(ModelData::new("keep.obj", "keep.mtl", "Keep")),
        )
        .unwrap();
        map
    }

    #[test]
    fn test_serialize_envelope() {
        let json = serialize(&sample_map(), MapSize::Small, &SerializeOptions::default()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], json!("2.0"));
        assert_eq!(value["format"], json!("warlords-map"));
        assert_eq!(value["metadata"]["mapSize"], json!("small"));
        assert_eq!(value["map"], json!({ "width": 10, "height": 10 }));
        assert_eq!(value["hexes"]["3,3"].as_array().unwrap().len(), 2);
        assert!(value.get("buildings").is_none());
        assert!(validate(&value).valid);
    }

    #[test]
    fn test_roundtrip_preserves_hexes() {
        let map = sample_map();
        let json = serialize(&map, MapSize::Tiny, &SerializeOptions::default()).unwrap();
        let loaded = deserialize(&json).unwrap();
        assert_eq!(loaded.map, map);
        assert_eq!(loaded.map_size, MapSize::Tiny);
        assert!(loaded.buildings.is_none());
        assert!(!loaded.was_migrated());
    }

    #[test]
    fn test_buildings_only_when_requested_and_present() {
        let building = BuildingPlacement {
            q: 2,
            r: 2,
            height: Some(1),
            model_data: ModelData::new("mill.obj", "mill.mtl", "Mill"),
        };
        let map = sample_map();

        let skipped = SerializeOptions {
            include_buildings: false,
            buildings: vec![building.clone()],
            ..Default::default()
        };
        let value: Value =
            serde_json::from_str(&serialize(&map, MapSize::Small, &skipped).unwrap()).unwrap();
        assert!(value.get("buildings").is_none());

        let empty = SerializeOptions {
            include_buildings: true,
            ..Default::default()
        };
        let value: Value =
            serde_json::from_str(&serialize(&map, MapSize::Small, &empty).unwrap()).unwrap();
        assert!(value.get("buildings").is_none());

        let included = SerializeOptions {
            include_buildings: true,
            buildings: vec![building.clone()],
            ..Default::default()
        };
        let loaded = deserialize(&serialize(&map, MapSize::Small, &included).unwrap()).unwrap();
        assert_eq!(loaded.buildings, Some(vec![building]));
    }

    #[test]
    fn test_created_at_preserved() {
        let options = SerializeOptions {
            name: Some("Border Marches".to_string()),
            created_at: Some(1_600_000_000_000),
            ..Default::default()
        };
        let json = serialize(&sample_map(), MapSize::Medium, &options).unwrap();
        let loaded = deserialize(&json).unwrap();
        assert_eq!(loaded.metadata.created_at, 1_600_000_000_000);
        assert!(loaded.metadata.modified_at >= loaded.metadata.created_at);
        assert_eq!(loaded.metadata.name.as_deref(), Some("Border Marches"));
        assert_eq!(loaded.save_options().created_at, Some(1_600_000_000_000));
    }

    #[test]
    fn test_deserialize_format_mismatch() {
        let err = deserialize(r#"{"format":"tiled-map","version":"2.0"}"#).unwrap_err();
        assert!(matches!(err, MapError::FormatMismatch(_)));
    }

    #[test]
    fn test_deserialize_malformed_json() {
        assert!(matches!(deserialize("{not json"), Err(MapError::Json(_))));
    }

    #[test]
    fn test_deserialize_bad_key() {
        let value = json!({
            "version": "2.0", "format": FORMAT_ID,
            "metadata": { "mapSize": "tiny" },
            "map": { "width": 4, "height": 4 },
            "hexes": { "oops": [] }
        });
        assert!(matches!(
            deserialize_value(value),
            Err(MapError::InvalidPositionKey(_))
        ));
    }

    #[test]
    fn test_deserialize_record_key_mismatch() {
        let value = json!({
            "version": "2.0", "format": FORMAT_ID,
            "metadata": { "mapSize": "tiny" },
            "map": { "width": 4, "height": 4 },
            "hexes": { "1,1": [ { "q": 2, "r": 1, "terrain": "plains", "height": 0 } ] }
        });
        assert!(matches!(
            deserialize_value(value),
            Err(MapError::CoordinateMismatch { .. })
        ));
    }

    #[test]
    fn test_deserialize_zero_dimensions() {
        let value = json!({
            "version": "2.0", "format": FORMAT_ID,
            "metadata": { "mapSize": "tiny" },
            "map": { "width": 0, "height": 4 },
            "hexes": {}
        });
        assert!(matches!(
            deserialize_value(value),
            Err(MapError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_unknown_version_loads_as_current() {
        let value = json!({
            "version": "3.1", "format": FORMAT_ID,
            "metadata": { "mapSize": "tiny" },
            "map": { "width": 4, "height": 4 },
            "hexes": { "1,1": [ { "q": 1, "r": 1, "terrain": "snow", "height": 0 } ] }
        });
        let loaded = deserialize_value(value).unwrap();
        assert_eq!(loaded.version, "3.1");
        assert_eq!(loaded.map.get_hex(1, 1, None).unwrap().terrain, Terrain::Snow);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let value = json!({
            "version": "2.0", "format": FORMAT_ID,
            "metadata": { "createdAt": 0 },
            "map": { "height": 4 },
            "hexes": {}
        });
        let report = validate(&value);
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.contains("map.width")));
        assert!(report.errors.iter().any(|e| e.contains("mapSize")));
    }

    #[test]
    fn test_validate_empty_document() {
        let report = validate(&json!({}));
        assert!(!report.valid);
        assert_eq!(report.errors.len(), 5);
    }

    #[test]
    fn test_validate_rejects_non_positive_dimensions() {
        let value = json!({
            "version": "2.0", "format": FORMAT_ID,
            "metadata": { "mapSize": "tiny" },
            "map": { "width": 0, "height": -3 },
            "hexes": {}
        });
        assert_eq!(validate(&value).errors.len(), 2);
    }

    #[test]
    fn test_estimate_size_grows_with_hexes() {
        let mut map = HexMap::new(4, 4).unwrap();
        let empty = estimate_size(&map);
        map.fill_rectangle(&Terrain::Plains).unwrap();
        assert_eq!(estimate_size(&map), empty + 16 * ESTIMATED_BYTES_PER_HEX);
    }
}

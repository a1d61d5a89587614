//! Map File I/O
//!
//! - [`format`] - typed 1.0/2.0 document schema and legacy migration
//! - [`serializer`] - `serialize`, `deserialize`, `validate`, `estimate_size`

pub mod format;
pub mod serializer;

pub use format::{
    BuildingPlacement, CURRENT_VERSION, FORMAT_ID, LEGACY_VERSION, MapFile, MapMetadata,
    parse_position_key, position_key,
};
pub use serializer::{
    LoadedMap, SerializeOptions, ValidationReport, deserialize, deserialize_value,
    deserialize_with_max_area, estimate_size, serialize, validate,
};

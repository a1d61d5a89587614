//! Error Types
//!
//! A single error enum shared by the map store, the serializer and the
//! config loader.
//!
//! Query and removal operations on the store never produce these; they
//! return `None`/`false`/empty instead so that edge probing stays cheap.

use thiserror::Error;

use crate::hex::AxialCoord;

/// Errors produced by map construction, mutation and (de)serialization.
#[derive(Debug, Error)]
pub enum MapError {
    /// Width or height is zero, or the area exceeds the configured cap.
    #[error("invalid map dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// A hex was placed at a position that does not match its own `q, r`.
    #[error("hex at {found} cannot be placed at {expected}")]
    CoordinateMismatch {
        expected: AxialCoord,
        found: AxialCoord,
    },

    /// The position lies outside the map's valid coordinate range.
    #[error("coordinate ({q}, {r}) is outside the map")]
    OutOfBounds { q: i32, r: i32 },

    /// Stack level above the maximum.
    #[error("stack height {0} exceeds the maximum of {max}", max = crate::map::MAX_STACK_HEIGHT)]
    InvalidHeight(u8),

    /// The document's `format` discriminator is not a Warlords map.
    #[error("invalid file format: expected \"{expected}\", found \"{0}\"", expected = crate::io::FORMAT_ID)]
    FormatMismatch(String),

    /// A `hexes` key that is not of the form `"a,b"`.
    #[error("invalid position key \"{0}\"")]
    InvalidPositionKey(String),

    /// Malformed JSON or a field of the wrong shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Hex Entity
//!
//! One terrain or building placement on the map: position, terrain tag,
//! stack level, rotation and an optional visual asset reference.
//!
//! `q` and `r` are fixed at construction. Everything else is mutable so the
//! editor can raise, lower or rotate a tile without re-creating it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::rotation;
use crate::hex::AxialCoord;

/// Terrain tag carried by a hex.
///
/// The known tags cover the stock tile set. Anything else a file or
/// generator supplies is kept verbatim in [`Terrain::Custom`] so it
/// survives a load/save cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Terrain {
    #[default]
    Plains,
    Grass,
    Forest,
    Hills,
    Mountain,
    Water,
    Road,
    Desert,
    Swamp,
    Snow,
    Custom(String),
}

impl Terrain {
    /// All built-in tags.
    pub const BUILT_IN: [Terrain; 10] = [
        Terrain::Plains,
        Terrain::Grass,
        Terrain::Forest,
        Terrain::Hills,
        Terrain::Mountain,
        Terrain::Water,
        Terrain::Road,
        Terrain::Desert,
        Terrain::Swamp,
        Terrain::Snow,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Terrain::Plains => "plains",
            Terrain::Grass => "grass",
            Terrain::Forest => "forest",
            Terrain::Hills => "hills",
            Terrain::Mountain => "mountain",
            Terrain::Water => "water",
            Terrain::Road => "road",
            Terrain::Desert => "desert",
            Terrain::Swamp => "swamp",
            Terrain::Snow => "snow",
            Terrain::Custom(tag) => tag,
        }
    }
}

impl From<&str> for Terrain {
    fn from(tag: &str) -> Self {
        Terrain::BUILT_IN
            .iter()
            .find(|t| t.as_str() == tag)
            .cloned()
            .unwrap_or_else(|| Terrain::Custom(tag.to_string()))
    }
}

impl From<String> for Terrain {
    fn from(tag: String) -> Self {
        Terrain::from(tag.as_str())
    }
}

impl From<Terrain> for String {
    fn from(terrain: Terrain) -> Self {
        match terrain {
            Terrain::Custom(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Terrain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Terrain::from(s))
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a 3D model asset. Never interpreted, only carried along.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelData {
    /// Path to the `.obj` mesh
    pub obj: String,
    /// Path to the `.mtl` material library
    pub mtl: String,
    /// Display name
    pub name: String,
}

impl ModelData {
    pub fn new(obj: impl Into<String>, mtl: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            obj: obj.into(),
            mtl: mtl.into(),
            name: name.into(),
        }
    }
}

/// A single tile in a height stack.
#[derive(Clone, Debug, PartialEq)]
pub struct Hex {
    q: i32,
    r: i32,
    /// Terrain tag
    pub terrain: Terrain,
    /// Stack level (0 = ground, at most [`super::MAX_STACK_HEIGHT`])
    pub height: u8,
    /// Facing in radians
    pub rotation: f64,
    /// Optional visual asset placed on this tile
    pub model_data: Option<ModelData>,
    /// River overlay flag
    pub has_river: bool,
}

impl Hex {
    /// Creates a ground-level hex with no rotation, model or river.
    pub fn new(q: i32, r: i32, terrain: impl Into<Terrain>) -> Self {
        Self {
            q,
            r,
            terrain: terrain.into(),
            height: 0,
            rotation: 0.0,
            model_data: None,
            has_river: false,
        }
    }

    pub fn at(coord: AxialCoord, terrain: impl Into<Terrain>) -> Self {
        Self::new(coord.q, coord.r, terrain)
    }

    pub fn with_height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    pub fn with_model(mut self, model: ModelData) -> Self {
        self.model_data = Some(model);
        self
    }

    pub fn with_river(mut self, has_river: bool) -> Self {
        self.has_river = has_river;
        self
    }

    pub fn q(&self) -> i32 {
        self.q
    }

    pub fn r(&self) -> i32 {
        self.r
    }

    pub fn coord(&self) -> AxialCoord {
        AxialCoord::new(self.q, self.r)
    }

    /// Current facing as one of the six degree steps.
    pub fn rotation_degrees(&self) -> u16 {
        rotation::radians_to_degrees(self.rotation)
    }

    /// Sets the facing from degrees, snapping to the nearest step.
    pub fn set_rotation_degrees(&mut self, degrees: f64) {
        self.rotation = rotation::degrees_to_radians(degrees);
    }
}

//! Map size presets.
//!
//! The size tag is stored in map metadata and drives the "new map" presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Map size classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    VeryLarge,
}

impl MapSize {
    pub const ALL: [MapSize; 5] = [
        MapSize::Tiny,
        MapSize::Small,
        MapSize::Medium,
        MapSize::Large,
        MapSize::VeryLarge,
    ];

    /// Preset (width, height) for a new map of this size.
    pub const fn dimensions(&self) -> (u32, u32) {
        match self {
            MapSize::Tiny => (16, 12),
            MapSize::Small => (24, 18),
            MapSize::Medium => (32, 24),
            MapSize::Large => (48, 36),
            MapSize::VeryLarge => (64, 48),
        }
    }

    /// Smallest preset whose area holds `width * height`.
    pub fn classify(width: u32, height: u32) -> MapSize {
        let area = width as u64 * height as u64;
        MapSize::ALL
            .into_iter()
            .find(|size| {
                let (w, h) = size.dimensions();
                area <= w as u64 * h as u64
            })
            .unwrap_or(MapSize::VeryLarge)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            MapSize::Tiny => "tiny",
            MapSize::Small => "small",
            MapSize::Medium => "medium",
            MapSize::Large => "large",
            MapSize::VeryLarge => "very-large",
        }
    }
}

impl fmt::Display for MapSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MapSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MapSize::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unknown map size \"{s}\""))
    }
}

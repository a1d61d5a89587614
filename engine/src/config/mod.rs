//! Config Module
//!
//! Centralized configuration for map limits and layout defaults.

pub mod map_config;

pub use map_config::MapConfig;

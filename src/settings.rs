//! Startup feature toggles
//!
//! Read once before the first frame and never changed afterwards.

use serde::{Deserialize, Serialize};

/// How hit zones are laid out around a vehicle's position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HitZoneHeading {
    /// Zones sit along the direction of travel
    #[default]
    Facing,
    /// Zones sit along a fixed screen-down axis for every vehicle, matching the
    /// first browser release, where the heading expression collapsed to a constant
    Legacy,
}

impl HitZoneHeading {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitZoneHeading::Facing => "Facing",
            HitZoneHeading::Legacy => "Legacy",
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // === Debug ===
    /// Show collision hit-zone markers
    pub show_hit_zones: bool,
    /// Hit zone layout rule
    pub hit_zone_heading: HitZoneHeading,

    // === Visuals ===
    /// Drop shadows under vehicles
    pub shadows: bool,
    /// Decorative trees around the track
    pub trees: bool,
    /// Striped curbs on the lane edges
    pub curbs: bool,
    /// Grid overlay
    pub grid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_hit_zones: false,
            hit_zone_heading: HitZoneHeading::Facing,

            shadows: true,
            trees: true,
            curbs: true,
            grid: false,
        }
    }
}

impl Config {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "oval_rush_config";

    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a JSON config, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed config: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded config from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toggles() {
        let config = Config::default();
        assert!(!config.show_hit_zones);
        assert!(config.shadows);
        assert!(config.trees);
        assert!(config.curbs);
        assert!(!config.grid);
        assert_eq!(config.hit_zone_heading, HitZoneHeading::Facing);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{"show_hit_zones": true, "hit_zone_heading": "legacy"}"#)
            .unwrap();
        assert!(config.show_hit_zones);
        assert_eq!(config.hit_zone_heading, HitZoneHeading::Legacy);
        assert!(config.shadows);
        assert!(!config.grid);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Config::from_json("{not json").is_err());
        assert_eq!(Config::from_json_or_default("{not json"), Config::default());
    }
}

//! Demo configuration

use serde::{Deserialize, Serialize};
use spatial_engine::config::Config;
use spatial_engine::prelude::Vec3;

use crate::components::InstrumentKind;

/// Top-level demo configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BandRoomConfig {
    /// Scan completion thresholds
    pub scan: ScanConfig,

    /// Placement pipeline settings
    pub placement: PlacementSetupConfig,

    /// Simulated room settings
    pub room: RoomConfig,
}

impl Config for BandRoomConfig {}

/// Surface-area thresholds that mark the scan as good enough
///
/// Meeting ANY one of them completes the scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Minimum total surface area, in square meters
    pub min_area_for_complete: f32,

    /// Minimum horizontal surface area, in square meters
    pub min_horiz_area_for_complete: f32,

    /// Minimum wall surface area, in square meters
    pub min_wall_area_for_complete: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_area_for_complete: 50.0,
            min_horiz_area_for_complete: 25.0,
            min_wall_area_for_complete: 10.0,
        }
    }
}

/// Placement pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementSetupConfig {
    /// Which instrument to place
    pub instrument: InstrumentKind,

    /// How many instruments to place
    pub location_count: usize,

    /// The desired size of instruments in the world
    pub instrument_size: Vec3,

    /// Offset subtracted from solver positions before instantiation
    ///
    /// Zero today; kept so a ground offset can be dialed in without code
    /// changes.
    pub ground_offset: Vec3,

    /// Draw a wireframe box at every accepted placement
    pub draw_debug_boxes: bool,

    /// Run solver queries on a background worker thread
    pub background_placement: bool,
}

impl Default for PlacementSetupConfig {
    fn default() -> Self {
        Self {
            instrument: InstrumentKind::Guitar,
            location_count: 1,
            instrument_size: Vec3::new(1.0, 1.0, 1.0),
            ground_offset: Vec3::zeros(),
            draw_debug_boxes: true,
            background_placement: true,
        }
    }
}

/// Simulated room settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Half-extents of the rectangular room
    pub half_extents: Vec3,

    /// Whether spatial understanding is enabled for the session
    pub allow_spatial_understanding: bool,

    /// Surface area scanned per second, in square meters
    pub scan_rate: f32,

    /// Seed for the scan-progress jitter
    pub seed: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            half_extents: Vec3::new(4.0, 1.5, 3.0),
            allow_spatial_understanding: true,
            scan_rate: 12.0,
            seed: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let config = BandRoomConfig::default();
        assert_eq!(config.scan.min_area_for_complete, 50.0);
        assert_eq!(config.scan.min_horiz_area_for_complete, 25.0);
        assert_eq!(config.scan.min_wall_area_for_complete, 10.0);
        assert_eq!(config.placement.location_count, 1);
        assert_eq!(config.placement.ground_offset, Vec3::zeros());
    }

    #[test]
    fn test_partial_toml_overlays_defaults() {
        let config: BandRoomConfig = toml::from_str(
            r#"
            [placement]
            instrument = "drum"
            location_count = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.placement.instrument, InstrumentKind::Drum);
        assert_eq!(config.placement.location_count, 4);
        assert_eq!(config.scan.min_area_for_complete, 50.0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = std::env::temp_dir().join("band_room_roundtrip.toml");
        let path = path.to_str().unwrap();

        let mut config = BandRoomConfig::default();
        config.placement.location_count = 7;
        config.room.seed = 99;
        config.save_to_file(path).unwrap();

        let loaded = BandRoomConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.placement.location_count, 7);
        assert_eq!(loaded.room.seed, 99);

        std::fs::remove_file(path).unwrap();
    }
}

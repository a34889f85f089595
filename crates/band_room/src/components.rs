//! Demo-specific components
//!
//! Instrument prefabs and the two trivial behaviors attached to placed
//! instruments: click-to-show-info and music playback.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use spatial_engine::audio::{try_play, AudioPlayer};
use spatial_engine::prelude::{Aabb, Vec3};

/// Kinds of props the demo can place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstrumentKind {
    /// Electric guitar on a stand
    Guitar,

    /// Drum kit
    Drum,

    /// Plain cube placeholder
    Cube,
}

impl InstrumentKind {
    /// Lowercase name, used for prop and solver query identifiers
    pub fn name(self) -> &'static str {
        match self {
            InstrumentKind::Guitar => "guitar",
            InstrumentKind::Drum => "drum",
            InstrumentKind::Cube => "cube",
        }
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prefab for one instrument: part bounds in prefab space plus the authored
/// local scale and an optional band sample
#[derive(Debug, Clone)]
pub struct InstrumentPrefab {
    /// Which instrument this prefab builds
    pub kind: InstrumentKind,

    /// Bounding boxes of the prefab's renderable parts
    pub part_bounds: Vec<Aabb>,

    /// Local scale the prefab was authored with
    pub base_scale: Vec3,

    /// Band sample played when the instrument is activated
    pub sample: Option<PathBuf>,
}

impl InstrumentPrefab {
    /// Bounding box enclosing every part of the prefab
    ///
    /// Seeds from the first part with real extents, then grows to enclose
    /// the rest; degenerate parts never shrink the seed to the origin.
    pub fn combined_bounds(&self) -> Aabb {
        let mut result = Aabb::zero();

        for part in &self.part_bounds {
            if result.is_degenerate() {
                result = *part;
            } else {
                result.encapsulate(part);
            }
        }

        result
    }

    /// A ready-made prefab with plausible proportions for the demo
    pub fn demo(kind: InstrumentKind) -> Self {
        let part_bounds = match kind {
            // Body plus neck; the neck makes the combined box tall
            InstrumentKind::Guitar => vec![
                Aabb::from_center_extents(Vec3::new(0.0, 0.3, 0.0), Vec3::new(0.25, 0.3, 0.1)),
                Aabb::from_center_extents(Vec3::new(0.0, 0.95, 0.0), Vec3::new(0.04, 0.45, 0.04)),
            ],
            // Kick drum plus a cymbal off to the side
            InstrumentKind::Drum => vec![
                Aabb::from_center_extents(Vec3::new(0.0, 0.35, 0.0), Vec3::new(0.4, 0.35, 0.4)),
                Aabb::from_center_extents(Vec3::new(0.6, 0.9, 0.0), Vec3::new(0.2, 0.02, 0.2)),
            ],
            InstrumentKind::Cube => vec![Aabb::from_center_extents(
                Vec3::new(0.0, 0.5, 0.0),
                Vec3::new(0.5, 0.5, 0.5),
            )],
        };

        Self {
            kind,
            part_bounds,
            base_scale: Vec3::new(1.0, 1.0, 1.0),
            sample: Some(PathBuf::from(format!("resources/audio/{}.ogg", kind.name()))),
        }
    }
}

/// Billboard with information about the band
#[derive(Debug, Clone)]
pub struct BandInfoBillboard {
    /// Band name shown on the billboard
    pub band_name: String,

    /// Short blurb about the band
    pub blurb: String,

    active: bool,
}

impl BandInfoBillboard {
    /// Create an inactive billboard
    pub fn new(band_name: impl Into<String>, blurb: impl Into<String>) -> Self {
        Self {
            band_name: band_name.into(),
            blurb: blurb.into(),
            active: false,
        }
    }

    /// Make the billboard visible
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Whether the billboard is currently shown
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Shows information about the band when the instrument has been clicked
#[derive(Debug, Clone)]
pub struct InstrumentClickHandler {
    /// Billboard this handler reveals
    pub band_info_billboard: BandInfoBillboard,
}

impl InstrumentClickHandler {
    /// Create a handler for a billboard
    pub fn new(band_info_billboard: BandInfoBillboard) -> Self {
        Self {
            band_info_billboard,
        }
    }

    /// Handle a click on the instrument
    pub fn on_input_clicked(&mut self) {
        self.band_info_billboard.activate();
    }
}

/// Plays the song associated with the band
#[derive(Debug, Clone)]
pub struct MusicPlayer {
    /// Music sample associated with the band
    pub music: PathBuf,
}

impl MusicPlayer {
    /// Create a player for a sample file
    pub fn new(music: PathBuf) -> Self {
        Self { music }
    }

    /// Play the song associated with the band
    pub fn play_song(&self, audio: &mut AudioPlayer) {
        log::info!("Play song");
        try_play(audio, &self.music);
    }
}

//! Band room demo
//!
//! Scans a (simulated) room, waits for enough surface coverage, then asks
//! the placement solver for floor positions and populates the scene with
//! instruments. Once everything is placed, a click on the first instrument
//! shows its band billboard and plays the band's song.

mod components;
mod config;
mod placer;
mod playspace;
mod query;
mod scan_monitor;

use std::sync::Arc;

use spatial_engine::audio::AudioPlayer;
use spatial_engine::config::Config;
use spatial_engine::foundation::logging;
use spatial_engine::placement::PlacementSolver;
use spatial_engine::prelude::{AppError, Application, Engine, EngineConfig};
use spatial_engine::understanding::{SpatialUnderstanding, UnderstandingMesh};

use components::{BandInfoBillboard, InstrumentClickHandler, InstrumentPrefab, MusicPlayer};
use config::BandRoomConfig;
use placer::ObjectPlacer;
use playspace::SimulatedPlayspace;
use scan_monitor::{ScanEvent, ScanMonitor};

/// Frames to keep running after the click, so log output settles
const SETTLE_FRAMES: u32 = 60;

struct BandRoomApp {
    playspace: Arc<SimulatedPlayspace>,
    monitor: ScanMonitor,
    placer: ObjectPlacer,
    click_handler: InstrumentClickHandler,
    music: MusicPlayer,
    audio: AudioPlayer,
    clicked: bool,
    settle: u32,
}

impl Application for BandRoomApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.placer.attach(&mut engine.scene);
        log::info!("Band room ready, waiting for scan");
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        self.playspace.step(delta_time);

        if let Some(event) = self.monitor.poll() {
            match event {
                ScanEvent::FinishRequested => {
                    log::info!("Scan meets minimum bar, finish requested");
                }
                ScanEvent::ScanComplete => {
                    self.placer.create_scene()?;
                }
            }
        }

        self.placer.update(&mut engine.scene, &mut engine.debug);

        // Once placement settles, simulate the user clicking the first
        // instrument: billboard on, song playing.
        if !self.clicked && self.placer.is_idle() && !self.placer.placed().is_empty() {
            self.clicked = true;

            let key = self.placer.placed()[0];
            let name = engine.scene.get(key).map_or("?", |p| p.name.as_str()).to_owned();
            log::info!("Clicked {name}");

            self.click_handler.on_input_clicked();
            if self.click_handler.band_info_billboard.is_active() {
                log::info!(
                    "Billboard: {} - {}",
                    self.click_handler.band_info_billboard.band_name,
                    self.click_handler.band_info_billboard.blurb
                );
            }
            self.music.play_song(&mut self.audio);

            let wireframe_edges: usize = engine
                .debug
                .shapes()
                .iter()
                .map(|shape| shape.edge_segments().len())
                .sum();
            log::info!(
                "Scene has {} props, {} debug wireframe edges",
                engine.scene.len(),
                wireframe_edges
            );
        }

        if self.clicked {
            self.settle += 1;
            if self.settle >= SETTLE_FRAMES {
                engine.quit();
            }
        }

        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "Session over in {:?}: {} instruments placed, mesh drawn: {}",
            self.monitor.phase(),
            self.placer.placed().len(),
            self.playspace.draws_processed_mesh()
        );
        for (_, prop) in engine.scene.iter() {
            log::debug!("  prop {} at {:?}", prop.name, prop.transform.position);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let config = BandRoomConfig::load_or_default("band_room.toml")?;

    let playspace = Arc::new(SimulatedPlayspace::new(&config.room));
    let understanding: Arc<dyn SpatialUnderstanding> = playspace.clone();
    let mesh: Arc<dyn UnderstandingMesh> = playspace.clone();
    let solver: Arc<dyn PlacementSolver> = playspace.clone();

    let monitor = ScanMonitor::new(understanding.clone(), config.scan.clone());

    let prefab = InstrumentPrefab::demo(config.placement.instrument);
    let sample = prefab
        .sample
        .clone()
        .unwrap_or_else(|| format!("resources/audio/{}.ogg", prefab.kind.name()).into());

    let placer = ObjectPlacer::new(
        understanding,
        mesh,
        solver,
        prefab,
        config.placement.clone(),
    );

    let mut app = BandRoomApp {
        playspace,
        monitor,
        placer,
        click_handler: InstrumentClickHandler::new(BandInfoBillboard::new(
            "The Placeholders",
            "Now touring living rooms everywhere",
        )),
        music: MusicPlayer::new(sample),
        audio: AudioPlayer::new()?,
        clicked: false,
        settle: 0,
    };

    let engine_config = EngineConfig {
        target_frame_rate: Some(60.0),
        max_frames: Some(3600),
        debug_drawing: config.placement.draw_debug_boxes,
    };

    Engine::run(engine_config, &mut app)?;
    Ok(())
}

//! Core engine implementation

use std::time::Duration;

use thiserror::Error;

use crate::{
    application::Application,
    debug::DebugDrawSystem,
    foundation::time::Timer,
    scene::PropRegistry,
};

/// Main engine struct
///
/// The engine owns the session state (placed props, debug shapes) and
/// drives the cooperative frame loop. There is no window or renderer; the
/// host runtime owns those, and applications observe the scene directly.
pub struct Engine {
    /// Props placed during this session
    pub scene: PropRegistry,

    /// Debug shape visualization
    pub debug: DebugDrawSystem,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Self {
        log::info!("Initializing engine...");

        let mut debug = DebugDrawSystem::new();
        debug.enabled = config.debug_drawing;

        Self {
            scene: PropRegistry::new(),
            debug,
            timer: Timer::new(),
            config,
            running: true,
        }
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, app: &mut T) -> Result<(), EngineError> {
        let frame_budget = config
            .target_frame_rate
            .map(|fps| Duration::from_secs_f32(1.0 / fps));
        let max_frames = config.max_frames;
        let mut engine = Self::new(config);

        app.initialize(&mut engine)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");

        while engine.running {
            engine.timer.update();
            let delta_time = engine.timer.delta_time();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;

            engine.debug.update(delta_time);

            if let Some(limit) = max_frames {
                if engine.timer.frame_count() >= limit {
                    log::info!("Frame limit {limit} reached, shutting down");
                    engine.running = false;
                }
            }

            if let Some(budget) = frame_budget {
                let elapsed = Duration::from_secs_f32(engine.timer.delta_time());
                if let Some(remaining) = budget.checked_sub(elapsed) {
                    std::thread::sleep(remaining);
                }
            }
        }

        app.cleanup(&mut engine);

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Get the current frame delta time
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }

    /// Get the number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.timer.frame_count()
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Frame-rate cap for the loop; `None` runs uncapped
    pub target_frame_rate: Option<f32>,

    /// Stop after this many frames; `None` runs until the app quits
    pub max_frames: Option<u64>,

    /// Enable debug shape drawing
    pub debug_drawing: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_frame_rate: Some(60.0),
            max_frames: None,
            debug_drawing: cfg!(debug_assertions),
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

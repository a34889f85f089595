//! # Spatial Engine
//!
//! A headless runtime for room-scan placement applications: scan a physical
//! playspace, wait for enough surface coverage, then query a placement
//! solver for valid poses and populate a scene with props.
//!
//! The scanning device and the placement solver are opaque collaborators.
//! They are reached through the [`understanding::SpatialUnderstanding`] and
//! [`placement::PlacementSolver`] traits, injected into applications by the
//! composition root rather than accessed through globals.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use spatial_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Wire up services and components
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         // Poll scanning, drain placement results
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {
//!         // Release resources
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod understanding;
pub mod placement;
pub mod scene;
pub mod debug;
pub mod config;
pub mod audio;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        AppError, Application,
        Engine, EngineConfig, EngineError,
        foundation::{
            math::{look_rotation, Quat, Transform, Vec3, Vec4},
            time::Timer,
        },
        understanding::{PlayspaceStats, ScanState, SpatialUnderstanding, UnderstandingMesh},
        placement::{
            proportional_fit, PlacementConstraint, PlacementDefinition, PlacementError,
            PlacementRule, PlacementSolver, SolvedPlacement,
        },
        scene::{Aabb, PropInstance, PropKey, PropRegistry},
        debug::{DebugDrawSystem, DebugShape},
        config::{Config, ConfigError},
    };
}

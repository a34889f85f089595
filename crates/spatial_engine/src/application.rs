//! Application trait and lifecycle management

use thiserror::Error;

use crate::engine::{Engine, EngineError};

/// Application lifecycle trait
///
/// Implement this trait to create a session on top of the engine's frame
/// loop.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is initialized. Use this to wire up
    /// services and components.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame, before engine systems update.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError>;

    /// Cleanup the application
    ///
    /// Called when the session is shutting down.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Placement subsystem error
    #[error("Placement error: {0}")]
    Placement(#[from] crate::placement::PlacementError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Audio error
    #[error("Audio error: {0}")]
    Audio(#[from] crate::audio::AudioError),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

//! Application trait and lifecycle management

use crate::engine::{Engine, EngineError};
use crate::input::InputEvent;
use crate::world::WorldError;
use std::time::Duration;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to drive a world through [`Engine::run`].
pub trait Application {
    /// Initialize the application
    ///
    /// Called once after the engine is created. Spawn the initial objects and
    /// register listeners here.
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called once per frame, before the engine runs the ticks that fell due
    /// during the frame.
    ///
    /// # Arguments
    /// * `engine` - Mutable reference to the engine
    /// * `delta_time` - Real time since the previous frame
    fn update(&mut self, engine: &mut Engine, delta_time: Duration) -> Result<(), AppError>;

    /// Handle an input event queued with [`Engine::queue_input`]
    fn handle_input(&mut self, engine: &mut Engine, event: InputEvent) -> Result<(), AppError> {
        // Default implementation forwards to the world
        engine.handle_input(event);
        Ok(())
    }

    /// Cleanup the application
    ///
    /// Called once when the main loop ends.
    fn cleanup(&mut self, engine: &mut Engine);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// World operation failed
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}

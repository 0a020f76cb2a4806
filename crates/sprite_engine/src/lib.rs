//! # Sprite Engine
//!
//! A small real-time 2D game-object engine.
//!
//! ## Features
//!
//! - **Game Objects**: integer position and size with derived edges
//! - **Characters**: a direction state machine that drives both movement and
//!   the displayed animation
//! - **Collisions**: snapshot-based axis-aligned box overlap, notified to both
//!   members of every pair
//! - **Events**: named publish/subscribe per object and for the whole world
//! - **Fixed Timestep**: independent movement and collision tick rates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprite_engine::prelude::*;
//! use std::time::Duration;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         let world = engine.world_mut();
//!         world.spawn_moveable(0, 0, "green");
//!         world.spawn_character(300, 0, "red");
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, _delta_time: Duration) -> Result<(), AppError> {
//!         if engine.world().movement_ticks() > 1000 {
//!             engine.quit();
//!         }
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default();
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app, Box::new(LogSurface))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod render;
pub mod world;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use config::EngineConfig;
pub use engine::{Engine, EngineError, UpdateStats};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        events::{EventEmitter, LifecycleHook, ListenerError},
        foundation::time::{FixedTimestep, Timer},
        input::{InputEvent, KeyBindings, KeyCode},
        physics::{Aabb, CollisionPair},
        render::{AssetSet, Element, LogSurface, NullSurface, Surface, VisualState},
        world::{
            Body, Character, CollisionPolicy, Direction, GameObject, MoveableCharacter, ObjectEvent,
            ObjectId, World, WorldError, WorldEvent, COLLISION, REMOVED, SPAWNED,
        },
        AppError, Application, Engine, EngineConfig, EngineError, UpdateStats,
    };
}

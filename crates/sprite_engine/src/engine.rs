//! Core engine implementation
//!
//! The engine owns the world and a simulation clock. Real time fed to
//! [`Engine::update`] advances the clock; every movement or collision tick
//! whose deadline has passed is then run, earliest deadline first. When a
//! movement tick and a collision tick fall due at the same instant the
//! movement tick runs first, so collision detection sees the new positions.

use crate::{
    application::Application,
    config::{ConfigError, EngineConfig},
    foundation::time::{FixedTimestep, Timer},
    input::InputEvent,
    render::Surface,
    world::{World, WorldError, WorldSettings},
};
use std::collections::VecDeque;
use std::time::Duration;
use thiserror::Error;

/// What one call to [`Engine::update`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Movement ticks executed
    pub movement_ticks: u64,
    /// Collision ticks executed
    pub collision_ticks: u64,
    /// Overlapping pairs reported across all collision ticks
    pub collisions: u64,
    /// Due ticks discarded because the per-update budget ran out
    pub dropped_ticks: u64,
}

impl UpdateStats {
    /// Ticks executed of either kind
    pub fn ticks(&self) -> u64 {
        self.movement_ticks + self.collision_ticks
    }
}

/// Main engine struct
///
/// The engine coordinates the world with the tick schedule and manages the
/// main loop.
pub struct Engine {
    /// Simulated world
    world: World,

    /// Movement tick schedule
    movement: FixedTimestep,

    /// Collision tick schedule
    collision: FixedTimestep,

    /// Simulation time fed in so far
    clock: Duration,

    /// Frame timing
    timer: Timer,

    /// Input waiting for the application
    pending_input: VecDeque<InputEvent>,

    config: EngineConfig,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance drawing onto `surface`
    pub fn new(config: EngineConfig, surface: Box<dyn Surface>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;
        let settings = WorldSettings::from_config(&config)?;

        log::debug!(
            "Movement every {}ms, collisions every {}ms",
            config.movement_period_ms,
            config.collision_period_ms
        );

        Ok(Self {
            world: World::with_settings(surface, settings),
            movement: FixedTimestep::from_millis(config.movement_period_ms),
            collision: FixedTimestep::from_millis(config.collision_period_ms),
            clock: Duration::ZERO,
            timer: Timer::new(),
            pending_input: VecDeque::new(),
            config,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    ///
    /// Each frame the application updates, queued input is handed to it, the
    /// ticks that fell due are run, and the thread sleeps until the next
    /// deadline. The loop ends when [`Engine::quit`] is called.
    pub fn run<T: Application>(
        config: EngineConfig,
        app: &mut T,
        surface: Box<dyn Surface>,
    ) -> Result<(), EngineError> {
        let mut engine = Self::new(config, surface)?;

        app.initialize(&mut engine)
            .map_err(|e| EngineError::Application(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");
        engine.timer = Timer::new();

        while engine.running {
            let delta_time = engine.timer.update();

            app.update(&mut engine, delta_time)
                .map_err(|e| EngineError::Application(format!("App update: {}", e)))?;

            while let Some(event) = engine.pending_input.pop_front() {
                app.handle_input(&mut engine, event)
                    .map_err(|e| EngineError::Application(format!("App input: {}", e)))?;
            }

            engine.update(delta_time);

            if engine.running {
                std::thread::sleep(engine.time_until_next_tick());
            }
        }

        app.cleanup(&mut engine);

        log::info!(
            "Engine shutdown complete after {} frames ({} movement ticks, {} collision ticks)",
            engine.timer.frame_count(),
            engine.world.movement_ticks(),
            engine.world.collision_ticks()
        );
        Ok(())
    }

    /// Advance the simulation clock by `elapsed` and run every tick now due
    pub fn update(&mut self, elapsed: Duration) -> UpdateStats {
        self.clock += elapsed;
        let now = self.clock;
        let budget = u64::from(self.config.max_ticks_per_update);
        let mut stats = UpdateStats::default();

        loop {
            let movement_due = self.movement.is_due(now);
            let collision_due = self.collision.is_due(now);
            if !movement_due && !collision_due {
                break;
            }

            if stats.ticks() >= budget {
                stats.dropped_ticks = self.movement.skip_to(now) + self.collision.skip_to(now);
                log::warn!(
                    "Simulation fell behind: dropped {} ticks at {:?}",
                    stats.dropped_ticks,
                    now
                );
                break;
            }

            let movement_first = movement_due
                && (!collision_due || self.movement.next_deadline() <= self.collision.next_deadline());
            if movement_first {
                self.world.advance(1);
                self.movement.consume();
                stats.movement_ticks += 1;
            } else {
                let pairs = self.world.detect_collisions();
                stats.collisions += pairs.len() as u64;
                self.collision.consume();
                stats.collision_ticks += 1;
            }
        }

        log::trace!("Update to {:?}: {:?}", now, stats);
        stats
    }

    /// Time left until the earliest pending tick
    pub fn time_until_next_tick(&self) -> Duration {
        self.movement
            .next_deadline()
            .min(self.collision.next_deadline())
            .saturating_sub(self.clock)
    }

    /// Deliver an input event to the world right away
    pub fn handle_input(&mut self, event: InputEvent) {
        self.world.dispatch_input(event);
    }

    /// Queue an input event for the application's [`Application::handle_input`]
    pub fn queue_input(&mut self, event: InputEvent) {
        self.pending_input.push_back(event);
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop should keep going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Get the world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get mutable access to the world
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Simulation time fed in so far
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Real time of the latest frame
    pub fn delta_time(&self) -> Duration {
        self.timer.delta_time()
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// World setup or operation failed
    #[error("World error: {0}")]
    World(#[from] WorldError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Application error
    #[error("Application error: {0}")]
    Application(String),
}

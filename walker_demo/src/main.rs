//! Walker demo
//!
//! Runs headless: a key-driven walker follows a scripted input track through
//! a field of wandering characters. Visual updates and collisions are logged
//! instead of drawn. Pass a `.toml` or `.ron` config path as the first
//! argument, or leave `walker.toml` next to the working directory.

use rand::seq::SliceRandom;
use rand::Rng;
use sprite_engine::foundation::logging;
use sprite_engine::prelude::*;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

const DEFAULT_CONFIG_PATH: &str = "walker.toml";
const NPC_COUNT: usize = 6;
const NPC_SKINS: [&str; 3] = ["red", "blue", "yellow"];
const FIELD_SIZE: i32 = 800;
const WANDER_INTERVAL: Duration = Duration::from_millis(250);
const RUN_TIME: Duration = Duration::from_secs(3);

/// Input track for the player: (simulation time, event)
const SCRIPT: [(u64, InputEvent); 8] = [
    (0, InputEvent::KeyDown(KeyCode::Right)),
    (600, InputEvent::KeyUp(KeyCode::Right)),
    (650, InputEvent::KeyDown(KeyCode::Up)),
    (1200, InputEvent::KeyUp(KeyCode::Up)),
    (1250, InputEvent::KeyDown(KeyCode::Left)),
    (1800, InputEvent::KeyUp(KeyCode::Left)),
    (1850, InputEvent::KeyDown(KeyCode::Down)),
    (2400, InputEvent::KeyUp(KeyCode::Down)),
];

struct WalkerApp {
    player: Option<ObjectId>,
    npcs: Vec<ObjectId>,
    script_pos: usize,
    next_wander: Duration,
    culled: bool,
    collisions: Rc<Cell<u64>>,
}

impl WalkerApp {
    fn new() -> Self {
        Self {
            player: None,
            npcs: Vec::new(),
            script_pos: 0,
            next_wander: Duration::ZERO,
            culled: false,
            collisions: Rc::new(Cell::new(0)),
        }
    }

    fn play_script(&mut self, engine: &mut Engine) {
        let now = engine.clock();
        while let Some(&(at_ms, event)) = SCRIPT.get(self.script_pos) {
            if Duration::from_millis(at_ms) > now {
                break;
            }
            engine.queue_input(event);
            self.script_pos += 1;
        }
    }

    fn wander(&mut self, engine: &mut Engine) {
        if engine.clock() < self.next_wander {
            return;
        }
        self.next_wander = engine.clock() + WANDER_INTERVAL;

        let mut rng = rand::thread_rng();
        for &id in &self.npcs {
            let Some(npc) = engine.world_mut().character_mut(id) else {
                continue;
            };
            if rng.gen_bool(0.3) {
                npc.stop();
            } else if let Some(&direction) = Direction::ALL.choose(&mut rng) {
                npc.walk(direction);
            }
        }
    }

    /// Drop the first wanderer halfway through to exercise removal
    fn cull(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        if self.culled || engine.clock() < RUN_TIME / 2 || self.npcs.is_empty() {
            return Ok(());
        }
        let id = self.npcs.remove(0);
        engine.world_mut().remove(id)?;
        self.culled = true;
        Ok(())
    }
}

impl Application for WalkerApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let world = engine.world_mut();

        let collisions = Rc::clone(&self.collisions);
        world.on_world(COLLISION, move |event| {
            if let WorldEvent::Collision(pair) = event {
                collisions.set(collisions.get() + 1);
                log::info!("Collision between {:?} and {:?}", pair.first, pair.second);
            }
        });
        world.on_world(REMOVED, |event| log::info!("Left the world: {:?}", event));

        let player = world.spawn_moveable(0, 0, "green");
        world.on(player, COLLISION, |event| {
            if let ObjectEvent::Collision(contact) = event {
                log::info!("Player bumped into {:?}", contact.other);
            }
        })?;
        self.player = Some(player);

        let mut rng = rand::thread_rng();
        for i in 0..NPC_COUNT {
            let x = rng.gen_range(-FIELD_SIZE..FIELD_SIZE);
            let y = rng.gen_range(-FIELD_SIZE..FIELD_SIZE);
            let skin = NPC_SKINS[i % NPC_SKINS.len()];
            self.npcs.push(world.spawn_character(x, y, skin));
        }

        log::info!("Spawned player and {} wanderers", self.npcs.len());
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: Duration) -> Result<(), AppError> {
        self.play_script(engine);
        self.wander(engine);
        self.cull(engine)?;

        if engine.clock() >= RUN_TIME {
            engine.quit();
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        if let Some(player) = self.player.and_then(|id| engine.world().object(id)) {
            log::info!("Player finished at {:?}", player.position());
        }
        log::info!(
            "{} collisions over {} collision ticks",
            self.collisions.get(),
            engine.world().collision_ticks()
        );
        engine.world_mut().clear();
    }
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load_from_file(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            EngineConfig::load_from_file(DEFAULT_CONFIG_PATH)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    logging::init(&config.log_level);

    log::info!("Starting walker demo");
    let mut app = WalkerApp::new();

    match Engine::run(config, &mut app, Box::new(LogSurface)) {
        Ok(()) => {
            log::info!("Walker demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Walker demo failed: {}", e);
            Err(e.into())
        }
    }
}

//! Game world
//!
//! The world owns every live body, the collision system and the event
//! tables. It is driven by two independent operations:
//! - [`World::advance`] runs movement ticks (each character moves one unit)
//! - [`World::detect_collisions`] runs one collision tick over a snapshot
//!
//! Nothing here owns a timer; [`crate::Engine`] decides when each runs.
//! The world is single-threaded: bodies are not `Send`, so direction and
//! position changes can never interleave with a running tick.

pub mod body;
pub mod character;
pub mod moveable;
pub mod object;
pub mod registry;

#[cfg(test)]
mod tests;

pub use body::{Body, CollisionHandler, Contact, InputHandler};
pub use character::{Character, Direction};
pub use moveable::{CollisionPolicy, MoveableCharacter};
pub use object::{GameObject, Size};
pub use registry::Registry;

use crate::config::EngineConfig;
use crate::events::{EventEmitter, LifecycleHook, ListenerError};
use crate::input::{InputEvent, KeyBindings};
use crate::physics::{Collider, CollisionPair, CollisionSystem};
use crate::render::{AssetSet, Surface};
use slotmap::SecondaryMap;
use std::collections::HashMap;
use thiserror::Error;

slotmap::new_key_type! {
    /// Stable identity of a game object
    pub struct ObjectId;
}

/// Event name for collision notifications
pub const COLLISION: &str = "collision";
/// Event name for objects entering the world
pub const SPAWNED: &str = "spawned";
/// Event name for objects leaving the world
pub const REMOVED: &str = "removed";

/// World errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldError {
    /// Width or height is not strictly positive
    #[error("Invalid geometry: {width}x{height} (both sides must be positive)")]
    InvalidGeometry {
        /// Rejected width
        width: i32,
        /// Rejected height
        height: i32,
    },

    /// No live object has this id
    #[error("Unknown object: {0:?}")]
    UnknownObject(ObjectId),
}

/// Payload of per-object events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectEvent {
    /// The object collided with `contact.other`
    Collision(Contact),
    /// The object is being removed from the world
    Removed(ObjectId),
}

/// Payload of world-wide events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEvent {
    /// A body entered the world
    Spawned(ObjectId),
    /// A body left the world
    Removed(ObjectId),
    /// Two bodies overlapped during a collision tick
    Collision(CollisionPair),
}

/// Settings the world applies to the objects it spawns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSettings {
    /// Size given to objects spawned without an explicit size
    pub default_size: Size,
    /// Base path for character asset sets
    pub asset_base: String,
    /// Collision policy for moveable characters
    pub collision_policy: CollisionPolicy,
    /// Keys driving moveable characters
    pub bindings: KeyBindings,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            default_size: Size::default(),
            asset_base: "assets".to_string(),
            collision_policy: CollisionPolicy::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl WorldSettings {
    /// Derive world settings from an engine configuration
    pub fn from_config(config: &EngineConfig) -> Result<Self, WorldError> {
        Ok(Self {
            default_size: Size::new(config.default_width, config.default_height)?,
            asset_base: config.asset_base.clone(),
            collision_policy: config.collision_policy(),
            bindings: config.bindings.clone(),
        })
    }
}

/// Routes a body's capabilities into the emitter's lifecycle hook slot
struct BodyHook<'a>(&'a mut Box<dyn Body>);

impl LifecycleHook<ObjectEvent> for BodyHook<'_> {
    fn on_lifecycle(&mut self, event: &str, payload: &ObjectEvent) -> Result<(), ListenerError> {
        match payload {
            ObjectEvent::Collision(contact) if event == COLLISION => self
                .0
                .collision_handler()
                .map_or(Ok(()), |handler| handler.on_collision(contact)),
            _ => Ok(()),
        }
    }
}

/// All live game objects plus the machinery that simulates them
pub struct World {
    registry: Registry,
    collisions: CollisionSystem,
    surface: Box<dyn Surface>,
    object_events: SecondaryMap<ObjectId, EventEmitter<ObjectEvent>>,
    world_events: EventEmitter<WorldEvent>,
    settings: WorldSettings,
    movement_ticks: u64,
    collision_ticks: u64,
}

impl World {
    /// Create an empty world with default settings
    pub fn new(surface: Box<dyn Surface>) -> Self {
        Self::with_settings(surface, WorldSettings::default())
    }

    /// Create an empty world
    pub fn with_settings(surface: Box<dyn Surface>, settings: WorldSettings) -> Self {
        Self {
            registry: Registry::new(),
            collisions: CollisionSystem::new(),
            surface,
            object_events: SecondaryMap::new(),
            world_events: EventEmitter::new(),
            settings,
            movement_ticks: 0,
            collision_ticks: 0,
        }
    }

    /// Settings applied to spawned objects
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Spawn a body built around a fresh object at `(x, y)` with `size`
    ///
    /// The object's element is created and given its geometry before `build`
    /// runs, and the body is registered before this returns.
    pub fn spawn_with<F>(&mut self, x: i32, y: i32, size: Size, build: F) -> ObjectId
    where
        F: FnOnce(GameObject) -> Box<dyn Body>,
    {
        let surface = &mut self.surface;
        let id = self.registry.insert_with_key(|id| {
            let element = surface.create_element(id);
            build(GameObject::new(id, x, y, size, element))
        });
        self.object_events.insert(id, EventEmitter::new());
        log::info!("Spawned {:?} at ({}, {})", id, x, y);
        self.world_events.emit(SPAWNED, &WorldEvent::Spawned(id));
        id
    }

    /// Spawn a plain object with the default size
    pub fn spawn_object(&mut self, x: i32, y: i32) -> ObjectId {
        let size = self.settings.default_size;
        self.spawn_with(x, y, size, |object| Box::new(object))
    }

    /// Spawn a plain object with an explicit size
    pub fn spawn_sized(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<ObjectId, WorldError> {
        let size = Size::new(width, height)?;
        Ok(self.spawn_with(x, y, size, |object| Box::new(object)))
    }

    /// Spawn a stationary character wearing `skin`
    pub fn spawn_character(&mut self, x: i32, y: i32, skin: &str) -> ObjectId {
        let size = self.settings.default_size;
        let assets = AssetSet::new(self.settings.asset_base.clone(), skin);
        self.spawn_with(x, y, size, |object| Box::new(Character::new(object, assets)))
    }

    /// Spawn a key-driven character with the configured collision policy
    pub fn spawn_moveable(&mut self, x: i32, y: i32, skin: &str) -> ObjectId {
        let policy = self.settings.collision_policy;
        self.spawn_moveable_with_policy(x, y, skin, policy)
    }

    /// Spawn a key-driven character with an explicit collision policy
    pub fn spawn_moveable_with_policy(
        &mut self,
        x: i32,
        y: i32,
        skin: &str,
        policy: CollisionPolicy,
    ) -> ObjectId {
        let size = self.settings.default_size;
        let assets = AssetSet::new(self.settings.asset_base.clone(), skin);
        let bindings = self.settings.bindings.clone();
        self.spawn_with(x, y, size, |object| {
            let character = Character::new(object, assets);
            Box::new(MoveableCharacter::new(character, bindings, policy))
        })
    }

    /// Remove a body from the world
    ///
    /// Its element is detached, its listeners hear [`REMOVED`] one last time
    /// and are dropped, and it takes no part in any later tick.
    pub fn remove(&mut self, id: ObjectId) -> Result<Box<dyn Body>, WorldError> {
        let mut body = self.registry.remove(id).ok_or(WorldError::UnknownObject(id))?;
        body.object_mut().detach();
        self.collisions.forget(id);
        if let Some(mut events) = self.object_events.remove(id) {
            events.emit(REMOVED, &ObjectEvent::Removed(id));
        }
        log::info!("Removed {:?}", id);
        self.world_events.emit(REMOVED, &WorldEvent::Removed(id));
        Ok(body)
    }

    /// Whether `id` is live
    pub fn contains(&self, id: ObjectId) -> bool {
        self.registry.contains(id)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether the world is empty
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Live ids in insertion order
    pub fn ids(&self) -> &[ObjectId] {
        self.registry.ids()
    }

    /// The registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up a body
    pub fn get(&self, id: ObjectId) -> Option<&dyn Body> {
        self.registry.get(id)
    }

    /// Look up a body mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Body> {
        self.registry.get_mut(id)
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&GameObject> {
        self.get(id).map(Body::object)
    }

    /// Look up an object mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.get_mut(id).map(Body::object_mut)
    }

    /// Look up a character
    pub fn character(&self, id: ObjectId) -> Option<&Character> {
        self.get(id).and_then(Body::character)
    }

    /// Look up a character mutably
    pub fn character_mut(&mut self, id: ObjectId) -> Option<&mut Character> {
        self.get_mut(id).and_then(Body::character_mut)
    }

    /// Listen to events of one object
    pub fn on<F>(&mut self, id: ObjectId, event: &str, callback: F) -> Result<(), WorldError>
    where
        F: FnMut(&ObjectEvent) + 'static,
    {
        self.object_emitter(id)?.on(event, callback);
        Ok(())
    }

    /// Listen to events of one object with a listener that may fail
    pub fn try_on<F>(&mut self, id: ObjectId, event: &str, callback: F) -> Result<(), WorldError>
    where
        F: FnMut(&ObjectEvent) -> Result<(), ListenerError> + 'static,
    {
        self.object_emitter(id)?.try_on(event, callback);
        Ok(())
    }

    /// Listen to world-wide events
    pub fn on_world<F>(&mut self, event: &str, callback: F)
    where
        F: FnMut(&WorldEvent) + 'static,
    {
        self.world_events.on(event, callback);
    }

    fn object_emitter(&mut self, id: ObjectId) -> Result<&mut EventEmitter<ObjectEvent>, WorldError> {
        self.object_events
            .get_mut(id)
            .ok_or(WorldError::UnknownObject(id))
    }

    /// Run `ticks` movement ticks; every character moves one unit per tick
    pub fn advance(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.registry.for_each_mut(|_, body| body.tick());
            self.movement_ticks += 1;
        }
    }

    /// Run one collision tick
    ///
    /// All pairs are tested against bounds captured at the start of the
    /// tick. Only then is each member of each overlapping pair told about the
    /// other: its collision handler first, then its own listeners, then the
    /// world-wide listeners. Returns the overlapping pairs in insertion order.
    pub fn detect_collisions(&mut self) -> Vec<CollisionPair> {
        let snapshot = self.registry.snapshot();
        let pairs = self.collisions.detect(&snapshot).to_vec();
        self.collision_ticks += 1;

        if pairs.is_empty() {
            return pairs;
        }

        let colliders: HashMap<ObjectId, Collider> =
            snapshot.iter().map(|collider| (collider.id, *collider)).collect();
        for pair in &pairs {
            log::debug!("{:?} collided with {:?}", pair.first, pair.second);
            let (Some(first), Some(second)) =
                (colliders.get(&pair.first), colliders.get(&pair.second))
            else {
                continue;
            };
            self.notify(first.id, second);
            self.notify(second.id, first);
            self.world_events.emit(COLLISION, &WorldEvent::Collision(*pair));
        }
        pairs
    }

    fn notify(&mut self, subject: ObjectId, other: &Collider) {
        let Some(body) = self.registry.get_boxed_mut(subject) else {
            return;
        };
        let event = ObjectEvent::Collision(Contact {
            other: other.id,
            other_bounds: other.bounds,
            other_is_character: other.is_character,
        });
        let mut hook = BodyHook(body);
        match self.object_events.get_mut(subject) {
            Some(events) => events.emit_with(&mut hook, COLLISION, &event),
            None => {
                if let Err(err) = hook.on_lifecycle(COLLISION, &event) {
                    log::warn!("Collision handler for {:?} failed: {}", subject, err);
                }
            }
        }
    }

    /// One movement tick followed by one collision tick
    pub fn step(&mut self) -> Vec<CollisionPair> {
        self.advance(1);
        self.detect_collisions()
    }

    /// Deliver an input event to every body that handles input
    pub fn dispatch_input(&mut self, event: InputEvent) {
        log::trace!("Input {:?}", event);
        self.registry.for_each_mut(|_, body| {
            if let Some(handler) = body.input_handler() {
                handler.on_input(event);
            }
        });
    }

    /// Pairs that started overlapping on the latest collision tick
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        self.collisions.collisions_entered()
    }

    /// Pairs that stopped overlapping on the latest collision tick
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        self.collisions.collisions_exited()
    }

    /// Movement ticks run so far
    pub fn movement_ticks(&self) -> u64 {
        self.movement_ticks
    }

    /// Collision ticks run so far
    pub fn collision_ticks(&self) -> u64 {
        self.collision_ticks
    }

    /// Remove every body
    pub fn clear(&mut self) {
        let ids = self.registry.ids().to_vec();
        for id in ids {
            // Every id came from the registry a moment ago
            let _ = self.remove(id);
        }
        self.collisions.clear();
    }
}

//! Capabilities shared by everything the world can hold
//!
//! A body always has a [`GameObject`]. Being a character, reacting to
//! collisions and reacting to input are optional capabilities a body exposes
//! by overriding the matching accessor.

use super::{Character, GameObject, ObjectId};
use crate::events::ListenerError;
use crate::input::InputEvent;
use crate::physics::Aabb;

/// What a body is told when it collides: the other member of the pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    /// The other object
    pub other: ObjectId,
    /// The other object's bounds when the collision tick started
    pub other_bounds: Aabb,
    /// Whether the other object is a character
    pub other_is_character: bool,
}

/// Collision response capability
pub trait CollisionHandler {
    /// Called once per overlapping pair per collision tick
    fn on_collision(&mut self, contact: &Contact) -> Result<(), ListenerError>;
}

/// Input capability
pub trait InputHandler {
    /// Called for every input event dispatched to the world
    fn on_input(&mut self, event: InputEvent);
}

/// Anything that can live in the world's registry
pub trait Body {
    /// Underlying object
    fn object(&self) -> &GameObject;

    /// Mutable underlying object
    fn object_mut(&mut self) -> &mut GameObject;

    /// Character view, if this body is one
    fn character(&self) -> Option<&Character> {
        None
    }

    /// Mutable character view, if this body is one
    fn character_mut(&mut self) -> Option<&mut Character> {
        None
    }

    /// Collision response, if this body has one
    fn collision_handler(&mut self) -> Option<&mut dyn CollisionHandler> {
        None
    }

    /// Input response, if this body has one
    fn input_handler(&mut self) -> Option<&mut dyn InputHandler> {
        None
    }

    /// One movement tick
    fn tick(&mut self) {
        if let Some(character) = self.character_mut() {
            character.step();
        }
    }
}

impl Body for GameObject {
    fn object(&self) -> &GameObject {
        self
    }

    fn object_mut(&mut self) -> &mut GameObject {
        self
    }
}

impl Body for Character {
    fn object(&self) -> &GameObject {
        Self::object(self)
    }

    fn object_mut(&mut self) -> &mut GameObject {
        Self::object_mut(self)
    }

    fn character(&self) -> Option<&Character> {
        Some(self)
    }

    fn character_mut(&mut self) -> Option<&mut Character> {
        Some(self)
    }
}

//! Player-controlled character
//!
//! Input rules:
//! - key-down is honored only while stationary; one direction at a time
//! - any key-up stops the character, whichever key was released
//!
//! Collision rule (when the policy is [`CollisionPolicy::BounceBack`]):
//! after touching another character, jump back `distance` units against the
//! current direction and stop. Collisions with non-characters are ignored.

use super::{Body, Character, CollisionHandler, Contact, GameObject, InputHandler};
use crate::events::ListenerError;
use crate::input::{InputEvent, KeyBindings, KeyCode};
use serde::{Deserialize, Serialize};

/// How a moveable character reacts to touching another character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Move back this many units against the current direction, then stop
    BounceBack(u32),
    /// No collision response at all
    Ignore,
}

impl CollisionPolicy {
    /// Default bounce-back distance
    pub const DEFAULT_BOUNCE_BACK: u32 = 5;
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        Self::BounceBack(Self::DEFAULT_BOUNCE_BACK)
    }
}

/// A character driven by key events
#[derive(Debug)]
pub struct MoveableCharacter {
    character: Character,
    bindings: KeyBindings,
    policy: CollisionPolicy,
}

impl MoveableCharacter {
    /// Bind a character to the given keys and collision policy
    pub fn new(character: Character, bindings: KeyBindings, policy: CollisionPolicy) -> Self {
        Self {
            character,
            bindings,
            policy,
        }
    }

    /// Underlying character
    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Mutable underlying character
    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    /// Key table
    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Current collision policy
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Replace the collision policy
    pub fn set_policy(&mut self, policy: CollisionPolicy) {
        self.policy = policy;
    }

    /// Handle a key press
    pub fn key_down(&mut self, key: KeyCode) {
        if self.character.is_moving() {
            log::trace!("Ignoring {:?} while moving", key);
            return;
        }
        match self.bindings.direction_for(key) {
            Ok(direction) => self.character.walk(direction),
            Err(err) => log::trace!("Ignoring key: {}", err),
        }
    }

    /// Handle a key release
    pub fn key_up(&mut self, _key: KeyCode) {
        self.character.stop();
    }

    /// Move `distance` units against the current direction, then stop
    pub fn bounce_back(&mut self, distance: u32) {
        if let Some(direction) = self.character.direction() {
            let distance = i32::try_from(distance).unwrap_or(i32::MAX);
            let (dx, dy) = direction.opposite().delta();
            self.character
                .object_mut()
                .translate(dx * distance, dy * distance);
        }
        self.character.stop();
    }
}

impl CollisionHandler for MoveableCharacter {
    fn on_collision(&mut self, contact: &Contact) -> Result<(), ListenerError> {
        if !contact.other_is_character {
            return Ok(());
        }
        if let CollisionPolicy::BounceBack(distance) = self.policy {
            log::debug!(
                "{:?} bounced off {:?}",
                self.character.object().id(),
                contact.other
            );
            self.bounce_back(distance);
        }
        Ok(())
    }
}

impl InputHandler for MoveableCharacter {
    fn on_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => self.key_up(key),
        }
    }
}

impl Body for MoveableCharacter {
    fn object(&self) -> &GameObject {
        self.character.object()
    }

    fn object_mut(&mut self) -> &mut GameObject {
        self.character.object_mut()
    }

    fn character(&self) -> Option<&Character> {
        Some(&self.character)
    }

    fn character_mut(&mut self) -> Option<&mut Character> {
        Some(&mut self.character)
    }

    fn collision_handler(&mut self) -> Option<&mut dyn CollisionHandler> {
        match self.policy {
            CollisionPolicy::BounceBack(_) => Some(self),
            CollisionPolicy::Ignore => None,
        }
    }

    fn input_handler(&mut self) -> Option<&mut dyn InputHandler> {
        Some(self)
    }
}

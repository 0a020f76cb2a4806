//! Input events and key bindings
//!
//! Input is produced outside the engine and fed in as discrete key-down /
//! key-up events. Bindings translate keys into logical directions.

use crate::world::Direction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// D key
    D,
    /// E key
    E,
    /// Q key
    Q,
    /// S key
    S,
    /// W key
    W,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key was pressed
    KeyDown(KeyCode),
    /// Key was released
    KeyUp(KeyCode),
}

impl InputEvent {
    /// The key this event refers to
    pub fn key(self) -> KeyCode {
        match self {
            Self::KeyDown(key) | Self::KeyUp(key) => key,
        }
    }
}

/// Input errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// The key has no direction binding
    #[error("No direction bound to key {0:?}")]
    UnknownDirection(KeyCode),
}

/// A single key → direction mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Physical key
    pub key: KeyCode,
    /// Direction the key selects
    pub direction: Direction,
}

/// Key → direction table
///
/// Stored as a list so it serializes cleanly to both TOML and RON. Later
/// bindings for the same key replace earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    bindings: Vec<Binding>,
}

impl KeyBindings {
    /// Empty table
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Arrow keys
    pub fn arrows() -> Self {
        Self::empty()
            .with(KeyCode::Right, Direction::Right)
            .with(KeyCode::Left, Direction::Left)
            .with(KeyCode::Up, Direction::Up)
            .with(KeyCode::Down, Direction::Down)
    }

    /// W/A/S/D keys
    pub fn wasd() -> Self {
        Self::empty()
            .with(KeyCode::D, Direction::Right)
            .with(KeyCode::A, Direction::Left)
            .with(KeyCode::W, Direction::Up)
            .with(KeyCode::S, Direction::Down)
    }

    /// Add a binding (builder pattern)
    pub fn with(mut self, key: KeyCode, direction: Direction) -> Self {
        self.bind(key, direction);
        self
    }

    /// Bind `key` to `direction`, replacing any existing binding for the key
    pub fn bind(&mut self, key: KeyCode, direction: Direction) {
        self.unbind(key);
        self.bindings.push(Binding { key, direction });
    }

    /// Remove the binding for `key`, if any
    pub fn unbind(&mut self, key: KeyCode) -> Option<Direction> {
        let index = self.bindings.iter().position(|b| b.key == key)?;
        Some(self.bindings.remove(index).direction)
    }

    /// Look up the direction for `key`
    pub fn direction_for(&self, key: KeyCode) -> Result<Direction, InputError> {
        self.bindings
            .iter()
            .find(|b| b.key == key)
            .map(|b| b.direction)
            .ok_or(InputError::UnknownDirection(key))
    }

    /// Number of bindings
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::arrows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_are_default() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.direction_for(KeyCode::Right), Ok(Direction::Right));
        assert_eq!(bindings.direction_for(KeyCode::Down), Ok(Direction::Down));
        assert_eq!(bindings.len(), 4);
    }

    #[test]
    fn test_unbound_key_is_unknown_direction() {
        let bindings = KeyBindings::arrows();
        assert_eq!(
            bindings.direction_for(KeyCode::Space),
            Err(InputError::UnknownDirection(KeyCode::Space))
        );
    }

    #[test]
    fn test_rebinding_replaces() {
        let mut bindings = KeyBindings::wasd();
        bindings.bind(KeyCode::W, Direction::Down);
        assert_eq!(bindings.direction_for(KeyCode::W), Ok(Direction::Down));
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings.unbind(KeyCode::W), Some(Direction::Down));
        assert!(bindings.direction_for(KeyCode::W).is_err());
    }

    #[test]
    fn test_event_key() {
        assert_eq!(InputEvent::KeyUp(KeyCode::Q).key(), KeyCode::Q);
        assert_eq!(InputEvent::KeyDown(KeyCode::Left).key(), KeyCode::Left);
    }
}

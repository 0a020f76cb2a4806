//! Directional movement state machine
//!
//! A character is either stationary or walking in exactly one direction.
//! The direction is the single source of truth for both movement and the
//! displayed representation:
//!
//! ```text
//!            walk_*()                      walk_*()
//! stationary ────────▶ moving(direction) ◀─────────┐
//!     ▲                     │    └─────────────────┘
//!     └──────── stop() ─────┘
//! ```
//!
//! Every transition re-selects the representation, even when the direction
//! does not change. The movement tick only reads the direction.

use super::GameObject;
use crate::render::{AssetSet, VisualState};
use serde::{Deserialize, Serialize};

/// Walking direction (y grows upwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +x
    Right,
    /// -x
    Left,
    /// +y
    Up,
    /// -y
    Down,
}

impl Direction {
    /// All directions
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Up, Self::Down];

    /// Unit displacement `(dx, dy)` for this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Up => (0, 1),
            Self::Down => (0, -1),
        }
    }

    /// The opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Self::Right => Self::Left,
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// A game object that walks
#[derive(Debug)]
pub struct Character {
    object: GameObject,
    direction: Option<Direction>,
    assets: AssetSet,
}

impl Character {
    /// Displacement per movement tick
    pub const STEP: i32 = 1;

    /// Wrap an object; the character starts stationary
    pub fn new(object: GameObject, assets: AssetSet) -> Self {
        let mut character = Self {
            object,
            direction: None,
            assets,
        };
        character.show_state();
        character
    }

    /// Underlying object
    pub fn object(&self) -> &GameObject {
        &self.object
    }

    /// Mutable underlying object
    pub fn object_mut(&mut self) -> &mut GameObject {
        &mut self.object
    }

    /// Current direction, `None` when stationary
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Whether a direction is active
    pub fn is_moving(&self) -> bool {
        self.direction.is_some()
    }

    /// Representation matching the current direction
    pub fn visual_state(&self) -> VisualState {
        VisualState::from(self.direction)
    }

    /// Asset set the representation is drawn from
    pub fn assets(&self) -> &AssetSet {
        &self.assets
    }

    /// Start walking in `direction`
    pub fn walk(&mut self, direction: Direction) {
        self.set_direction(Some(direction));
    }

    /// Start walking right
    pub fn walk_right(&mut self) {
        self.walk(Direction::Right);
    }

    /// Start walking left
    pub fn walk_left(&mut self) {
        self.walk(Direction::Left);
    }

    /// Start walking up
    pub fn walk_up(&mut self) {
        self.walk(Direction::Up);
    }

    /// Start walking down
    pub fn walk_down(&mut self) {
        self.walk(Direction::Down);
    }

    /// Stop walking; never moves the character
    pub fn stop(&mut self) {
        self.set_direction(None);
    }

    /// One movement tick
    pub fn step(&mut self) {
        if let Some(direction) = self.direction {
            let (dx, dy) = direction.delta();
            self.object.translate(dx * Self::STEP, dy * Self::STEP);
        }
    }

    fn set_direction(&mut self, direction: Option<Direction>) {
        if self.direction != direction {
            log::debug!(
                "{:?} direction {:?} -> {:?}",
                self.object.id(),
                self.direction,
                direction
            );
        }
        self.direction = direction;
        self.show_state();
    }

    fn show_state(&mut self) {
        let source = self.assets.source(self.visual_state());
        self.object.set_source(&source);
    }
}

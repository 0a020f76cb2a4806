//! Visual side-effect interface
//!
//! The engine never draws anything itself. Every game object owns an
//! [`Element`] created by an external [`Surface`]; geometry changes and
//! representation changes are pushed to that element synchronously.

pub mod recording;

pub use recording::{RecordingSurface, VisualCall, VisualOp};

use crate::world::{Direction, ObjectId};
use serde::{Deserialize, Serialize};

/// Displayed representation of a game object
pub trait Element {
    /// Move the element to `(x, y)` (bottom-left origin)
    fn set_position(&mut self, x: i32, y: i32);

    /// Resize the element
    fn set_size(&mut self, width: i32, height: i32);

    /// Select the displayed image
    fn set_source(&mut self, source: &str);

    /// Remove the element from the display (called when its object is removed)
    fn detach(&mut self) {}
}

/// Factory for elements, implemented by the presentation layer
pub trait Surface {
    /// Create the element for a newly spawned object
    fn create_element(&mut self, id: ObjectId) -> Box<dyn Element>;
}

/// Named representation states for characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualState {
    /// Standing still
    Static,
    /// Walking right
    WalkRight,
    /// Walking left
    WalkLeft,
    /// Walking up
    WalkUp,
    /// Walking down
    WalkDown,
}

impl VisualState {
    /// Image file name for this state within an asset set
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Static => "static.gif",
            Self::WalkRight => "walkright.gif",
            Self::WalkLeft => "walkleft.gif",
            Self::WalkUp => "walkup.gif",
            Self::WalkDown => "walkdown.gif",
        }
    }
}

impl From<Option<Direction>> for VisualState {
    fn from(direction: Option<Direction>) -> Self {
        match direction {
            None => Self::Static,
            Some(Direction::Right) => Self::WalkRight,
            Some(Direction::Left) => Self::WalkLeft,
            Some(Direction::Up) => Self::WalkUp,
            Some(Direction::Down) => Self::WalkDown,
        }
    }
}

/// Per-character asset set (a skin under a base path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSet {
    /// Base path or URL holding all skins
    pub base: String,
    /// Skin name, e.g. a color
    pub skin: String,
}

impl AssetSet {
    /// Create an asset set
    pub fn new(base: impl Into<String>, skin: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            skin: skin.into(),
        }
    }

    /// Source path for the given state
    pub fn source(&self, state: VisualState) -> String {
        format!(
            "{}/{}/{}",
            self.base.trim_end_matches('/'),
            self.skin,
            state.file_name()
        )
    }
}

/// Surface whose elements discard every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

struct NullElement;

impl Element for NullElement {
    fn set_position(&mut self, _x: i32, _y: i32) {}
    fn set_size(&mut self, _width: i32, _height: i32) {}
    fn set_source(&mut self, _source: &str) {}
}

impl Surface for NullSurface {
    fn create_element(&mut self, _id: ObjectId) -> Box<dyn Element> {
        Box::new(NullElement)
    }
}

/// Surface that reports every update through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSurface;

struct LogElement {
    id: ObjectId,
}

impl Element for LogElement {
    fn set_position(&mut self, x: i32, y: i32) {
        log::trace!("{:?} position ({}, {})", self.id, x, y);
    }

    fn set_size(&mut self, width: i32, height: i32) {
        log::trace!("{:?} size {}x{}", self.id, width, height);
    }

    fn set_source(&mut self, source: &str) {
        log::debug!("{:?} shows {}", self.id, source);
    }

    fn detach(&mut self) {
        log::debug!("{:?} detached", self.id);
    }
}

impl Surface for LogSurface {
    fn create_element(&mut self, id: ObjectId) -> Box<dyn Element> {
        log::debug!("{:?} element created", id);
        Box::new(LogElement { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_source_paths() {
        let assets = AssetSet::new("assets/", "green");
        assert_eq!(assets.source(VisualState::Static), "assets/green/static.gif");
        assert_eq!(assets.source(VisualState::WalkLeft), "assets/green/walkleft.gif");
    }

    #[test]
    fn test_visual_state_from_direction() {
        assert_eq!(VisualState::from(None), VisualState::Static);
        assert_eq!(VisualState::from(Some(Direction::Up)), VisualState::WalkUp);
        assert_eq!(VisualState::from(Some(Direction::Down)).file_name(), "walkdown.gif");
    }
}

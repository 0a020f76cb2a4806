//! Game object geometry
//!
//! A game object is a box with a bottom-left corner and a size. The edges are
//! always derived from those four numbers; every change is pushed to the
//! object's visual element before the setter returns.

use super::{ObjectId, WorldError};
use crate::physics::Aabb;
use crate::render::Element;
use std::fmt;

/// Validated object size; both sides are strictly positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    width: i32,
    height: i32,
}

impl Size {
    /// Default object width in pixels
    pub const DEFAULT_WIDTH: i32 = 100;
    /// Default object height in pixels
    pub const DEFAULT_HEIGHT: i32 = 150;

    /// Create a size, rejecting non-positive sides
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidGeometry { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width in pixels
    pub fn width(self) -> i32 {
        self.width
    }

    /// Height in pixels
    pub fn height(self) -> i32 {
        self.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
        }
    }
}

/// A positioned, sized object with a visual element
pub struct GameObject {
    id: ObjectId,
    x: i32,
    y: i32,
    size: Size,
    element: Box<dyn Element>,
}

impl GameObject {
    /// Objects are only built by the world, which registers them immediately
    pub(crate) fn new(id: ObjectId, x: i32, y: i32, size: Size, element: Box<dyn Element>) -> Self {
        let mut object = Self {
            id,
            x,
            y,
            size,
            element,
        };
        object.sync_position();
        object.sync_size();
        object
    }

    /// Stable identity
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// Horizontal position (left edge)
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Vertical position (bottom edge)
    pub fn y(&self) -> i32 {
        self.y
    }

    /// `(x, y)`
    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.size.width
    }

    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Current size
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the horizontal position
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
        self.sync_position();
    }

    /// Set the vertical position
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
        self.sync_position();
    }

    /// Set both coordinates with a single visual update
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.sync_position();
    }

    /// Move by `(dx, dy)`, stopping at the edge of the `i32` plane
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.set_position(self.x.saturating_add(dx), self.y.saturating_add(dy));
    }

    /// Set the width; non-positive values are rejected and nothing changes
    pub fn set_width(&mut self, width: i32) -> Result<(), WorldError> {
        self.set_size(Size::new(width, self.size.height)?);
        Ok(())
    }

    /// Set the height; non-positive values are rejected and nothing changes
    pub fn set_height(&mut self, height: i32) -> Result<(), WorldError> {
        self.set_size(Size::new(self.size.width, height)?);
        Ok(())
    }

    /// Replace the size
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.sync_size();
    }

    /// Left edge
    pub fn left_side(&self) -> i32 {
        self.x
    }

    /// Right edge, saturating at `i32::MAX`; [`GameObject::bounds`] is exact
    pub fn right_side(&self) -> i32 {
        self.left_side().saturating_add(self.size.width)
    }

    /// Bottom edge
    pub fn bottom(&self) -> i32 {
        self.y
    }

    /// Top edge, saturating at `i32::MAX`; [`GameObject::bounds`] is exact
    pub fn top(&self) -> i32 {
        self.y.saturating_add(self.size.height)
    }

    /// Bounding box built from the current geometry
    pub fn bounds(&self) -> Aabb {
        Aabb::from_geometry(self.x, self.y, self.size.width, self.size.height)
    }

    /// Select the displayed image
    pub fn set_source(&mut self, source: &str) {
        self.element.set_source(source);
    }

    pub(crate) fn detach(&mut self) {
        self.element.detach();
    }

    fn sync_position(&mut self) {
        self.element.set_position(self.x, self.y);
    }

    fn sync_size(&mut self) {
        self.element.set_size(self.size.width, self.size.height);
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}

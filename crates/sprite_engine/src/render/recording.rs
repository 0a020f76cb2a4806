//! Surface that records every visual update for later inspection

use super::{Element, Surface};
use crate::world::ObjectId;
use std::cell::RefCell;
use std::rc::Rc;

/// A single visual operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisualOp {
    /// Element was created
    Created,
    /// Position pushed
    Position(i32, i32),
    /// Size pushed
    Size(i32, i32),
    /// Displayed image selected
    Source(String),
    /// Element was removed from the display
    Detached,
}

/// Operation tagged with the object it was applied to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualCall {
    /// Target object
    pub id: ObjectId,
    /// What happened
    pub op: VisualOp,
}

/// Recording surface
///
/// Clones share the same log, so a handle can be kept after the surface
/// has been moved into a world.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Rc<RefCell<Vec<VisualCall>>>,
}

impl RecordingSurface {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded call, oldest first
    pub fn calls(&self) -> Vec<VisualCall> {
        self.calls.borrow().clone()
    }

    /// Operations recorded for one object
    pub fn ops_for(&self, id: ObjectId) -> Vec<VisualOp> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.id == id)
            .map(|call| call.op.clone())
            .collect()
    }

    /// Image sources selected for one object, oldest first
    pub fn sources_for(&self, id: ObjectId) -> Vec<String> {
        self.ops_for(id)
            .into_iter()
            .filter_map(|op| match op {
                VisualOp::Source(source) => Some(source),
                _ => None,
            })
            .collect()
    }

    /// Last position pushed for one object
    pub fn last_position(&self, id: ObjectId) -> Option<(i32, i32)> {
        self.ops_for(id).into_iter().rev().find_map(|op| match op {
            VisualOp::Position(x, y) => Some((x, y)),
            _ => None,
        })
    }

    /// Forget everything recorded so far
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

struct RecordingElement {
    id: ObjectId,
    calls: Rc<RefCell<Vec<VisualCall>>>,
}

impl RecordingElement {
    fn record(&self, op: VisualOp) {
        self.calls.borrow_mut().push(VisualCall { id: self.id, op });
    }
}

impl Element for RecordingElement {
    fn set_position(&mut self, x: i32, y: i32) {
        self.record(VisualOp::Position(x, y));
    }

    fn set_size(&mut self, width: i32, height: i32) {
        self.record(VisualOp::Size(width, height));
    }

    fn set_source(&mut self, source: &str) {
        self.record(VisualOp::Source(source.to_string()));
    }

    fn detach(&mut self) {
        self.record(VisualOp::Detached);
    }
}

impl Surface for RecordingSurface {
    fn create_element(&mut self, id: ObjectId) -> Box<dyn Element> {
        let element = RecordingElement {
            id,
            calls: Rc::clone(&self.calls),
        };
        element.record(VisualOp::Created);
        Box::new(element)
    }
}

//! Live-object registry
//!
//! Bodies are stored in a slot map so ids stay valid (and stale ids stay
//! invalid) across removals; a separate list keeps insertion order for
//! deterministic iteration.

use super::{Body, ObjectId};
use crate::physics::Collider;
use slotmap::SlotMap;

/// Insertion-ordered set of live bodies
#[derive(Default)]
pub struct Registry {
    bodies: SlotMap<ObjectId, Box<dyn Body>>,
    order: Vec<ObjectId>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body built from its freshly allocated id
    pub fn insert_with_key<F>(&mut self, build: F) -> ObjectId
    where
        F: FnOnce(ObjectId) -> Box<dyn Body>,
    {
        let id = self.bodies.insert_with_key(build);
        self.order.push(id);
        id
    }

    /// Remove a body; its id will never be handed out again
    pub fn remove(&mut self, id: ObjectId) -> Option<Box<dyn Body>> {
        let body = self.bodies.remove(id)?;
        self.order.retain(|&other| other != id);
        Some(body)
    }

    /// Whether `id` is live
    pub fn contains(&self, id: ObjectId) -> bool {
        self.bodies.contains_key(id)
    }

    /// Look up a body
    pub fn get(&self, id: ObjectId) -> Option<&dyn Body> {
        self.bodies.get(id).map(|body| body.as_ref() as &dyn Body)
    }

    /// Look up a body mutably
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut dyn Body> {
        self.bodies.get_mut(id).map(|body| body.as_mut() as &mut dyn Body)
    }

    pub(crate) fn get_boxed_mut(&mut self, id: ObjectId) -> Option<&mut Box<dyn Body>> {
        self.bodies.get_mut(id)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Ids in insertion order
    pub fn ids(&self) -> &[ObjectId] {
        &self.order
    }

    /// Bodies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &dyn Body)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.bodies.get(id).map(|body| (id, body.as_ref() as &dyn Body)))
    }

    /// Run `f` on every body in insertion order
    pub fn for_each_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(ObjectId, &mut dyn Body),
    {
        for &id in &self.order {
            if let Some(body) = self.bodies.get_mut(id) {
                f(id, body.as_mut());
            }
        }
    }

    /// Bounds of every body, taken now, in insertion order
    pub fn snapshot(&self) -> Vec<Collider> {
        self.iter()
            .map(|(id, body)| Collider {
                id,
                bounds: body.object().bounds(),
                is_character: body.character().is_some(),
            })
            .collect()
    }

    /// Remove every body
    pub fn clear(&mut self) -> Vec<Box<dyn Body>> {
        self.order.clear();
        self.bodies.drain().map(|(_, body)| body).collect()
    }
}

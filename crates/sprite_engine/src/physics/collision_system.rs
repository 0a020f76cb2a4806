//! Core collision detection system
//!
//! Pure pairwise detection over a snapshot of colliders. It does not know
//! about the world or about responses; the world takes a snapshot, asks for
//! the overlapping pairs and then dispatches notifications itself. Working on
//! a snapshot means nothing can move while a tick is being tested.

use crate::physics::collision::Aabb;
use crate::world::ObjectId;
use std::collections::HashSet;

/// Snapshot of one object taken at the start of a collision tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collider {
    /// Object identity
    pub id: ObjectId,
    /// Bounds at snapshot time
    pub bounds: Aabb,
    /// Whether the object is a character
    pub is_character: bool,
}

/// Two distinct objects whose boxes overlap
///
/// `first` is the object that was registered earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Earlier-registered member
    pub first: ObjectId,
    /// Later-registered member
    pub second: ObjectId,
}

impl CollisionPair {
    /// Whether `id` is a member of this pair
    pub fn involves(&self, id: ObjectId) -> bool {
        self.first == id || self.second == id
    }

    /// The member that is not `id`
    pub fn other(&self, id: ObjectId) -> Option<ObjectId> {
        if self.first == id {
            Some(self.second)
        } else if self.second == id {
            Some(self.first)
        } else {
            None
        }
    }
}

/// Pairwise collision detector
///
/// Every unordered pair of distinct colliders is tested once per call, so a
/// tick costs O(n²). That is fine for the small object counts this engine
/// targets.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    /// Pairs from the current tick, in snapshot order
    current_pairs: Vec<CollisionPair>,

    /// Pairs from the previous tick
    previous_pairs: HashSet<CollisionPair>,
}

impl CollisionSystem {
    /// Create an empty collision system
    pub fn new() -> Self {
        Self::default()
    }

    /// Test every unordered pair in `snapshot` and return the overlapping ones
    ///
    /// Pairs come back ordered by the snapshot position of their first member,
    /// then of their second member.
    pub fn detect(&mut self, snapshot: &[Collider]) -> &[CollisionPair] {
        self.previous_pairs = self.current_pairs.drain(..).collect();

        for (i, a) in snapshot.iter().enumerate() {
            for b in &snapshot[i + 1..] {
                if a.id == b.id {
                    continue;
                }
                if a.bounds.overlaps(&b.bounds) {
                    self.current_pairs.push(CollisionPair {
                        first: a.id,
                        second: b.id,
                    });
                }
            }
        }

        log::trace!(
            "Collision tick: {} colliders, {} pairs",
            snapshot.len(),
            self.current_pairs.len()
        );
        &self.current_pairs
    }

    /// Pairs that started overlapping on the latest tick
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        self.current_pairs
            .iter()
            .filter(|pair| !self.previous_pairs.contains(pair))
            .copied()
            .collect()
    }

    /// Pairs that stopped overlapping on the latest tick
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs
            .iter()
            .filter(|pair| !self.current_pairs.contains(pair))
            .copied()
            .collect()
    }

    /// Pairs from the latest tick
    pub fn current_collisions(&self) -> &[CollisionPair] {
        &self.current_pairs
    }

    /// Forget a removed object so it cannot show up as an exited pair
    pub fn forget(&mut self, id: ObjectId) {
        self.current_pairs.retain(|pair| !pair.involves(id));
        self.previous_pairs.retain(|pair| !pair.involves(id));
    }

    /// Clear all collision data
    pub fn clear(&mut self) {
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
}

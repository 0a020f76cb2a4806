//! Physics module for collision detection
//!
//! Axis-aligned bounding boxes and a snapshot-based pairwise collision
//! system. There is no contact resolution here: responding to a collision
//! is up to each object.

pub mod collision;
pub mod collision_system;

pub use collision::Aabb;
pub use collision_system::{CollisionPair, CollisionSystem, Collider};

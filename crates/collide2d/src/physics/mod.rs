//! Physics module for 2D collision detection
//!
//! Narrow-phase only: callers pick candidate pairs (for example from
//! [`World::colliders`](crate::ecs::World::colliders)) and this module tells
//! them whether, and by how much, two shapes overlap.

pub mod collision;

pub use collision::{
    CircleShape, CollisionError, CollisionResponse, CollisionShape, EdgeClosure, NarrowPhase,
    PolygonShape, Segment, ShapeKind,
};

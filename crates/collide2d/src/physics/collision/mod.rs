//! Narrow-phase collision detection for 2D shapes
//!
//! # Architecture
//!
//! - **Model Space Storage**: Collision shapes stored in the owner's local frame
//! - **On-Demand Transformation**: Shapes transformed to world space only during tests
//! - **Exhaustive Dispatch**: One `match` over the pair of shape kinds
//!
//! # Module Organization
//!
//! - [`primitives`] - Segments, projection intervals, edge policy
//! - [`shape`] - Model-space shapes and their temporary world-space forms
//! - [`narrow_phase`] - Separating axis tests and the collision response

pub mod primitives;
pub mod shape;
pub mod narrow_phase;

pub use primitives::{EdgeClosure, Projection, Segment};
pub use shape::{
    BoxExtents, CircleShape, CollisionShape, PolygonShape, ShapeKind, WorldSpaceCircle,
    WorldSpacePolygon, WorldSpaceShape,
};
pub use narrow_phase::{CollisionResponse, NarrowPhase};

use crate::ecs::Entity;

/// Collision errors
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CollisionError {
    /// Geometry rejected at construction
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    /// The entity lacks a component the collision test needs
    #[error("Entity {entity:?} is missing its {component} component")]
    MissingComponent {
        /// Entity that was tested
        entity: Entity,
        /// Name of the missing component
        component: &'static str,
    },

    /// The entity key does not refer to a live entity
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(Entity),
}

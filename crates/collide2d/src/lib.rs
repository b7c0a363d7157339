//! # Collide2D
//!
//! A 2D rigid-shape collision subsystem for the engine.
//!
//! ## Features
//!
//! - **Hierarchical Transforms**: Local/world centers composed through parent chains
//! - **Narrow-Phase SAT**: Polygon-polygon, polygon-circle and circle-circle tests
//!   producing a minimum translation vector
//! - **Segment Tests**: Line segment crossing against polygon edges (raycasts)
//! - **Arena World**: Entities addressed by stable generational keys, no cycles
//!
//! ## Quick Start
//!
//! ```rust
//! use collide2d::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut world = World::new();
//!
//!     let a = world.create_entity();
//!     world.add_transform(a, TransformComponent::from_position(Vec2::new(0.0, 0.0)))?;
//!     world.attach_collider(a, CollisionShape::rect(2.0, 2.0, 0.0)?)?;
//!
//!     let b = world.create_entity();
//!     world.add_transform(b, TransformComponent::from_position(Vec2::new(1.0, 0.0)))?;
//!     world.attach_collider(b, CollisionShape::rect(2.0, 2.0, 0.0)?)?;
//!
//!     let response = world.test(a, b)?.expect("boxes overlap");
//!     assert!((response.magnitude - 1.0).abs() < 1e-9);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod ecs;
pub mod physics;
pub mod debug;

#[cfg(test)]
mod tests;

/// Common imports for users of the collision core
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        debug::{CollisionDebugVisualizer, DebugShape},
        ecs::{
            components::{ColliderComponent, TransformComponent},
            Entity, PlacedCollider, SceneError, World,
        },
        foundation::math::Vec2,
        physics::collision::{
            CircleShape, CollisionError, CollisionResponse, CollisionShape, EdgeClosure,
            PolygonShape, Segment, ShapeKind,
        },
    };
}

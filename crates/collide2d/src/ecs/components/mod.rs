//! ECS Components module
//!
//! Contains the spatial and collision components

pub mod transform;
pub mod collision;

pub use transform::TransformComponent;
pub use collision::{ColliderComponent, PlacedCollider};

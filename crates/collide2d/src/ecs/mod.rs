//! Entity-Component container for the collision core
//!
//! A minimal arena: entities are generational keys, transforms and colliders
//! live in per-type secondary maps, and parent links are entity keys.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;

pub use world::{SceneError, World};
pub use entity::Entity;
pub use component::Component;
pub use components::PlacedCollider;

//! Debug module for visualization
//!
//! Read-only export of world-space collision geometry for a renderer.

pub mod collision_debug;

pub use collision_debug::{CollisionDebugColors, CollisionDebugVisualizer, DebugShape};

//! Cross-module integration tests
//!
//! Exercise the world, transforms and colliders together through the public
//! API, the way a broad-phase or game loop would.

mod transform_chain;
mod segment_integration;

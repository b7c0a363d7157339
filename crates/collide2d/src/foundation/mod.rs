//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the collision core:
//! - Math types and planar helpers
//! - Logging utilities

pub mod math;
pub mod logging;

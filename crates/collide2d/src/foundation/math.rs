//! Math utilities and types
//!
//! Provides the 2D vector type and the handful of planar helpers used by the
//! transform chain and the separating axis tests.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type (double precision throughout the collision core)
pub type Vec2 = Vector2<f64>;

/// Tolerance used to detect degenerate geometry (zero-length edges, coincident centers)
pub const EPSILON: f64 = 1e-12;

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate(v: Vec2, angle: f64) -> Vec2 {
    if angle == 0.0 {
        return v;
    }
    Rotation2::new(angle) * v
}

/// Left-hand perpendicular `(-y, x)`
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Scalar 2D cross product (z component of the 3D cross product)
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Flip an axis into the canonical half plane: `x > 0`, or `x == 0` and `y > 0`.
///
/// An axis and its negation describe the same projection line, so SAT only
/// needs one representative per line. Picking it deterministically makes the
/// candidate set independent of which shape contributed the edge.
pub fn canonical_axis(axis: Vec2) -> Vec2 {
    if axis.x < 0.0 || (axis.x == 0.0 && axis.y < 0.0) {
        -axis
    } else {
        axis
    }
}

/// Normalize `v`, returning `None` when it is too short to define a direction
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    let length_squared = v.norm_squared();
    if length_squared <= EPSILON * EPSILON {
        None
    } else {
        Some(v / length_squared.sqrt())
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f64 = PI * 0.5;
}

//! Primitive collision geometry and intersection algorithms
//!
//! Provides line segments (for raycasts against polygon edges) and the
//! projection interval used by the separating axis tests.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{cross, Vec2};

/// A line segment in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point of the segment
    pub start: Vec2,
    /// End point of the segment
    pub end: Vec2,
}

impl Segment {
    /// Creates a new segment between two world-space points
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    /// Test whether this segment crosses another one.
    ///
    /// Touching (an endpoint lying on the other segment) and collinear
    /// overlap both count as crossing.
    pub fn crosses(&self, other: &Segment) -> bool {
        let (a, b) = (self.start, self.end);
        let (c, d) = (other.start, other.end);

        let o1 = orientation(a, b, c);
        let o2 = orientation(a, b, d);
        if o1 * o2 > 0.0 {
            return false;
        }

        let o3 = orientation(c, d, a);
        let o4 = orientation(c, d, b);
        if o3 * o4 > 0.0 {
            return false;
        }

        if o1 == 0.0 && o2 == 0.0 && o3 == 0.0 && o4 == 0.0 {
            // All four points on one line: compare extents along that line
            return collinear_overlap(a, b, c, d);
        }

        true
    }
}

/// Signed area of the triangle `(a, b, c)`: positive when `c` is left of `a -> b`
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    cross(b - a, c - a)
}

fn collinear_overlap(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    // Project on whichever coordinate the line spans more of
    let span = (b - a).abs() + (d - c).abs();
    let pick = |p: Vec2| if span.x >= span.y { p.x } else { p.y };

    let (a_min, a_max) = min_max(pick(a), pick(b));
    let (c_min, c_max) = min_max(pick(c), pick(d));
    a_min <= c_max && c_min <= a_max
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Which polygon edges a segment test walks
///
/// `Open` stops at the second-to-last point and skips the edge from the last
/// point back to the first. `Closed` tests the full loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeClosure {
    /// Test `(p[i], p[i + 1])` only
    #[default]
    Open,
    /// Also test `(p[last], p[0])`
    Closed,
}

/// Closed interval of a shape projected onto an axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Smallest projected value
    pub min: f64,
    /// Largest projected value
    pub max: f64,
}

impl Projection {
    /// Creates a projection interval
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Project a point set onto `axis`
    pub fn of_points(points: &[Vec2], axis: Vec2) -> Self {
        points.iter().fold(
            Self::new(f64::INFINITY, f64::NEG_INFINITY),
            |acc, point| {
                let p = point.dot(&axis);
                Self::new(acc.min.min(p), acc.max.max(p))
            },
        )
    }

    /// Project a circle onto `axis` (`center . axis +/- radius`)
    pub fn of_circle(center: Vec2, radius: f64, axis: Vec2) -> Self {
        let c = center.dot(&axis);
        Self::new(c - radius, c + radius)
    }

    /// Depth `self` must travel toward `-axis` to clear `other`
    pub fn push_down(&self, other: &Projection) -> f64 {
        self.max - other.min
    }

    /// Depth `self` must travel toward `+axis` to clear `other`
    pub fn push_up(&self, other: &Projection) -> f64 {
        other.max - self.min
    }

    /// Whether this interval lies entirely inside `other`
    pub fn contained_in(&self, other: &Projection) -> bool {
        self.min >= other.min && self.max <= other.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Vec2::new(ax, ay), Vec2::new(bx, by))
    }

    #[test]
    fn test_crossing_segments() {
        assert!(seg(-1.0, 0.0, 1.0, 0.0).crosses(&seg(0.0, -1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_disjoint_segments() {
        assert!(!seg(-1.0, 0.0, 1.0, 0.0).crosses(&seg(2.0, -1.0, 2.0, 1.0)));
        assert!(!seg(0.0, 0.0, 1.0, 1.0).crosses(&seg(0.0, 1.0, 0.4, 0.6)));
    }

    #[test]
    fn test_parallel_segments_do_not_cross() {
        assert!(!seg(0.0, 0.0, 4.0, 0.0).crosses(&seg(0.0, 1.0, 4.0, 1.0)));
    }

    #[test]
    fn test_touching_endpoint_counts() {
        assert!(seg(0.0, 0.0, 1.0, 0.0).crosses(&seg(1.0, 0.0, 1.0, 5.0)));
        assert!(seg(-1.0, 0.0, 1.0, 0.0).crosses(&seg(0.0, 0.0, 0.0, 3.0)));
    }

    #[test]
    fn test_collinear_overlap() {
        assert!(seg(0.0, 0.0, 2.0, 0.0).crosses(&seg(1.0, 0.0, 3.0, 0.0)));
        assert!(!seg(0.0, 0.0, 1.0, 0.0).crosses(&seg(2.0, 0.0, 3.0, 0.0)));
        assert!(seg(0.0, 0.0, 0.0, 2.0).crosses(&seg(0.0, 2.0, 0.0, 3.0)));
    }

    #[test]
    fn test_projection_of_points() {
        let points = [Vec2::new(-1.0, 2.0), Vec2::new(3.0, 0.0), Vec2::new(1.0, -4.0)];
        let projection = Projection::of_points(&points, Vec2::new(1.0, 0.0));
        assert_eq!(projection, Projection::new(-1.0, 3.0));
    }

    #[test]
    fn test_projection_push_depths() {
        let a = Projection::new(-1.0, 1.0);
        let b = Projection::new(0.0, 2.0);
        assert_eq!(a.push_down(&b), 1.0);
        assert_eq!(a.push_up(&b), 3.0);
        assert!(Projection::new(0.5, 1.5).contained_in(&b));
        assert!(!a.contained_in(&b));
    }
}

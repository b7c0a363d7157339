//! Separating Axis Theorem narrow-phase
//!
//! Two convex shapes are disjoint iff some axis separates their projections.
//! Every test here returns either `None` or the minimum translation vector
//! that moves the FIRST shape out of the second.
//!
//! Policies shared by all pairings:
//! - Touching (overlap exactly zero) is not a collision.
//! - Candidate axes are flipped into one canonical half plane and sorted by
//!   angle, so the candidate order does not depend on argument order.
//! - A later axis only replaces the current best when its depth is smaller by
//!   more than the tie tolerance; equal depths keep the earlier axis.
//! - The first shape moves toward whichever side needs less travel. Exact
//!   ties compare the shapes' centers along the axis, and if those tie too
//!   the first shape moves along `-axis`.
//!
//! Together these make `test(a, b)` the exact negation of `test(b, a)`.

use std::cmp::Ordering;

use crate::config::CollisionConfig;
use crate::foundation::math::{canonical_axis, perp, try_normalize, Vec2};
use super::primitives::{EdgeClosure, Projection};
use super::shape::{WorldSpaceCircle, WorldSpacePolygon, WorldSpaceShape};

/// Result of a positive narrow-phase test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResponse {
    /// Minimum translation vector: move the first shape by this to separate
    pub overlap: Vec2,
    /// Unit vector in the direction of `overlap`
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub magnitude: f64,
    /// The first shape lies entirely inside the second
    pub self_in_other: bool,
    /// The second shape lies entirely inside the first
    pub other_in_self: bool,
}

impl CollisionResponse {
    fn new(normal: Vec2, magnitude: f64, self_in_other: bool, other_in_self: bool) -> Self {
        Self {
            overlap: normal * magnitude,
            normal,
            magnitude,
            self_in_other,
            other_in_self,
        }
    }

    /// The same contact seen from the other shape
    pub fn negated(&self) -> Self {
        Self {
            overlap: -self.overlap,
            normal: -self.normal,
            magnitude: self.magnitude,
            self_in_other: self.other_in_self,
            other_in_self: self.self_in_other,
        }
    }
}

/// Axis of least penetration found so far
#[derive(Debug, Clone, Copy)]
struct AxisOverlap {
    /// Direction the first shape moves along
    normal: Vec2,
    depth: f64,
}

/// Narrow-phase tester parameterized by the collision policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrowPhase {
    tie_epsilon: f64,
    degenerate_axis: Vec2,
}

impl Default for NarrowPhase {
    fn default() -> Self {
        Self::new(&CollisionConfig::default())
    }
}

impl NarrowPhase {
    /// Create a tester from the collision config
    pub fn new(config: &CollisionConfig) -> Self {
        Self {
            tie_epsilon: config.tie_epsilon(),
            degenerate_axis: config.degenerate_axis(),
        }
    }

    /// Dispatch on the pair of shape kinds
    pub fn test(&self, a: &WorldSpaceShape, b: &WorldSpaceShape) -> Option<CollisionResponse> {
        match (a, b) {
            (WorldSpaceShape::Polygon(a), WorldSpaceShape::Polygon(b)) => self.polygon_polygon(a, b),
            (WorldSpaceShape::Polygon(a), WorldSpaceShape::Circle(b)) => self.polygon_circle(a, b),
            (WorldSpaceShape::Circle(a), WorldSpaceShape::Polygon(b)) => self.circle_polygon(a, b),
            (WorldSpaceShape::Circle(a), WorldSpaceShape::Circle(b)) => self.circle_circle(a, b),
        }
    }

    /// Polygon vs polygon: edge normals of both polygons are the candidates
    pub fn polygon_polygon(
        &self,
        a: &WorldSpacePolygon,
        b: &WorldSpacePolygon,
    ) -> Option<CollisionResponse> {
        let axes = edge_normals(a).chain(edge_normals(b)).collect();

        self.separating_axis_test(
            axes,
            |axis| Projection::of_points(&a.points, axis),
            |axis| Projection::of_points(&b.points, axis),
            a.centroid(),
            b.centroid(),
        )
    }

    /// Polygon vs circle: polygon edge normals plus the axis from the circle
    /// center to the nearest polygon vertex
    pub fn polygon_circle(
        &self,
        polygon: &WorldSpacePolygon,
        circle: &WorldSpaceCircle,
    ) -> Option<CollisionResponse> {
        let mut axes: Vec<Vec2> = edge_normals(polygon).collect();

        let nearest = polygon.points.iter().min_by(|p, q| {
            (*p - circle.center)
                .norm_squared()
                .total_cmp(&(*q - circle.center).norm_squared())
        });
        if let Some(axis) = nearest.and_then(|vertex| try_normalize(vertex - circle.center)) {
            axes.push(canonical_axis(axis));
        }

        self.separating_axis_test(
            axes,
            |axis| Projection::of_points(&polygon.points, axis),
            |axis| Projection::of_circle(circle.center, circle.radius, axis),
            polygon.centroid(),
            circle.center,
        )
    }

    /// Circle vs polygon: the polygon vs circle contact seen from the circle
    pub fn circle_polygon(
        &self,
        circle: &WorldSpaceCircle,
        polygon: &WorldSpacePolygon,
    ) -> Option<CollisionResponse> {
        self.polygon_circle(polygon, circle).map(|response| response.negated())
    }

    /// Circle vs circle: collides iff the center distance is below the radius sum
    pub fn circle_circle(
        &self,
        a: &WorldSpaceCircle,
        b: &WorldSpaceCircle,
    ) -> Option<CollisionResponse> {
        let delta = b.center - a.center;
        let distance_squared = delta.norm_squared();
        let radius_sum = a.radius + b.radius;

        if distance_squared >= radius_sum * radius_sum {
            return None;
        }

        let distance = distance_squared.sqrt();
        let (axis, magnitude) = match try_normalize(delta) {
            Some(axis) => (axis, radius_sum - distance),
            None => {
                log::trace!("circle centers coincide, using fallback axis {:?}", self.degenerate_axis);
                (self.degenerate_axis, radius_sum)
            }
        };

        Some(CollisionResponse::new(
            -axis,
            magnitude,
            distance + a.radius <= b.radius,
            distance + b.radius <= a.radius,
        ))
    }

    fn separating_axis_test(
        &self,
        mut axes: Vec<Vec2>,
        project_a: impl Fn(Vec2) -> Projection,
        project_b: impl Fn(Vec2) -> Projection,
        center_a: Vec2,
        center_b: Vec2,
    ) -> Option<CollisionResponse> {
        axes.sort_by(compare_axes);

        let mut best: Option<AxisOverlap> = None;
        let mut self_in_other = true;
        let mut other_in_self = true;

        for axis in axes {
            let pa = project_a(axis);
            let pb = project_b(axis);

            let down = pa.push_down(&pb);
            let up = pa.push_up(&pb);
            let depth = down.min(up);

            if depth <= 0.0 {
                log::trace!("separating axis {axis:?} (depth {depth})");
                return None;
            }

            self_in_other &= pa.contained_in(&pb);
            other_in_self &= pb.contained_in(&pa);

            if best.map_or(true, |current| depth < current.depth - self.tie_epsilon) {
                let normal = match down.total_cmp(&up) {
                    Ordering::Less => -axis,
                    Ordering::Greater => axis,
                    Ordering::Equal => {
                        if center_a.dot(&axis) > center_b.dot(&axis) {
                            axis
                        } else {
                            -axis
                        }
                    }
                };
                best = Some(AxisOverlap { normal, depth });
            }
        }

        let best = best?;
        log::trace!("minimum penetration {} along {:?}", best.depth, best.normal);
        Some(CollisionResponse::new(best.normal, best.depth, self_in_other, other_in_self))
    }
}

/// Canonical unit edge normals; zero-length edges contribute nothing
fn edge_normals(polygon: &WorldSpacePolygon) -> impl Iterator<Item = Vec2> + '_ {
    polygon
        .edges(EdgeClosure::Closed)
        .filter_map(|edge| try_normalize(perp(edge.direction())))
        .map(canonical_axis)
}

/// Order axes by angle, then by components so near-duplicates still sort deterministically
fn compare_axes(a: &Vec2, b: &Vec2) -> Ordering {
    a.y.atan2(a.x)
        .total_cmp(&b.y.atan2(b.x))
        .then_with(|| a.x.total_cmp(&b.x))
        .then_with(|| a.y.total_cmp(&b.y))
}

//! High-level collision shape abstractions
//!
//! Shapes are stored in MODEL SPACE (the owning entity's local frame) and
//! transformed to world space on demand during collision tests. Nothing is
//! cached: world-space vertices change every tick as transforms move.

use crate::foundation::math::{rotate, Vec2};
use super::primitives::{EdgeClosure, Segment};
use super::CollisionError;

/// Shape type tag used for narrow-phase dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Convex polygon
    Polygon,
    /// Circle
    Circle,
}

/// Box metadata recorded by [`PolygonShape::rect`]; not used by the algorithms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxExtents {
    /// Full width of the box
    pub width: f64,
    /// Full height of the box
    pub height: f64,
}

/// Polygon in model space
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    points: Vec<Vec2>,
    angle: f64,
    extents: Option<BoxExtents>,
}

impl PolygonShape {
    /// Minimum vertex count for a polygon usable by the narrow-phase
    pub const MIN_POINTS: usize = 3;

    /// Creates a polygon from ordered model-space points (implicitly closed)
    pub fn new(points: Vec<Vec2>) -> Result<Self, CollisionError> {
        if points.len() < Self::MIN_POINTS {
            return Err(CollisionError::InvalidShape(format!(
                "polygon needs at least {} points, got {}",
                Self::MIN_POINTS,
                points.len()
            )));
        }
        if let Some(bad) = points.iter().find(|p| !p.iter().all(|c| c.is_finite())) {
            return Err(CollisionError::InvalidShape(format!(
                "polygon point ({}, {}) is not finite",
                bad.x, bad.y
            )));
        }

        Ok(Self {
            points,
            angle: 0.0,
            extents: None,
        })
    }

    /// Convenience constructor for a `width` x `height` rectangle centered on
    /// the local origin, rotated by `angle`
    pub fn rect(width: f64, height: f64, angle: f64) -> Result<Self, CollisionError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CollisionError::InvalidShape(format!(
                "box dimensions must be positive, got {width} x {height}"
            )));
        }

        let (hw, hh) = (width / 2.0, height / 2.0);
        let points = vec![
            Vec2::new(-hw, -hh),
            Vec2::new(hw, -hh),
            Vec2::new(hw, hh),
            Vec2::new(-hw, hh),
        ];

        Ok(Self {
            points,
            angle,
            extents: Some(BoxExtents { width, height }),
        })
    }

    /// Builder pattern: set the rotation offset applied before translation
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Model-space points in order
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Rotation offset in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Box metadata, if this polygon was built by [`PolygonShape::rect`]
    pub fn extents(&self) -> Option<BoxExtents> {
        self.extents
    }

    /// Rotate by the shape angle, then translate by the owner's world center
    pub fn to_world_space(&self, center: Vec2) -> WorldSpacePolygon {
        let points = self
            .points
            .iter()
            .map(|&p| rotate(p, self.angle) + center)
            .collect();
        WorldSpacePolygon { points }
    }

    /// Distance from the local origin to the farthest vertex
    pub fn local_bounding_radius(&self) -> f64 {
        self.points.iter().map(|p| p.norm()).fold(0.0, f64::max)
    }
}

/// Circle in model space (centered on the owner's origin)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    radius: f64,
}

impl CircleShape {
    /// Creates a circle with the given radius
    pub fn new(radius: f64) -> Result<Self, CollisionError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CollisionError::InvalidShape(format!(
                "circle radius must be finite and non-negative, got {radius}"
            )));
        }
        Ok(Self { radius })
    }

    /// Radius (unscaled)
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Center on the owner's world center, radius unchanged
    pub fn to_world_space(&self, center: Vec2) -> WorldSpaceCircle {
        WorldSpaceCircle {
            center,
            radius: self.radius,
        }
    }
}

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionShape {
    /// A convex polygon
    Polygon(PolygonShape),
    /// A circle (radius only, position from the owner's transform)
    Circle(CircleShape),
}

impl CollisionShape {
    /// Creates a polygon shape from model-space points
    pub fn polygon(points: Vec<Vec2>) -> Result<Self, CollisionError> {
        PolygonShape::new(points).map(Self::Polygon)
    }

    /// Creates a rectangular polygon shape
    pub fn rect(width: f64, height: f64, angle: f64) -> Result<Self, CollisionError> {
        PolygonShape::rect(width, height, angle).map(Self::Polygon)
    }

    /// Creates a circle shape
    pub fn circle(radius: f64) -> Result<Self, CollisionError> {
        CircleShape::new(radius).map(Self::Circle)
    }

    /// Type tag for dispatch
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Circle(_) => ShapeKind::Circle,
        }
    }

    /// Get the bounding radius in model space
    pub fn local_bounding_radius(&self) -> f64 {
        match self {
            Self::Polygon(polygon) => polygon.local_bounding_radius(),
            Self::Circle(circle) => circle.radius(),
        }
    }

    /// Transform this shape to world space given the owner's world center.
    ///
    /// Only the shape's own rotation offset is applied; the owning
    /// transform's angle is not composed in.
    pub fn to_world_space(&self, center: Vec2) -> WorldSpaceShape {
        match self {
            Self::Polygon(polygon) => WorldSpaceShape::Polygon(polygon.to_world_space(center)),
            Self::Circle(circle) => WorldSpaceShape::Circle(circle.to_world_space(center)),
        }
    }
}

impl From<PolygonShape> for CollisionShape {
    fn from(polygon: PolygonShape) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<CircleShape> for CollisionShape {
    fn from(circle: CircleShape) -> Self {
        Self::Circle(circle)
    }
}

/// World-space polygon (temporary, for testing only)
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSpacePolygon {
    /// World-space points in model order
    pub points: Vec<Vec2>,
}

impl WorldSpacePolygon {
    /// Edges `(p[i], p[i + 1])`, plus the closing edge when `closure` asks for it
    pub fn edges(&self, closure: EdgeClosure) -> impl Iterator<Item = Segment> + '_ {
        let closing = match (closure, self.points.first(), self.points.last()) {
            (EdgeClosure::Closed, Some(&first), Some(&last)) if self.points.len() > 2 => {
                Some(Segment::new(last, first))
            }
            _ => None,
        };

        self.points
            .windows(2)
            .map(|pair| Segment::new(pair[0], pair[1]))
            .chain(closing)
    }

    /// Test whether a world-space segment crosses any tested edge.
    ///
    /// Fewer than two points yields no edges and therefore `false`.
    pub fn segment_intersects(&self, segment: &Segment, closure: EdgeClosure) -> bool {
        self.edges(closure).any(|edge| segment.crosses(&edge))
    }

    /// Vertex average, used to order shapes along an axis when depths tie
    pub fn centroid(&self) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::zeros();
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.points.len() as f64;
        self.points.iter().sum::<Vec2>() / count
    }
}

/// World-space circle (temporary, for testing only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSpaceCircle {
    /// World-space center
    pub center: Vec2,
    /// Radius
    pub radius: f64,
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space polygon
    Polygon(WorldSpacePolygon),
    /// World-space circle
    Circle(WorldSpaceCircle),
}

impl WorldSpaceShape {
    /// Type tag for dispatch
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Circle(_) => ShapeKind::Circle,
        }
    }
}

//! Collision-specific debug visualization
//!
//! Collects world-space outlines of registered colliders for a renderer to
//! draw. Nothing here feeds back into the collision core.

use crate::ecs::{Entity, PlacedCollider, World};
use crate::foundation::math::Vec2;
use crate::physics::collision::WorldSpaceShape;

/// RGBA color, components in `0.0..=1.0`
pub type Color = [f32; 4];

/// Debug shape primitives in world space
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Closed polygon outline
    Polygon {
        /// Entity the outline belongs to
        entity: Entity,
        /// World-space vertices in order
        points: Vec<Vec2>,
        /// Outline color
        color: Color,
    },

    /// Circle outline
    Circle {
        /// Entity the outline belongs to
        entity: Entity,
        /// World-space center
        center: Vec2,
        /// Radius
        radius: f64,
        /// Outline color
        color: Color,
    },
}

impl DebugShape {
    /// Entity the shape was produced for
    pub fn entity(&self) -> Entity {
        match self {
            DebugShape::Polygon { entity, .. } | DebugShape::Circle { entity, .. } => *entity,
        }
    }

    /// Outline color
    pub fn color(&self) -> Color {
        match self {
            DebugShape::Polygon { color, .. } | DebugShape::Circle { color, .. } => *color,
        }
    }
}

/// Color scheme for collision visualization
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionDebugColors {
    /// Active collider, not colliding
    pub shape_default: Color,

    /// Active collider, currently colliding
    pub shape_colliding: Color,

    /// Inactive collider
    pub shape_inactive: Color,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            shape_default: [0.0, 1.0, 0.0, 0.3],   // Green, semi-transparent
            shape_colliding: [1.0, 0.0, 0.0, 0.5], // Red, semi-transparent
            shape_inactive: [0.5, 0.5, 0.5, 0.2],  // Grey, faint
        }
    }
}

/// Collision-specific debug visualizer
#[derive(Debug)]
pub struct CollisionDebugVisualizer {
    shapes: Vec<DebugShape>,
    colors: CollisionDebugColors,

    /// Master switch; a disabled visualizer records nothing
    pub enabled: bool,

    /// Include inactive colliders
    pub show_inactive: bool,
}

impl CollisionDebugVisualizer {
    /// Create a new collision debug visualizer
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            colors: CollisionDebugColors::default(),
            enabled: true,
            show_inactive: true,
        }
    }

    /// Set custom color scheme
    pub fn with_colors(mut self, colors: CollisionDebugColors) -> Self {
        self.colors = colors;
        self
    }

    /// Record one placed collider
    pub fn draw_collider(&mut self, placed: &PlacedCollider<'_>, is_colliding: bool) {
        if !self.enabled {
            return;
        }

        let color = if !placed.is_active() {
            if !self.show_inactive {
                return;
            }
            self.colors.shape_inactive
        } else if is_colliding {
            self.colors.shape_colliding
        } else {
            self.colors.shape_default
        };

        let entity = placed.entity();
        let shape = match placed.world_shape() {
            WorldSpaceShape::Polygon(polygon) => DebugShape::Polygon {
                entity,
                points: polygon.points,
                color,
            },
            WorldSpaceShape::Circle(circle) => DebugShape::Circle {
                entity,
                center: circle.center,
                radius: circle.radius,
                color,
            },
        };
        self.shapes.push(shape);
    }

    /// Replace the recorded shapes with a snapshot of every registered collider.
    ///
    /// Colliders whose owner has no transform are skipped. A collider is drawn
    /// as colliding when it overlaps any other registered collider.
    pub fn draw_world(&mut self, world: &World) {
        self.shapes.clear();
        if !self.enabled {
            return;
        }

        let placed: Vec<PlacedCollider<'_>> = world
            .colliders()
            .filter_map(|(entity, _)| world.placed_collider(entity).ok())
            .collect();

        for (index, collider) in placed.iter().enumerate() {
            let is_colliding = placed
                .iter()
                .enumerate()
                .any(|(other_index, other)| other_index != index && collider.test(other).is_some());
            self.draw_collider(collider, is_colliding);
        }

        log::trace!("Collected {} collision debug shapes", self.shapes.len());
    }

    /// Clear all recorded shapes
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Get all debug shapes for rendering
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }
}

impl Default for CollisionDebugVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

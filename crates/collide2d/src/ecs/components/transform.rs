//! Transform component for the ECS system
//!
//! Pure data component. The center is stored relative to the parent entity's
//! world center (or to the world when there is no parent); world-space values
//! are derived by [`World`](crate::ecs::World) on every access and never
//! cached.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    /// Position relative to the parent (or the world, if no parent)
    pub local_center: Vec2,

    /// Angle in radians
    pub angle: f64,

    /// World-axis-aligned velocity in units per second
    pub velocity: Vec2,

    /// A frozen transform does not move, regardless of its velocity
    pub frozen: bool,

    /// Parent entity; a relation only, the parent's lifetime is managed elsewhere
    pub parent: Option<Entity>,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            local_center: Vec2::zeros(),
            angle: 0.0,
            velocity: Vec2::zeros(),
            frozen: false,
            parent: None,
        }
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from local position only
    pub fn from_position(local_center: Vec2) -> Self {
        Self {
            local_center,
            ..Default::default()
        }
    }

    /// Builder pattern: Set angle (radians)
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Builder pattern: Set velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Builder pattern: Set parent entity
    pub fn with_parent(mut self, parent: Entity) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Builder pattern: Freeze in place
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Displacement `update(dt)` applies, or zero when frozen
    pub fn displacement(&self, delta_time: f64) -> Vec2 {
        if self.frozen {
            Vec2::zeros()
        } else {
            self.velocity * delta_time
        }
    }
}

//! Collision components for ECS
//!
//! [`ColliderComponent`] is the stored, model-space half of a collider.
//! [`PlacedCollider`] is the temporary view that binds it to its owner's
//! world center for the duration of a test.

use crate::ecs::Entity;
use crate::foundation::math::Vec2;
use crate::physics::collision::{
    CollisionResponse, CollisionShape, EdgeClosure, NarrowPhase, Segment, ShapeKind,
    WorldSpaceShape,
};

/// Component that gives an entity a collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderComponent {
    /// The collision shape in the owner's local frame
    pub shape: CollisionShape,

    /// Inactive colliders stay registered but never report collisions
    pub active: bool,
}

impl ColliderComponent {
    /// Create a new active collider
    pub fn new(shape: CollisionShape) -> Self {
        Self {
            shape,
            active: true,
        }
    }

    /// Builder pattern: start inactive
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Type tag used for dispatch
    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }
}

impl From<CollisionShape> for ColliderComponent {
    fn from(shape: CollisionShape) -> Self {
        Self::new(shape)
    }
}

/// A collider bound to its owner's world center
#[derive(Debug, Clone, Copy)]
pub struct PlacedCollider<'w> {
    entity: Entity,
    collider: &'w ColliderComponent,
    center: Vec2,
    narrow_phase: NarrowPhase,
    segment_edges: EdgeClosure,
}

impl<'w> PlacedCollider<'w> {
    pub(crate) fn new(
        entity: Entity,
        collider: &'w ColliderComponent,
        center: Vec2,
        narrow_phase: NarrowPhase,
        segment_edges: EdgeClosure,
    ) -> Self {
        Self {
            entity,
            collider,
            center,
            narrow_phase,
            segment_edges,
        }
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The stored collider
    pub fn collider(&self) -> &'w ColliderComponent {
        self.collider
    }

    /// Owner's world center at the time this view was built
    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Whether the collider takes part in tests
    pub fn is_active(&self) -> bool {
        self.collider.active
    }

    /// World-space shape, rebuilt on every call
    pub fn world_shape(&self) -> WorldSpaceShape {
        self.collider.shape.to_world_space(self.center)
    }

    /// Narrow-phase test against another collider.
    ///
    /// `None` when either collider is inactive, both views belong to the same
    /// entity, or the shapes do not overlap. The response moves `self` out of
    /// `other`, and swapping the arguments negates it exactly.
    pub fn test(&self, other: &PlacedCollider<'_>) -> Option<CollisionResponse> {
        if self.entity == other.entity || !self.is_active() || !other.is_active() {
            return None;
        }

        // Always evaluate in key order; degenerate layouts pick the same
        // fallback axis whichever shape comes first
        if self.entity < other.entity {
            self.narrow_phase.test(&self.world_shape(), &other.world_shape())
        } else {
            self.narrow_phase
                .test(&other.world_shape(), &self.world_shape())
                .map(|response| response.negated())
        }
    }

    /// Whether a world-space segment crosses this collider's polygon edges.
    ///
    /// Inactive colliders and circles always return `false`.
    pub fn segment_intersects(&self, segment: &Segment) -> bool {
        if !self.is_active() {
            return false;
        }

        match self.world_shape() {
            WorldSpaceShape::Polygon(polygon) => {
                polygon.segment_intersects(segment, self.segment_edges)
            }
            WorldSpaceShape::Circle(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn entities(count: usize) -> Vec<Entity> {
        let mut keys: SlotMap<Entity, ()> = SlotMap::with_key();
        (0..count).map(|_| keys.insert(())).collect()
    }

    fn placed_as<'w>(
        entity: Entity,
        collider: &'w ColliderComponent,
        x: f64,
        y: f64,
    ) -> PlacedCollider<'w> {
        PlacedCollider::new(
            entity,
            collider,
            Vec2::new(x, y),
            NarrowPhase::default(),
            EdgeClosure::Open,
        )
    }

    fn placed<'w>(collider: &'w ColliderComponent, x: f64, y: f64) -> PlacedCollider<'w> {
        placed_as(entities(1)[0], collider, x, y)
    }

    #[test]
    fn test_collider_defaults_to_active() {
        let collider = ColliderComponent::new(CollisionShape::circle(1.0).unwrap());
        assert!(collider.active);
        assert_eq!(collider.kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_inactive_collider_never_collides() {
        let active = ColliderComponent::new(CollisionShape::circle(1.0).unwrap());
        let inactive = ColliderComponent::new(CollisionShape::circle(1.0).unwrap()).inactive();

        let keys = entities(2);
        let a = placed_as(keys[0], &active, 0.0, 0.0);
        let b = placed_as(keys[1], &inactive, 0.5, 0.0);

        assert!(a.test(&b).is_none());
        assert!(b.test(&a).is_none());
    }

    #[test]
    fn test_coincident_circles_negate_in_both_orders() {
        let collider = ColliderComponent::new(CollisionShape::circle(1.0).unwrap());
        let keys = entities(2);
        let a = placed_as(keys[0], &collider, 0.0, 0.0);
        let b = placed_as(keys[1], &collider, 0.0, 0.0);

        let forward = a.test(&b).expect("circles overlap");
        let backward = b.test(&a).expect("circles overlap");
        assert_eq!(forward.overlap, -backward.overlap);
        assert_eq!(forward.magnitude, 2.0);
    }

    #[test]
    fn test_concentric_boxes_negate_in_both_orders() {
        let collider = ColliderComponent::new(CollisionShape::rect(2.0, 2.0, 0.0).unwrap());
        let keys = entities(2);
        let a = placed_as(keys[0], &collider, 5.0, 0.0);
        let b = placed_as(keys[1], &collider, 5.0, 0.0);

        let forward = a.test(&b).expect("boxes overlap");
        let backward = b.test(&a).expect("boxes overlap");
        assert_eq!(forward.overlap, -backward.overlap);
        assert_eq!(forward.self_in_other, backward.other_in_self);
    }

    #[test]
    fn test_same_entity_never_collides() {
        let collider = ColliderComponent::new(CollisionShape::circle(1.0).unwrap());
        let key = entities(1)[0];
        let a = placed_as(key, &collider, 0.0, 0.0);
        let b = placed_as(key, &collider, 0.5, 0.0);

        assert!(a.test(&b).is_none());
    }

    #[test]
    fn test_world_shape_follows_center() {
        let collider = ColliderComponent::new(CollisionShape::circle(2.0).unwrap());
        match placed(&collider, 4.0, -1.0).world_shape() {
            WorldSpaceShape::Circle(circle) => {
                assert_eq!(circle.center, Vec2::new(4.0, -1.0));
                assert_eq!(circle.radius, 2.0);
            }
            WorldSpaceShape::Polygon(_) => panic!("expected a circle"),
        }
    }

    #[test]
    fn test_segment_against_circle_is_false() {
        let collider = ColliderComponent::new(CollisionShape::circle(2.0).unwrap());
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));
        assert!(!placed(&collider, 0.0, 0.0).segment_intersects(&segment));
    }

    #[test]
    fn test_segment_against_inactive_polygon_is_false() {
        let collider = ColliderComponent::new(CollisionShape::rect(2.0, 2.0, 0.0).unwrap());
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0));
        assert!(placed(&collider, 0.0, 0.0).segment_intersects(&segment));

        let inactive = collider.inactive();
        assert!(!placed(&inactive, 0.0, 0.0).segment_intersects(&segment));
    }
}

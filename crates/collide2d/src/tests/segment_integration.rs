//! Integration tests for segment queries against colliders

use crate::config::CollisionConfig;
use crate::ecs::components::TransformComponent;
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec2;
use crate::physics::collision::{CollisionError, CollisionShape, EdgeClosure, Segment};

fn spawn_box(world: &mut World, x: f64, y: f64) -> Entity {
    let entity = world.create_entity();
    world
        .add_transform(entity, TransformComponent::from_position(Vec2::new(x, y)))
        .unwrap();
    world
        .attach_collider(entity, CollisionShape::rect(2.0, 2.0, 0.0).unwrap())
        .unwrap();
    entity
}

fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
    Segment::new(Vec2::new(x0, y0), Vec2::new(x1, y1))
}

#[test]
fn test_segment_through_box() {
    let mut world = World::new();
    let target = spawn_box(&mut world, 0.0, 0.0);

    assert_eq!(world.segment_intersects(&segment(-5.0, 0.0, 5.0, 0.0), target), Ok(true));
    assert_eq!(world.segment_intersects(&segment(-5.0, 5.0, 5.0, 5.0), target), Ok(false));
}

#[test]
fn test_closing_edge_policy() {
    // Enters through the left side only, which is the closing edge of a box
    let probe = segment(-5.0, 0.0, 0.0, 0.0);

    let mut open = World::new();
    let target = spawn_box(&mut open, 0.0, 0.0);
    assert_eq!(open.segment_intersects(&probe, target), Ok(false));

    let mut closed =
        World::with_config(CollisionConfig::default().with_segment_edges(EdgeClosure::Closed));
    let target = spawn_box(&mut closed, 0.0, 0.0);
    assert_eq!(closed.segment_intersects(&probe, target), Ok(true));
}

#[test]
fn test_segment_follows_world_center() {
    let mut world = World::new();
    let target = spawn_box(&mut world, 20.0, 0.0);
    let probe = segment(15.0, 0.0, 25.0, 0.0);

    assert_eq!(world.segment_intersects(&probe, target), Ok(true));

    world.translate(target, Vec2::new(0.0, 10.0)).unwrap();
    assert_eq!(world.segment_intersects(&probe, target), Ok(false));
}

#[test]
fn test_segment_against_inactive_or_circle() {
    let mut world = World::new();
    let target = spawn_box(&mut world, 0.0, 0.0);
    let probe = segment(-5.0, 0.0, 5.0, 0.0);

    world.set_collider_active(target, false).unwrap();
    assert_eq!(world.segment_intersects(&probe, target), Ok(false));

    let round = world.create_entity();
    world.add_transform(round, TransformComponent::identity()).unwrap();
    world.attach_collider(round, CollisionShape::circle(2.0).unwrap()).unwrap();
    assert_eq!(world.segment_intersects(&probe, round), Ok(false));
}

#[test]
fn test_segment_touching_corner() {
    let mut world = World::new();
    let target = spawn_box(&mut world, 0.0, 0.0);

    assert_eq!(world.segment_intersects(&segment(1.0, 1.0, 4.0, 4.0), target), Ok(true));
}

#[test]
fn test_segment_needs_transform() {
    let mut world = World::new();
    let orphan = world.create_entity();
    world
        .attach_collider(orphan, CollisionShape::rect(2.0, 2.0, 0.0).unwrap())
        .unwrap();

    assert_eq!(
        world.segment_intersects(&segment(-5.0, 0.0, 5.0, 0.0), orphan),
        Err(CollisionError::MissingComponent {
            entity: orphan,
            component: "TransformComponent",
        })
    );
}

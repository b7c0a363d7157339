//! Integration tests for parent chains and world-space conversion

use crate::ecs::components::TransformComponent;
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec2;
use approx::assert_relative_eq;

/// Builds a straight chain `depth` transforms deep; returns root first
fn build_chain(world: &mut World, depth: usize) -> Vec<Entity> {
    let mut chain: Vec<Entity> = Vec::with_capacity(depth);
    for i in 0..depth {
        let entity = world.create_entity();
        let offset = Vec2::new(i as f64 + 1.0, -(i as f64) * 0.5);
        let mut transform = TransformComponent::from_position(offset);
        if let Some(&parent) = chain.last() {
            transform = transform.with_parent(parent);
        }
        world.add_transform(entity, transform).unwrap();
        chain.push(entity);
    }
    chain
}

#[test]
fn test_world_center_round_trip_at_depth() {
    for depth in [1, 2, 5, 32] {
        let mut world = World::new();
        let chain = build_chain(&mut world, depth);
        let leaf = *chain.last().unwrap();

        let target = Vec2::new(-3.25, 8.5);
        world.set_world_center(leaf, target).unwrap();
        assert_relative_eq!(world.world_center(leaf).unwrap(), target, epsilon = 1e-9);
    }
}

#[test]
fn test_leaf_world_center_is_sum_of_locals() {
    let mut world = World::new();
    let chain = build_chain(&mut world, 4);

    // Offsets (1,0), (2,-0.5), (3,-1), (4,-1.5)
    assert_relative_eq!(world.world_center(chain[3]).unwrap(), Vec2::new(10.0, -3.0));
}

#[test]
fn test_moving_parent_carries_children() {
    let mut world = World::new();
    let chain = build_chain(&mut world, 3);
    let before = world.world_center(chain[2]).unwrap();

    world.translate(chain[0], Vec2::new(5.0, 5.0)).unwrap();

    assert_relative_eq!(
        world.world_center(chain[2]).unwrap(),
        before + Vec2::new(5.0, 5.0)
    );
    // Child locals are untouched
    assert_relative_eq!(
        world.transform(chain[2]).unwrap().local_center,
        Vec2::new(3.0, -1.0)
    );
}

#[test]
fn test_update_with_moving_parent_and_child() {
    let mut world = World::new();
    let parent = world.create_entity();
    world
        .add_transform(
            parent,
            TransformComponent::identity().with_velocity(Vec2::new(1.0, 0.0)),
        )
        .unwrap();
    let child = world.create_entity();
    world
        .add_transform(
            child,
            TransformComponent::from_position(Vec2::new(0.0, 1.0))
                .with_velocity(Vec2::new(0.0, 2.0))
                .with_parent(parent),
        )
        .unwrap();

    world.update(1.0);

    assert_relative_eq!(world.world_center(parent).unwrap(), Vec2::new(1.0, 0.0));
    assert_relative_eq!(world.world_center(child).unwrap(), Vec2::new(1.0, 3.0));
}

#[test]
fn test_frozen_child_still_follows_parent() {
    let mut world = World::new();
    let parent = world.create_entity();
    world
        .add_transform(
            parent,
            TransformComponent::identity().with_velocity(Vec2::new(0.0, -4.0)),
        )
        .unwrap();
    let child = world.create_entity();
    world
        .add_transform(
            child,
            TransformComponent::from_position(Vec2::new(2.0, 0.0))
                .with_velocity(Vec2::new(100.0, 0.0))
                .with_parent(parent)
                .frozen(),
        )
        .unwrap();

    world.update(0.5);

    assert_relative_eq!(world.world_center(child).unwrap(), Vec2::new(2.0, -2.0));
}

#[test]
fn test_reparent_to_root_keeps_local_center() {
    let mut world = World::new();
    let chain = build_chain(&mut world, 2);

    world.set_parent(chain[1], None).unwrap();

    assert_relative_eq!(world.world_center(chain[1]).unwrap(), Vec2::new(2.0, -0.5));
}

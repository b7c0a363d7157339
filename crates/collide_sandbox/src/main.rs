//! Collision sandbox
//!
//! Scatters rocks around a ship, steps the world for a few seconds and logs
//! every contact and ray hit. Pass a `.toml` or `.ron` collision config as the
//! first argument to override the defaults.

use collide2d::foundation::math::rotate;
use collide2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ROCK_COUNT: usize = 24;
const FIELD_HALF_EXTENT: f64 = 20.0;
const STEPS: usize = 180;
const DELTA_TIME: f64 = 1.0 / 60.0;
const RAY_LENGTH: f64 = 30.0;
const RAY_INTERVAL: usize = 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting collision sandbox");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading collision config from {path}");
            CollisionConfig::load_from_file(&path)?
        }
        None => CollisionConfig::default(),
    };
    log::info!("Collision config: {config:?}");

    let mut world = World::with_config(config);
    let ship = spawn_ship(&mut world)?;
    spawn_rocks(&mut world, &mut StdRng::seed_from_u64(7))?;

    let mut total_contacts = 0;
    for step in 0..STEPS {
        world.update(DELTA_TIME);

        let contacts = contact_pass(&world)?;
        total_contacts += contacts;

        if step % RAY_INTERVAL == 0 {
            ray_pass(&world, ship)?;
        }
    }

    let mut visualizer = CollisionDebugVisualizer::new();
    visualizer.draw_world(&world);

    log::info!(
        "Finished {STEPS} steps: {total_contacts} contacts, {} debug shapes",
        visualizer.shapes().len()
    );
    Ok(())
}

/// Ship hull with a turret attached as a child
fn spawn_ship(world: &mut World) -> Result<Entity, Box<dyn std::error::Error>> {
    let ship = world.create_entity();
    world.add_transform(
        ship,
        TransformComponent::identity().with_velocity(Vec2::new(2.0, 0.5)),
    )?;
    world.attach_collider(
        ship,
        CollisionShape::polygon(vec![
            Vec2::new(1.5, 0.0),
            Vec2::new(-1.0, 0.8),
            Vec2::new(-1.0, -0.8),
        ])?,
    )?;

    let turret = world.create_entity();
    world.add_transform(
        turret,
        TransformComponent::from_position(Vec2::new(-0.4, 0.0)).with_parent(ship),
    )?;
    world.attach_collider(turret, CollisionShape::circle(0.3)?)?;

    Ok(ship)
}

fn spawn_rocks(world: &mut World, rng: &mut StdRng) -> Result<(), Box<dyn std::error::Error>> {
    for _ in 0..ROCK_COUNT {
        let position = Vec2::new(
            rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
            rng.gen_range(-FIELD_HALF_EXTENT..FIELD_HALF_EXTENT),
        );
        let velocity = Vec2::new(rng.gen_range(-3.0..3.0), rng.gen_range(-3.0..3.0));

        let shape = if rng.gen_bool(0.5) {
            CollisionShape::circle(rng.gen_range(0.5..2.0))?
        } else {
            CollisionShape::rect(
                rng.gen_range(1.0..3.0),
                rng.gen_range(1.0..3.0),
                rng.gen_range(0.0..std::f64::consts::TAU),
            )?
        };

        let rock = world.create_entity();
        world.add_transform(
            rock,
            TransformComponent::from_position(position).with_velocity(velocity),
        )?;
        world.attach_collider(rock, shape)?;
    }
    Ok(())
}

/// Naive all-pairs pass with a bounding-circle reject; returns the contact count
fn contact_pass(world: &World) -> Result<usize, CollisionError> {
    let candidates: Vec<(Entity, f64)> = world
        .colliders()
        .map(|(entity, collider)| (entity, collider.shape.local_bounding_radius()))
        .collect();

    let mut contacts = 0;
    for (i, &(a, radius_a)) in candidates.iter().enumerate() {
        for &(b, radius_b) in &candidates[i + 1..] {
            let (Some(center_a), Some(center_b)) = (world.world_center(a), world.world_center(b))
            else {
                continue;
            };
            if (center_b - center_a).norm() >= radius_a + radius_b {
                continue;
            }

            if let Some(response) = world.test(a, b)? {
                contacts += 1;
                log::debug!(
                    "Contact {a:?} / {b:?}: depth {:.3} along ({:.3}, {:.3})",
                    response.magnitude,
                    response.normal.x,
                    response.normal.y
                );
            }
        }
    }
    Ok(contacts)
}

/// Cast a ray along the ship's heading and log the polygons it crosses
fn ray_pass(world: &World, ship: Entity) -> Result<(), CollisionError> {
    let (Some(origin), Some(heading)) = (world.world_center(ship), world.world_angle(ship)) else {
        return Ok(());
    };
    let ray = Segment::new(origin, origin + rotate(Vec2::x(), heading) * RAY_LENGTH);

    for (entity, _) in world.colliders() {
        if entity != ship && world.segment_intersects(&ray, entity)? {
            log::info!(
                "Ray from ({:.1}, {:.1}) hits {entity:?}",
                origin.x,
                origin.y
            );
        }
    }
    Ok(())
}

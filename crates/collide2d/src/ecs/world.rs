//! ECS World implementation
//!
//! The world is an arena: entities are generational `slotmap` keys and
//! components live in secondary maps keyed by them. Parent links are plain
//! keys, so a destroyed parent simply stops resolving and its children act
//! as roots. Links that would form a cycle are rejected when they are made.

use std::iter;

use slotmap::{SecondaryMap, SlotMap};

use super::components::{ColliderComponent, PlacedCollider, TransformComponent};
use super::{Component, Entity};
use crate::config::CollisionConfig;
use crate::foundation::math::Vec2;
use crate::physics::collision::{CollisionError, CollisionResponse, NarrowPhase, Segment};

/// Scene graph errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The entity key does not refer to a live entity
    #[error("Unknown entity: {0:?}")]
    UnknownEntity(Entity),

    /// The entity has no transform
    #[error("Entity {0:?} has no transform")]
    MissingTransform(Entity),

    /// Linking `child` under `parent` would make `child` its own ancestor
    #[error("Parenting {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Entity being reparented
        child: Entity,
        /// Requested parent
        parent: Entity,
    },
}

/// ECS World containing all entities and components
#[derive(Debug)]
pub struct World {
    entities: SlotMap<Entity, ()>,
    transforms: SecondaryMap<Entity, TransformComponent>,
    colliders: SecondaryMap<Entity, ColliderComponent>,
    registered: Vec<Entity>,
    config: CollisionConfig,
    narrow_phase: NarrowPhase,
}

impl World {
    /// Create a new world with the default collision configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create a new world with a specific collision configuration
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            entities: SlotMap::with_key(),
            transforms: SecondaryMap::new(),
            colliders: SecondaryMap::new(),
            registered: Vec::new(),
            narrow_phase: NarrowPhase::new(&config),
            config,
        }
    }

    /// Active collision configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Replace the collision configuration
    pub fn set_config(&mut self, config: CollisionConfig) {
        self.narrow_phase = NarrowPhase::new(&config);
        self.config = config;
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.insert(());
        log::debug!("Created entity {entity:?}");
        entity
    }

    /// Destroy an entity together with its transform and collider.
    ///
    /// Children keep their parent key; it no longer resolves, so they behave
    /// as roots from now on. Returns `false` if the entity was already gone.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }

        self.transforms.remove(entity);
        if self.colliders.remove(entity).is_some() {
            self.registered.retain(|registered| *registered != entity);
        }

        log::debug!("Destroyed entity {entity:?}");
        true
    }

    /// Whether the key refers to a live entity
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    /// Iterate all live entities
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// Attach (or replace) an entity's transform.
    ///
    /// The transform's parent link is validated like [`World::set_parent`].
    pub fn add_transform(
        &mut self,
        entity: Entity,
        transform: TransformComponent,
    ) -> Result<(), SceneError> {
        if !self.contains(entity) {
            return Err(SceneError::UnknownEntity(entity));
        }
        if let Some(parent) = transform.parent {
            self.validate_link(entity, parent)?;
        }

        self.transforms.insert(entity, transform);
        Ok(())
    }

    /// Link `child` under `parent`, or detach it with `None`.
    ///
    /// The local center is kept as is, so the child's world position changes
    /// with the new chain.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> Result<(), SceneError> {
        if !self.has_transform(child) {
            return Err(self.transform_error(child));
        }
        if let Some(parent) = parent {
            self.validate_link(child, parent)?;
        }

        if let Some(transform) = self.transforms.get_mut(child) {
            transform.parent = parent;
        }
        log::debug!("Reparented {child:?} under {parent:?}");
        Ok(())
    }

    /// Get an entity's transform
    pub fn transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.transforms.get(entity)
    }

    /// Get an entity's transform mutably.
    ///
    /// Reparent through [`World::set_parent`]; writing `parent` here skips
    /// cycle validation.
    pub fn transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.transforms.get_mut(entity)
    }

    /// Whether the entity has a transform
    pub fn has_transform(&self, entity: Entity) -> bool {
        self.transforms.contains_key(entity)
    }

    /// World-space center: the local center plus every ancestor's local center
    pub fn world_center(&self, entity: Entity) -> Option<Vec2> {
        self.transform(entity)?;
        Some(self.chain(entity).map(|transform| transform.local_center).sum())
    }

    /// Sum of angles along the parent chain.
    ///
    /// Only meaningful for rendering; collision geometry uses the shape's own
    /// angle.
    pub fn world_angle(&self, entity: Entity) -> Option<f64> {
        self.transform(entity)?;
        Some(self.chain(entity).map(|transform| transform.angle).sum())
    }

    /// Move an entity so its world center lands on `position`
    pub fn set_world_center(&mut self, entity: Entity, position: Vec2) -> Result<(), SceneError> {
        let parent_center = self
            .transform(entity)
            .ok_or_else(|| self.transform_error(entity))?
            .parent
            .and_then(|parent| self.world_center(parent))
            .unwrap_or_else(Vec2::zeros);

        if let Some(transform) = self.transforms.get_mut(entity) {
            transform.local_center = position - parent_center;
        }
        Ok(())
    }

    /// Shift an entity's world center by `offset`
    pub fn translate(&mut self, entity: Entity, offset: Vec2) -> Result<(), SceneError> {
        let center = self
            .world_center(entity)
            .ok_or_else(|| self.transform_error(entity))?;
        self.set_world_center(entity, center + offset)
    }

    /// Advance one transform by its velocity; frozen transforms stay put
    pub fn update_transform(&mut self, entity: Entity, delta_time: f64) -> Result<(), SceneError> {
        let displacement = self
            .transform(entity)
            .ok_or_else(|| self.transform_error(entity))?
            .displacement(delta_time);

        if displacement == Vec2::zeros() {
            return Ok(());
        }
        self.translate(entity, displacement)
    }

    /// Advance every transform by its velocity
    pub fn update(&mut self, delta_time: f64) {
        let entities: Vec<Entity> = self.transforms.keys().collect();
        for entity in entities {
            if let Err(error) = self.update_transform(entity, delta_time) {
                log::warn!("Skipped transform update: {error}");
            }
        }
    }

    // ------------------------------------------------------------------
    // Colliders
    // ------------------------------------------------------------------

    /// Attach a collider to an entity and register it for enumeration.
    ///
    /// Replacing an existing collider keeps its registration slot.
    pub fn attach_collider(
        &mut self,
        entity: Entity,
        collider: impl Into<ColliderComponent>,
    ) -> Result<(), CollisionError> {
        if !self.contains(entity) {
            return Err(CollisionError::UnknownEntity(entity));
        }

        let collider = collider.into();
        let kind = collider.kind();
        if self.colliders.insert(entity, collider).is_none() {
            self.registered.push(entity);
        }

        log::debug!("Registered {kind:?} collider on {entity:?}");
        Ok(())
    }

    /// Remove and unregister an entity's collider
    pub fn detach_collider(&mut self, entity: Entity) -> Option<ColliderComponent> {
        let collider = self.colliders.remove(entity)?;
        self.registered.retain(|registered| *registered != entity);
        Some(collider)
    }

    /// Get an entity's collider
    pub fn collider(&self, entity: Entity) -> Option<&ColliderComponent> {
        self.colliders.get(entity)
    }

    /// Get an entity's collider mutably
    pub fn collider_mut(&mut self, entity: Entity) -> Option<&mut ColliderComponent> {
        self.colliders.get_mut(entity)
    }

    /// Enable or disable narrow-phase for a collider without unregistering it
    pub fn set_collider_active(&mut self, entity: Entity, active: bool) -> Result<(), CollisionError> {
        let collider = self
            .colliders
            .get_mut(entity)
            .ok_or(CollisionError::MissingComponent {
                entity,
                component: ColliderComponent::NAME,
            })?;
        collider.active = active;
        Ok(())
    }

    /// Registered colliders in registration order
    pub fn colliders(&self) -> impl Iterator<Item = (Entity, &ColliderComponent)> + '_ {
        self.registered
            .iter()
            .filter_map(|entity| self.colliders.get(*entity).map(|collider| (*entity, collider)))
    }

    /// Bind an entity's collider to its current world center
    pub fn placed_collider(&self, entity: Entity) -> Result<PlacedCollider<'_>, CollisionError> {
        if !self.contains(entity) {
            return Err(CollisionError::UnknownEntity(entity));
        }

        let collider = self.collider(entity).ok_or(CollisionError::MissingComponent {
            entity,
            component: ColliderComponent::NAME,
        })?;
        let center = self
            .world_center(entity)
            .ok_or(CollisionError::MissingComponent {
                entity,
                component: TransformComponent::NAME,
            })?;

        Ok(PlacedCollider::new(
            entity,
            collider,
            center,
            self.narrow_phase,
            self.config.segment_edges,
        ))
    }

    /// Narrow-phase test between two entities' colliders.
    ///
    /// The response moves `a` out of `b`. Both entities must have a collider
    /// and a transform, even when a collider is inactive. An entity tested
    /// against itself never collides.
    pub fn test(&self, a: Entity, b: Entity) -> Result<Option<CollisionResponse>, CollisionError> {
        let first = self.placed_collider(a)?;
        let second = self.placed_collider(b)?;
        let response = first.test(&second);

        if let Some(response) = &response {
            log::trace!(
                "{a:?} vs {b:?}: overlap ({:.4}, {:.4})",
                response.overlap.x,
                response.overlap.y
            );
        }
        Ok(response)
    }

    /// Whether a world-space segment crosses an entity's polygon edges
    pub fn segment_intersects(&self, segment: &Segment, entity: Entity) -> Result<bool, CollisionError> {
        Ok(self.placed_collider(entity)?.segment_intersects(segment))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Transforms from `entity` up to its root.
    ///
    /// Stops at a parent that is gone or has no transform. The hop count is
    /// bounded so a cycle written through `transform_mut` cannot hang.
    fn chain(&self, entity: Entity) -> impl Iterator<Item = &TransformComponent> + '_ {
        iter::successors(self.transforms.get(entity), move |transform| {
            transform.parent.and_then(|parent| self.transforms.get(parent))
        })
        .take(self.transforms.len())
    }

    fn validate_link(&self, child: Entity, parent: Entity) -> Result<(), SceneError> {
        if !self.contains(parent) {
            return Err(SceneError::UnknownEntity(parent));
        }

        let mut ancestors = iter::successors(Some(parent), |current| {
            self.transforms.get(*current).and_then(|transform| transform.parent)
        })
        .take(self.transforms.len() + 1);

        if ancestors.any(|ancestor| ancestor == child) {
            log::warn!("Rejected parent link {child:?} -> {parent:?}: cycle");
            return Err(SceneError::CycleDetected { child, parent });
        }
        Ok(())
    }

    fn transform_error(&self, entity: Entity) -> SceneError {
        if self.contains(entity) {
            SceneError::MissingTransform(entity)
        } else {
            SceneError::UnknownEntity(entity)
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

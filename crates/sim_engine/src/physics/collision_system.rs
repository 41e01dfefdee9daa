//! Physics world: collider ownership, detection and penetration resolution
//!
//! Broad phase is exhaustive: every unordered pair of volumes is tested once
//! per tick, filtered by the [`LayerMatrix`]. One call to
//! [`PhysicsWorld::update`] runs these phases strictly in order:
//!
//! 1. mirror each volume's position from its owning entity
//! 2. pairwise layer filtering and narrow-phase tests
//! 3. collision callbacks for both sides of every contact
//! 4. resolution, skipped when either side is a trigger
//!
//! Only sphere/sphere contacts are pushed apart. Contacts involving a box
//! are reported but never separated.

use crate::config::PhysicsConfig;
use crate::ecs::{Entity, EntityResolver};
use crate::foundation::math::{Vec3, Vec3Ext};
use crate::physics::collision::{BoundingSphere, CollisionVolume, ShapeKind, ShapeParams};
use crate::physics::collision_layers::LayerMatrix;
use log::{debug, trace, warn};
use slotmap::SlotMap;
use std::collections::{HashMap, HashSet};

slotmap::new_key_type! {
    /// Stable handle to a collider owned by a [`PhysicsWorld`]
    pub struct ColliderHandle;
}

/// Callback fired with `(self_entity, other_entity)` for each contact
pub type CollisionCallback = Box<dyn FnMut(Entity, Entity)>;

/// Collision pair representing two entities that are colliding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Entity with the smaller ID
    pub entity_a: Entity,
    /// Entity with the larger ID
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller entity ID first for consistency)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a.id() < entity_b.id() {
            Self { entity_a, entity_b }
        } else {
            Self { entity_a: entity_b, entity_b: entity_a }
        }
    }
}

/// One contact detected during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// First collider (earlier in insertion order)
    pub collider_a: ColliderHandle,
    /// Second collider
    pub collider_b: ColliderHandle,
    /// Owner of `collider_a`
    pub entity_a: Entity,
    /// Owner of `collider_b`
    pub entity_b: Entity,
    /// Whether either side is a trigger
    pub is_trigger: bool,
    /// Whether the entities were pushed apart this tick
    pub resolved: bool,
}

/// Owns the active collision volumes, the layer matrix and callbacks
///
/// Single-threaded: `update` mutates volumes and invokes callbacks without
/// any locking and must run at most once per frame.
pub struct PhysicsWorld {
    colliders: SlotMap<ColliderHandle, CollisionVolume>,

    /// Insertion order; drives pairwise iteration
    order: Vec<ColliderHandle>,

    layers: LayerMatrix,

    callbacks: HashMap<Entity, CollisionCallback>,
    
    /// Collision pairs from the current frame
    current_pairs: HashSet<CollisionPair>,
    
    /// Collision pairs from the previous frame
    previous_pairs: HashSet<CollisionPair>,
}

impl PhysicsWorld {
    /// Create an empty world with an empty layer matrix
    pub fn new() -> Self {
        Self {
            colliders: SlotMap::with_key(),
            order: Vec::new(),
            layers: LayerMatrix::new(),
            callbacks: HashMap::new(),
            current_pairs: HashSet::new(),
            previous_pairs: HashSet::new(),
        }
    }

    /// Create a world and enable the configured layer pairs
    pub fn from_config(config: &PhysicsConfig) -> Self {
        let mut world = Self::new();
        world.layers.enable_all(&config.layer_pairs);
        world
    }
    
    /// Insert a volume into the active set
    ///
    /// No duplicate detection: inserting a copy of an existing volume yields
    /// a second collider and a second set of pairwise tests.
    pub fn add_collider(&mut self, volume: CollisionVolume) -> ColliderHandle {
        let handle = self.colliders.insert(volume);
        self.order.push(handle);
        handle
    }

    /// Attach a collider to `entity` from a shape kind name
    ///
    /// Unknown kinds are logged and yield `None`; the simulation keeps running.
    pub fn attach_collider<R: EntityResolver + ?Sized>(
        &mut self,
        resolver: &R,
        entity: Entity,
        kind: &str,
        params: &ShapeParams,
    ) -> Option<ColliderHandle> {
        let kind = match kind.parse::<ShapeKind>() {
            Ok(kind) => kind,
            Err(err) => {
                warn!("{err}; no collider attached to {entity}");
                return None;
            }
        };

        let position = resolver.resolve(entity).map_or_else(
            || {
                debug!("{entity} not resolvable when attaching collider, using origin");
                Vec3::zeros()
            },
            |p| p.position(),
        );

        Some(self.add_collider(CollisionVolume::from_kind(entity, position, kind, params)))
    }
    
    /// Remove a collider; no-op if the handle is not present
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Option<CollisionVolume> {
        let volume = self.colliders.remove(handle)?;
        self.order.retain(|&h| h != handle);
        Some(volume)
    }

    /// Remove every collider owned by `entity`, returning how many were removed
    pub fn remove_colliders_for(&mut self, entity: Entity) -> usize {
        let before = self.order.len();
        let colliders = &mut self.colliders;
        self.order.retain(|&h| {
            let owned = colliders.get(h).is_some_and(|v| v.entity() == entity);
            if owned {
                colliders.remove(h);
            }
            !owned
        });
        before - self.order.len()
    }

    /// Enable or disable collisions between two layers
    pub fn set_layer_collision(&mut self, layer_a: u32, layer_b: u32, enabled: bool) {
        self.layers.set(layer_a, layer_b, enabled);
    }

    /// Whether volumes on these two layers are tested against each other
    pub fn should_check(&self, layer_a: u32, layer_b: u32) -> bool {
        self.layers.should_check(layer_a, layer_b)
    }

    /// Layer matrix
    pub fn layers(&self) -> &LayerMatrix {
        &self.layers
    }

    /// Register the collision callback for `entity`, replacing any previous one
    pub fn register_collision_callback<F>(&mut self, entity: Entity, callback: F)
    where
        F: FnMut(Entity, Entity) + 'static,
    {
        self.callbacks.insert(entity, Box::new(callback));
    }

    /// Drop the callback for `entity`, if any
    pub fn unregister_collision_callback(&mut self, entity: Entity) -> bool {
        self.callbacks.remove(&entity).is_some()
    }
    
    /// Advance physics by one tick
    ///
    /// `delta_time` is accepted for API symmetry with the frame loop; the
    /// positional push is instantaneous and does not scale with it.
    pub fn update<R: EntityResolver + ?Sized>(
        &mut self,
        resolver: &mut R,
        delta_time: f32,
    ) -> Vec<CollisionEvent> {
        std::mem::swap(&mut self.current_pairs, &mut self.previous_pairs);
        self.current_pairs.clear();

        self.sync_positions(resolver);
        let mut events = self.detect();
        self.fire_callbacks(&events);

        for event in &mut events {
            if event.is_trigger {
                continue;
            }
            event.resolved = self.resolve(resolver, event);
        }

        trace!(
            "physics tick dt={delta_time:.4}: {} colliders, {} contacts",
            self.order.len(),
            events.len()
        );
        events
    }

    fn sync_positions<R: EntityResolver + ?Sized>(&mut self, resolver: &R) {
        for &handle in &self.order {
            let Some(volume) = self.colliders.get_mut(handle) else { continue };
            match resolver.resolve(volume.entity()) {
                Some(owner) => volume.set_position(owner.position()),
                None => debug!("{} no longer resolvable, collider keeps last position", volume.entity()),
            }
        }
    }

    fn detect(&mut self) -> Vec<CollisionEvent> {
        let mut events = Vec::new();

        for (i, &handle_a) in self.order.iter().enumerate() {
            let a = &self.colliders[handle_a];
            for &handle_b in &self.order[i + 1..] {
                let b = &self.colliders[handle_b];

                if !self.layers.should_check(a.layer, b.layer) {
                    continue;
                }

                if a.intersects(b) {
                    self.current_pairs.insert(CollisionPair::new(a.entity(), b.entity()));
                    events.push(CollisionEvent {
                        collider_a: handle_a,
                        collider_b: handle_b,
                        entity_a: a.entity(),
                        entity_b: b.entity(),
                        is_trigger: a.is_trigger || b.is_trigger,
                        resolved: false,
                    });
                }
            }
        }

        events
    }

    fn fire_callbacks(&mut self, events: &[CollisionEvent]) {
        for event in events {
            if let Some(callback) = self.callbacks.get_mut(&event.entity_a) {
                callback(event.entity_a, event.entity_b);
            }
            if let Some(callback) = self.callbacks.get_mut(&event.entity_b) {
                callback(event.entity_b, event.entity_a);
            }
        }
    }

    /// Push two overlapping spheres apart, half the overlap each
    fn resolve<R: EntityResolver + ?Sized>(&self, resolver: &mut R, event: &CollisionEvent) -> bool {
        let a = &self.colliders[event.collider_a];
        let b = &self.colliders[event.collider_b];

        let (Some(radius_a), Some(radius_b)) = (a.radius(), b.radius()) else {
            trace!(
                "contact {} / {} involves a box, detected only",
                event.entity_a,
                event.entity_b
            );
            return false;
        };

        let Some(position_a) = resolver.resolve(event.entity_a).map(|p| p.position()) else {
            return false;
        };
        let Some(position_b) = resolver.resolve(event.entity_b).map(|p| p.position()) else {
            return false;
        };

        let overlap = BoundingSphere::new(position_a, radius_a)
            .penetration_depth(&BoundingSphere::new(position_b, radius_b));
        if overlap <= 0.0 {
            return false;
        }

        let mut direction = position_a - position_b;
        if direction.magnitude() == 0.0 {
            direction = Vec3::x();
        }
        let push = direction.safe_normalize() * (overlap * 0.5);

        if let Some(owner) = resolver.resolve_mut(event.entity_a) {
            owner.set_position(position_a + push);
        }
        if let Some(owner) = resolver.resolve_mut(event.entity_b) {
            owner.set_position(position_b - push);
        }
        true
    }
    
    /// Get entities that entered collision this frame
    pub fn collisions_entered(&self) -> Vec<CollisionPair> {
        self.current_pairs
            .difference(&self.previous_pairs)
            .copied()
            .collect()
    }
    
    /// Get entities that exited collision this frame
    pub fn collisions_exited(&self) -> Vec<CollisionPair> {
        self.previous_pairs
            .difference(&self.current_pairs)
            .copied()
            .collect()
    }
    
    /// Get all current collision pairs
    pub fn current_collisions(&self) -> &HashSet<CollisionPair> {
        &self.current_pairs
    }
    
    /// Get a collider by handle
    pub fn collider(&self, handle: ColliderHandle) -> Option<&CollisionVolume> {
        self.colliders.get(handle)
    }

    /// Get a mutable collider by handle
    pub fn collider_mut(&mut self, handle: ColliderHandle) -> Option<&mut CollisionVolume> {
        self.colliders.get_mut(handle)
    }

    /// Iterate colliders in insertion order
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderHandle, &CollisionVolume)> {
        self.order.iter().map(|&h| (h, &self.colliders[h]))
    }
    
    /// Check if a collider is registered
    pub fn has_collider(&self, handle: ColliderHandle) -> bool {
        self.colliders.contains_key(handle)
    }
    
    /// Get the number of registered colliders
    pub fn collider_count(&self) -> usize {
        self.order.len()
    }
    
    /// Clear all colliders, callbacks and contact history; the layer matrix is kept
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.order.clear();
        self.callbacks.clear();
        self.current_pairs.clear();
        self.previous_pairs.clear();
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

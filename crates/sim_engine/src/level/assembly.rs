//! Level assembly
//!
//! Materializes generated rooms and corridors as entities with static box
//! colliders, then decorates rooms according to their type.

use super::room::{Corridor, Room, RoomType};
use crate::ecs::{Entity, EntityResolver, HasProperties, PropertyValue, World};
use crate::foundation::math::Vec3;
use crate::physics::{CollisionLayers, PhysicsWorld, ShapeParams};
use log::debug;
use rand::Rng;
use std::f32::consts::TAU;

/// Creates entities on behalf of the assembler
pub trait EntityFactory: EntityResolver {
    /// Spawn a named object of the given kind at `position`
    fn spawn_object(&mut self, name: &str, kind: &str, position: Vec3) -> Entity;

    /// Attach a property to an existing entity
    fn tag(&mut self, entity: Entity, key: &str, value: PropertyValue);
}

impl EntityFactory for World {
    fn spawn_object(&mut self, name: &str, kind: &str, position: Vec3) -> Entity {
        self.create_object(name, kind, position)
    }

    fn tag(&mut self, entity: Entity, key: &str, value: PropertyValue) {
        if let Some(object) = self.get_mut(entity) {
            object.set_property(key, value);
        }
    }
}

/// Entities created for one level
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledLevel {
    /// One entity per room, in room index order
    pub rooms: Vec<Entity>,
    /// One entity per corridor segment
    pub corridors: Vec<Entity>,
    /// Chests, enemies, bosses, shopkeepers and items
    pub decorations: Vec<Entity>,
}

/// Display color for a room type
pub fn room_color(room_type: &RoomType) -> (u8, u8, u8) {
    match room_type {
        RoomType::Treasure => (255, 215, 0),
        RoomType::Enemy => (200, 0, 0),
        RoomType::Boss => (128, 0, 128),
        RoomType::Shop => (0, 128, 128),
        RoomType::Default | RoomType::Custom(_) => (200, 200, 200),
    }
}

/// Collider shape request for a spawned object
enum Body {
    Sphere(f32),
    Cuboid(Vec3),
}

/// Turns rooms and corridors into entities and colliders
#[derive(Debug, Clone, Copy)]
pub struct LevelAssembler {
    /// Layer for room and corridor volumes
    pub static_layer: u32,
    /// Layer for enemies and bosses
    pub actor_layer: u32,
    /// Layer for chests, shopkeepers and items
    pub prop_layer: u32,
}

impl Default for LevelAssembler {
    fn default() -> Self {
        Self {
            static_layer: CollisionLayers::ENVIRONMENT,
            actor_layer: CollisionLayers::ENEMY,
            prop_layer: CollisionLayers::PICKUP,
        }
    }
}

impl LevelAssembler {
    /// Create an assembler with the default layers
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn entities and colliders for a generated level
    pub fn instantiate<F, R>(
        &self,
        rooms: &[Room],
        corridors: &[Corridor],
        factory: &mut F,
        physics: &mut PhysicsWorld,
        rng: &mut R,
    ) -> AssembledLevel
    where
        F: EntityFactory,
        R: Rng + ?Sized,
    {
        let mut level = AssembledLevel::default();

        for (i, room) in rooms.iter().enumerate() {
            let entity = self.place(
                factory,
                physics,
                &format!("room_{i}"),
                &format!("room_{}", room.room_type),
                room.center(),
                &Body::Cuboid(room.size()),
                self.static_layer,
                room_color(&room.room_type),
            );
            factory.tag(entity, "room_index", PropertyValue::Int(i as i64));
            factory.tag(entity, "room_type", PropertyValue::Text(room.room_type.to_string()));
            level.rooms.push(entity);

            self.decorate(i, room, factory, physics, rng, &mut level.decorations);
        }

        for (i, corridor) in corridors.iter().enumerate() {
            for (j, (start, end)) in corridor.segments().enumerate() {
                let direction = end - start;
                let size = Vec3::new(
                    corridor.width.max(direction.x.abs()),
                    corridor.height,
                    corridor.width.max(direction.z.abs()),
                );
                let entity = self.place(
                    factory,
                    physics,
                    &format!("corridor_{i}_{j}"),
                    "corridor",
                    (start + end) * 0.5,
                    &Body::Cuboid(size),
                    self.static_layer,
                    (100, 100, 100),
                );
                level.corridors.push(entity);
            }
        }

        debug!(
            "assembled level: {} rooms, {} corridor segments, {} decorations",
            level.rooms.len(),
            level.corridors.len(),
            level.decorations.len()
        );
        level
    }

    fn decorate<F, R>(
        &self,
        index: usize,
        room: &Room,
        factory: &mut F,
        physics: &mut PhysicsWorld,
        rng: &mut R,
        out: &mut Vec<Entity>,
    ) where
        F: EntityFactory,
        R: Rng + ?Sized,
    {
        let center = room.center();
        match room.room_type {
            RoomType::Treasure => {
                out.push(self.place(
                    factory,
                    physics,
                    &format!("chest_{index}"),
                    "treasure_chest",
                    center,
                    &Body::Cuboid(Vec3::new(1.0, 1.0, 1.0)),
                    self.prop_layer,
                    (255, 215, 0),
                ));
            }
            RoomType::Enemy => {
                let (min, max) = (room.min_bounds(), room.max_bounds());
                let count = rng.gen_range(2..=5);
                for k in 0..count {
                    let x = sample_inset(rng, min.x, max.x, center.x);
                    let z = sample_inset(rng, min.z, max.z, center.z);
                    out.push(self.place(
                        factory,
                        physics,
                        &format!("enemy_{index}_{k}"),
                        "enemy",
                        Vec3::new(x, center.y, z),
                        &Body::Sphere(0.5),
                        self.actor_layer,
                        (200, 0, 0),
                    ));
                }
            }
            RoomType::Boss => {
                let boss = self.place(
                    factory,
                    physics,
                    &format!("boss_{index}"),
                    "boss",
                    center,
                    &Body::Sphere(1.5),
                    self.actor_layer,
                    (128, 0, 128),
                );
                factory.tag(boss, "scale", PropertyValue::Float(2.0));
                out.push(boss);
            }
            RoomType::Shop => {
                out.push(self.place(
                    factory,
                    physics,
                    &format!("shopkeeper_{index}"),
                    "shopkeeper",
                    center,
                    &Body::Sphere(0.5),
                    self.prop_layer,
                    (0, 128, 128),
                ));

                let count = rng.gen_range(2..=4);
                for k in 0..count {
                    let angle = k as f32 / count as f32 * TAU;
                    let position = center + Vec3::new(angle.cos() * 2.0, 0.0, angle.sin() * 2.0);
                    out.push(self.place(
                        factory,
                        physics,
                        &format!("item_{index}_{k}"),
                        "shop_item",
                        position,
                        &Body::Cuboid(Vec3::new(0.5, 0.5, 0.5)),
                        self.prop_layer,
                        (0, 200, 200),
                    ));
                }
            }
            RoomType::Default | RoomType::Custom(_) => {}
        }
    }

    fn place<F: EntityFactory>(
        &self,
        factory: &mut F,
        physics: &mut PhysicsWorld,
        name: &str,
        kind: &str,
        position: Vec3,
        body: &Body,
        layer: u32,
        color: (u8, u8, u8),
    ) -> Entity {
        let entity = factory.spawn_object(name, kind, position);
        factory.tag(entity, "color", PropertyValue::Color(color.0, color.1, color.2));

        let (shape, params) = match body {
            Body::Sphere(radius) => ("sphere", ShapeParams::radius(*radius)),
            Body::Cuboid(size) => ("box", ShapeParams::size(*size)),
        };
        if let Some(handle) = physics.attach_collider(&*factory, entity, shape, &params) {
            if let Some(volume) = physics.collider_mut(handle) {
                volume.layer = layer;
            }
        }
        entity
    }
}

/// Uniform sample in `[lo + 1, hi - 1]`, or `fallback` if that range is empty
fn sample_inset<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32, fallback: f32) -> f32 {
    let (lo, hi) = (lo + 1.0, hi - 1.0);
    if lo <= hi {
        rng.gen_range(lo..=hi)
    } else {
        fallback
    }
}

//! Level Demo
//!
//! Generates a dungeon, spawns it into a world with colliders, then runs a
//! fixed number of physics ticks with wandering actors:
//! - Rooms and corridors become static box volumes
//! - Actors are spheres bouncing around inside their room
//! - Contacts between actors are pushed apart and logged
//!
//! Usage: `level_demo [settings.toml|settings.ron]`

use rand::Rng;
use sim_engine::config::{Config, ConfigError, SimulationConfig};
use sim_engine::ecs::{Entity, HasProperties, Positioned, PropertyValue, World};
use sim_engine::foundation::bounds::Aabb;
use sim_engine::foundation::logging;
use sim_engine::foundation::math::Vec3;
use sim_engine::level::{LevelAssembler, LevelGenerator};
use sim_engine::physics::{CollisionLayers, CollisionVolume, PhysicsWorld};
use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

const ACTORS_PER_ROOM: usize = 2;
const ACTOR_RADIUS: f32 = 0.75;
const ACTOR_SPEED: f32 = 4.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("failed to load settings: {0}")]
    Config(#[from] ConfigError),

    #[error("generator placed no rooms")]
    EmptyLevel,
}

struct Actor {
    entity: Entity,
    velocity: Vec3,
    bounds: Aabb,
}

impl Actor {
    /// Advance by one tick, reflecting off the room walls
    fn step(&mut self, world: &mut World, delta_time: f32) {
        let Some(object) = world.get_mut(self.entity) else {
            return;
        };
        let mut position = object.position() + self.velocity * delta_time;
        for axis in [0, 2] {
            if position[axis] < self.bounds.min[axis] || position[axis] > self.bounds.max[axis] {
                self.velocity[axis] = -self.velocity[axis];
                position[axis] = position[axis].clamp(self.bounds.min[axis], self.bounds.max[axis]);
            }
        }
        object.set_position(position);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");
    run()?;
    Ok(())
}

fn run() -> Result<(), DemoError> {
    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let config = SimulationConfig::load_or_default(settings_path.as_deref())?;
    log::info!(
        "running {} ticks at dt={:.4}, {} rooms requested",
        config.ticks,
        config.delta_time,
        config.generator.num_rooms
    );

    let mut generator = LevelGenerator::new(config.generator.clone());
    let (rooms, _) = generator.generate();
    if rooms.is_empty() {
        return Err(DemoError::EmptyLevel);
    }

    let mut world = World::new();
    let mut physics = PhysicsWorld::from_config(&config.physics);
    physics.set_layer_collision(CollisionLayers::PLAYER, CollisionLayers::PLAYER, true);
    physics.set_layer_collision(CollisionLayers::PLAYER, CollisionLayers::ENEMY, true);
    physics.set_layer_collision(CollisionLayers::PLAYER, CollisionLayers::PICKUP, true);

    let level = generator.instantiate(&LevelAssembler::new(), &mut world, &mut physics);
    log::info!(
        "level ready: {} rooms, {} corridor segments, {} decorations",
        level.rooms.len(),
        level.corridors.len(),
        level.decorations.len()
    );

    let contacts = Rc::new(Cell::new(0_u32));
    let actors = spawn_actors(&mut generator, &mut world, &mut physics, &contacts);

    simulate(&config, &mut world, &mut physics, actors);

    log::info!("simulation finished: {} actor contact callbacks", contacts.get());
    Ok(())
}

fn spawn_actors(
    generator: &mut LevelGenerator,
    world: &mut World,
    physics: &mut PhysicsWorld,
    contacts: &Rc<Cell<u32>>,
) -> Vec<Actor> {
    let rooms = generator.rooms().to_vec();
    let rng = generator.rng_mut();
    let mut actors = Vec::new();

    for (i, room) in rooms.iter().enumerate() {
        let bounds = room.aabb().expanded(-ACTOR_RADIUS);
        if bounds.min.x > bounds.max.x || bounds.min.z > bounds.max.z {
            continue;
        }
        for k in 0..ACTORS_PER_ROOM {
            let position = Vec3::new(
                rng.gen_range(bounds.min.x..=bounds.max.x),
                room.center().y,
                rng.gen_range(bounds.min.z..=bounds.max.z),
            );
            let entity = world.create_object(format!("actor_{i}_{k}"), "actor", position);
            if let Some(object) = world.get_mut(entity) {
                object.set_property("color", PropertyValue::Color(0, 160, 255));
            }
            physics.add_collider(
                CollisionVolume::sphere(entity, position, ACTOR_RADIUS).with_layer(CollisionLayers::PLAYER),
            );

            let counter = Rc::clone(contacts);
            physics.register_collision_callback(entity, move |_, other| {
                log::trace!("contact with {other}");
                counter.set(counter.get() + 1);
            });

            let heading = rng.gen_range(0.0..std::f32::consts::TAU);
            actors.push(Actor {
                entity,
                velocity: Vec3::new(heading.cos(), 0.0, heading.sin()) * ACTOR_SPEED,
                bounds,
            });
        }
    }

    log::info!("spawned {} actors", actors.len());
    actors
}

fn simulate(config: &SimulationConfig, world: &mut World, physics: &mut PhysicsWorld, mut actors: Vec<Actor>) {
    let mut total_events = 0;
    for tick in 0..config.ticks {
        for actor in &mut actors {
            actor.step(world, config.delta_time);
        }

        let events = physics.update(world, config.delta_time);
        total_events += events.len();

        for pair in physics.collisions_entered() {
            log::debug!("tick {tick}: {} touched {}", name_of(world, pair.entity_a), name_of(world, pair.entity_b));
        }
        for pair in physics.collisions_exited() {
            log::debug!("tick {tick}: {} left {}", name_of(world, pair.entity_a), name_of(world, pair.entity_b));
        }
    }
    log::info!("{total_events} collision events over {} ticks", config.ticks);
}

fn name_of(world: &World, entity: Entity) -> &str {
    world.get(entity).map_or("<despawned>", |object| object.name.as_str())
}

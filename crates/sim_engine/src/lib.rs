//! # Sim Engine
//!
//! Collision simulation and procedural level generation for game worlds.
//!
//! ## Features
//!
//! - **Collision World**: Sphere and box volumes with layer filtering, triggers and callbacks
//! - **Contact Resolution**: Overlapping spheres are pushed apart each tick
//! - **Level Generation**: Non-overlapping rooms linked by an MST plus a few loop corridors
//! - **Level Assembly**: Rooms, corridors and decorations spawned as entities with colliders
//! - **Configuration**: TOML and RON settings files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sim_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut generator = LevelGenerator::with_seed(42);
//!     generator.generate();
//!
//!     let mut world = World::new();
//!     let mut physics = PhysicsWorld::new();
//!     let level = generator.instantiate(&LevelAssembler::new(), &mut world, &mut physics);
//!     println!("{} rooms", level.rooms.len());
//!
//!     let events = physics.update(&mut world, 1.0 / 60.0);
//!     println!("{} contacts", events.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod level;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, GeneratorConfig, PhysicsConfig, SimulationConfig},
        ecs::{Entity, EntityResolver, GameObject, HasProperties, Positioned, PropertyValue, World},
        foundation::{bounds::Aabb, math::Vec3},
        level::{AssembledLevel, Corridor, LevelAssembler, LevelGenerator, Room, RoomType, RoomTypeWeights},
        physics::{
            CollisionEvent, CollisionLayers, CollisionVolume, LayerMatrix, PhysicsWorld, ShapeParams,
        },
    };
}

//! Physics module for collision detection and response
//!
//! Brute-force pairwise detection between sphere and box volumes, filtered
//! by collision layers, with positional separation for overlapping spheres.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::{
    BoundingSphere,
    CollisionVolume,
    VolumeShape,
    ShapeKind,
    ShapeParams,
    PhysicsError,
};
pub use collision_layers::{CollisionLayers, LayerMatrix};
pub use collision_system::{
    PhysicsWorld,
    ColliderHandle,
    CollisionCallback,
    CollisionEvent,
    CollisionPair,
};

//! Collision volumes and narrow-phase tests
//!
//! # Module Organization
//!
//! - [`primitives`] - Basic geometric primitives (spheres)
//! - [`shape`] - Entity-attached collision volumes (sphere and box)
//!
//! Box bounds come from [`crate::foundation::bounds::Aabb`].

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::BoundingSphere;
pub use shape::{CollisionVolume, VolumeShape, ShapeKind, ShapeParams, PhysicsError};

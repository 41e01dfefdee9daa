//! Entity-attached collision volumes
//!
//! A [`CollisionVolume`] mirrors the position of the entity that owns it and
//! carries one of two shapes. Box bounds are cached and recomputed on every
//! position change; intersection tests read them directly.

use super::primitives::BoundingSphere;
use crate::ecs::Entity;
use crate::foundation::bounds::Aabb;
use crate::foundation::math::{Vec3, Vec3Ext};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Physics configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// Shape kind string did not name a known shape
    #[error("Unknown collider shape kind: {0}")]
    UnknownShapeKind(String),
}

/// Shape variants supported by the collision system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Sphere around the entity position
    Sphere,
    /// Axis-aligned box centered on the entity position
    Box,
}

impl FromStr for ShapeKind {
    type Err = PhysicsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" => Ok(Self::Sphere),
            "box" => Ok(Self::Box),
            _ => Err(PhysicsError::UnknownShapeKind(s.to_string())),
        }
    }
}

/// Parameters for building a volume from a [`ShapeKind`]
///
/// Spheres read `radius` (default 1.0), boxes read `size` (default unit cube).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// Sphere radius
    pub radius: Option<f32>,
    /// Box full extents
    pub size: Option<Vec3>,
}

impl ShapeParams {
    /// Params for a sphere of the given radius
    pub fn radius(radius: f32) -> Self {
        Self { radius: Some(radius), size: None }
    }

    /// Params for a box of the given full size
    pub fn size(size: Vec3) -> Self {
        Self { radius: None, size: Some(size) }
    }
}

/// Shape of a collision volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeShape {
    /// Sphere with the given radius
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// Axis-aligned box with the given full extents
    Box {
        /// Full size along each axis
        size: Vec3,
    },
}

impl VolumeShape {
    /// Which kind of shape this is
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Sphere { .. } => ShapeKind::Sphere,
            Self::Box { .. } => ShapeKind::Box,
        }
    }

    fn bounds_at(&self, position: Vec3) -> Aabb {
        match self {
            Self::Sphere { radius } => {
                Aabb::from_center_size(position, Vec3::new(*radius, *radius, *radius) * 2.0)
            }
            Self::Box { size } => Aabb::from_center_size(position, *size),
        }
    }
}

/// Collision volume attached to an entity
///
/// Geometry is not validated: a negative radius or zero-size box simply
/// produces degenerate tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionVolume {
    entity: Entity,
    position: Vec3,
    shape: VolumeShape,
    bounds: Aabb,
    /// Trigger volumes report contacts but are never pushed apart
    pub is_trigger: bool,
    /// Collision layer index, filtered through the layer matrix
    pub layer: u32,
}

impl CollisionVolume {
    /// Create a volume of any shape
    pub fn new(entity: Entity, position: Vec3, shape: VolumeShape) -> Self {
        Self {
            entity,
            position,
            shape,
            bounds: shape.bounds_at(position),
            is_trigger: false,
            layer: 0,
        }
    }

    /// Create a spherical volume
    pub fn sphere(entity: Entity, position: Vec3, radius: f32) -> Self {
        Self::new(entity, position, VolumeShape::Sphere { radius })
    }

    /// Create a box volume from full extents
    pub fn cuboid(entity: Entity, position: Vec3, size: Vec3) -> Self {
        Self::new(entity, position, VolumeShape::Box { size })
    }

    /// Build a volume from a shape kind and its parameters
    pub fn from_kind(entity: Entity, position: Vec3, kind: ShapeKind, params: &ShapeParams) -> Self {
        match kind {
            ShapeKind::Sphere => Self::sphere(entity, position, params.radius.unwrap_or(1.0)),
            ShapeKind::Box => {
                Self::cuboid(entity, position, params.size.unwrap_or_else(|| Vec3::new(1.0, 1.0, 1.0)))
            }
        }
    }

    /// Set the collision layer
    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// Current position (mirrored from the owning entity)
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Shape of this volume
    pub fn shape(&self) -> &VolumeShape {
        &self.shape
    }

    /// Move the volume, recomputing derived bounds
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.bounds = self.shape.bounds_at(position);
    }

    /// Axis-aligned bounds at the current position
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Minimum corner of the bounds
    pub fn min(&self) -> Vec3 {
        self.bounds.min
    }

    /// Maximum corner of the bounds
    pub fn max(&self) -> Vec3 {
        self.bounds.max
    }

    /// Sphere radius, if this is a sphere
    pub fn radius(&self) -> Option<f32> {
        match self.shape {
            VolumeShape::Sphere { radius } => Some(radius),
            VolumeShape::Box { .. } => None,
        }
    }

    /// Narrow-phase intersection test
    ///
    /// - sphere/sphere: center distance strictly less than the radius sum
    /// - box/box: inclusive AABB overlap on all three axes
    /// - sphere/box: distance from the sphere center to the closest point
    ///   in the box strictly less than the radius
    pub fn intersects(&self, other: &CollisionVolume) -> bool {
        match (self.shape, other.shape) {
            (VolumeShape::Sphere { radius: a }, VolumeShape::Sphere { radius: b }) => {
                BoundingSphere::new(self.position, a)
                    .intersects(&BoundingSphere::new(other.position, b))
            }
            (VolumeShape::Box { .. }, VolumeShape::Box { .. }) => {
                self.bounds.intersects(&other.bounds)
            }
            (VolumeShape::Sphere { radius }, VolumeShape::Box { .. }) => {
                sphere_box(self.position, radius, &other.bounds)
            }
            (VolumeShape::Box { .. }, VolumeShape::Sphere { radius }) => {
                sphere_box(other.position, radius, &self.bounds)
            }
        }
    }
}

fn sphere_box(center: Vec3, radius: f32, bounds: &Aabb) -> bool {
    let closest = bounds.closest_point(center);
    center.distance_to(&closest) < radius
}

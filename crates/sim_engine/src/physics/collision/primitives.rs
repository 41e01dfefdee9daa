//! Primitive collision shapes and intersection algorithms

use crate::foundation::math::{Vec3, Vec3Ext};

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    ///
    /// Strict: spheres that exactly touch do not intersect.
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        self.center.distance_to(&other.center) < self.radius + other.radius
    }

    /// Check if this sphere overlaps a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_to(&point) < self.radius
    }

    /// Get the penetration depth if intersecting (0.0 if not intersecting)
    pub fn penetration_depth(&self, other: &BoundingSphere) -> f32 {
        let distance = self.center.distance_to(&other.center);
        let radius_sum = self.radius + other.radius;
        if distance < radius_sum {
            radius_sum - distance
        } else {
            0.0
        }
    }
}

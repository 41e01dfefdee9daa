//! Math utilities and types
//!
//! Provides the vector type shared by the physics and level generation
//! subsystems.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Extension trait for `Vec3` with the degenerate-safe operations the
/// simulation relies on.
///
/// `nalgebra` already supplies `magnitude`, `dot`, `cross` and the arithmetic
/// operators. Its `normalize` divides by zero on a zero vector, so callers in
/// this crate go through [`Vec3Ext::safe_normalize`] instead.
pub trait Vec3Ext {
    /// Unit vector in the same direction, or the zero vector if the
    /// magnitude is zero
    fn safe_normalize(&self) -> Vec3;

    /// Euclidean distance between two points
    fn distance_to(&self, other: &Vec3) -> f32;
}

impl Vec3Ext for Vec3 {
    fn safe_normalize(&self) -> Vec3 {
        let magnitude = self.magnitude();
        if magnitude > 0.0 {
            *self / magnitude
        } else {
            Vec3::zeros()
        }
    }

    fn distance_to(&self, other: &Vec3) -> f32 {
        (*self - *other).magnitude()
    }
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_safe_normalize_unit_length() {
        let v = Vec3::new(3.0, 0.0, 4.0).safe_normalize();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v, Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_safe_normalize_zero_vector() {
        let v = Vec3::zeros().safe_normalize();
        assert_eq!(v, Vec3::zeros());
        assert!(v.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_distance_to() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        assert_relative_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn test_cross_and_dot() {
        let x = Vec3::x();
        let y = Vec3::y();
        assert_eq!(x.cross(&y), Vec3::z());
        assert_relative_eq!(x.dot(&y), 0.0);
    }

    #[test]
    fn test_utils() {
        assert_relative_eq!(utils::clamp(5.0, 0.0, 2.0), 2.0);
        assert_relative_eq!(utils::clamp(-1.0, 0.0, 2.0), 0.0);
    }
}

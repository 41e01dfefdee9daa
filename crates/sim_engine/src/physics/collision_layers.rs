//! Collision layer filtering
//! 
//! Every volume sits on one integer layer. A [`LayerMatrix`] records which
//! layer pairs are tested against each other; pairs that were never enabled
//! are skipped entirely, so an empty matrix reports no collisions.

use std::collections::{HashMap, HashSet};

/// Named layer indices used by the level assembly and demo code
pub struct CollisionLayers;

impl CollisionLayers {
    /// Default layer for volumes that don't specify one
    pub const DEFAULT: u32 = 0;
    
    /// Player character layer
    pub const PLAYER: u32 = 1;
    
    /// Enemy character layer
    pub const ENEMY: u32 = 2;
    
    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: u32 = 3;
    
    /// Static environment geometry (rooms, corridors)
    pub const ENVIRONMENT: u32 = 4;
    
    /// Trigger volumes (no physical response)
    pub const TRIGGER: u32 = 5;
    
    /// Pickups, props and collectibles
    pub const PICKUP: u32 = 6;
}

/// Which layer pairs are checked for collisions
///
/// Storage is directional (`a -> {b, ...}`), lookups are symmetric: a pair
/// is checked if either direction was enabled. Disabling only clears the
/// direction it names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerMatrix {
    enabled: HashMap<u32, HashSet<u32>>,
}

impl LayerMatrix {
    /// Create an empty matrix (nothing collides)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable collisions from `layer_a` to `layer_b`
    pub fn set(&mut self, layer_a: u32, layer_b: u32, enabled: bool) {
        let targets = self.enabled.entry(layer_a).or_default();
        if enabled {
            targets.insert(layer_b);
        } else {
            targets.remove(&layer_b);
        }
    }
    
    /// Check if two layers should be tested against each other
    /// 
    /// # Example
    /// ```
    /// use sim_engine::physics::{CollisionLayers, LayerMatrix};
    ///
    /// let mut matrix = LayerMatrix::new();
    /// matrix.set(CollisionLayers::PLAYER, CollisionLayers::ENEMY, true);
    /// assert!(matrix.should_check(CollisionLayers::ENEMY, CollisionLayers::PLAYER));
    /// ```
    pub fn should_check(&self, layer_a: u32, layer_b: u32) -> bool {
        self.enabled.get(&layer_a).is_some_and(|t| t.contains(&layer_b))
            || self.enabled.get(&layer_b).is_some_and(|t| t.contains(&layer_a))
    }

    /// Enable every pair in `pairs`
    pub fn enable_all(&mut self, pairs: &[(u32, u32)]) {
        for &(a, b) in pairs {
            self.set(a, b, true);
        }
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.enabled.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_empty_matrix_checks_nothing() {
        let matrix = LayerMatrix::new();
        assert!(!matrix.should_check(0, 0));
        assert!(!matrix.should_check(CollisionLayers::PLAYER, CollisionLayers::ENEMY));
    }
    
    #[test]
    fn test_symmetric_lookup() {
        let mut matrix = LayerMatrix::new();
        matrix.set(1, 2, true);
        assert!(matrix.should_check(1, 2));
        assert!(matrix.should_check(2, 1));
        assert!(!matrix.should_check(1, 1));
    }
    
    #[test]
    fn test_disable_only_clears_named_direction() {
        let mut matrix = LayerMatrix::new();
        matrix.set(1, 2, true);
        matrix.set(2, 1, false);
        assert!(matrix.should_check(2, 1));

        matrix.set(1, 2, false);
        assert!(!matrix.should_check(1, 2));
        assert!(!matrix.should_check(2, 1));
    }

    #[test]
    fn test_enable_all() {
        let mut matrix = LayerMatrix::new();
        matrix.enable_all(&[(0, 0), (CollisionLayers::PLAYER, CollisionLayers::ENVIRONMENT)]);
        assert!(matrix.should_check(0, 0));
        assert!(matrix.should_check(CollisionLayers::ENVIRONMENT, CollisionLayers::PLAYER));
        matrix.clear();
        assert!(!matrix.should_check(0, 0));
    }
}

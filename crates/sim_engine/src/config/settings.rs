use crate::foundation::math::Vec3;
use crate::level::RoomTypeWeights;
use crate::physics::CollisionLayers;
use serde::{Deserialize, Serialize};

/// Level generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// RNG seed; entropy-seeded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Rooms requested per generation
    pub num_rooms: usize,
    /// Smallest room extent along X and Z
    pub min_room_size: f32,
    /// Largest room extent along X and Z
    pub max_room_size: f32,
    /// Minimum corner of the level volume
    pub level_min: Vec3,
    /// Maximum corner of the level volume
    pub level_max: Vec3,
    /// Clearance kept between rooms
    pub room_buffer: f32,
    /// Placement attempts allowed per requested room
    pub attempts_per_room: usize,
    /// Fraction of MST edges added back as loops
    pub extra_edge_ratio: f32,
    /// Corridor width
    pub corridor_width: f32,
    /// Corridor height
    pub corridor_height: f32,
    /// Room type selection weights
    pub room_type_weights: RoomTypeWeights,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            num_rooms: 10,
            min_room_size: 5.0,
            max_room_size: 15.0,
            level_min: Vec3::new(-50.0, -10.0, -50.0),
            level_max: Vec3::new(50.0, 10.0, 50.0),
            room_buffer: 1.0,
            attempts_per_room: 10,
            extra_edge_ratio: 0.1,
            corridor_width: 2.0,
            corridor_height: 3.0,
            room_type_weights: RoomTypeWeights::default(),
        }
    }
}

/// Collision world settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Layer pairs enabled for collision checks
    pub layer_pairs: Vec<(u32, u32)>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            layer_pairs: vec![(CollisionLayers::DEFAULT, CollisionLayers::DEFAULT)],
        }
    }
}

/// Top-level settings for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Physics ticks to run
    pub ticks: u32,
    /// Seconds per tick
    pub delta_time: f32,
    /// Level generation
    pub generator: GeneratorConfig,
    /// Collision world
    pub physics: PhysicsConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 60,
            delta_time: 1.0 / 60.0,
            generator: GeneratorConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

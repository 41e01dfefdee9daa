//! Procedural level generator
//!
//! Places non-overlapping rooms by rejection sampling inside fixed level
//! bounds, then links them with [`connectivity::connect`]. Each call fully
//! replaces the previous rooms and corridors.

use super::assembly::{AssembledLevel, EntityFactory, LevelAssembler};
use super::connectivity::{self, CorridorStyle};
use super::room::{Corridor, Room, RoomTypeWeights};
use crate::config::GeneratorConfig;
use crate::foundation::bounds::Aabb;
use crate::foundation::math::Vec3;
use crate::physics::PhysicsWorld;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Rooms reserved up front; larger requests grow on demand
const MAX_PREALLOCATED_ROOMS: usize = 64;

/// Room and corridor generator owning its RNG
pub struct LevelGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
}

impl LevelGenerator {
    /// Create a generator; seeds from `config.seed` or OS entropy
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng,
            rooms: Vec::new(),
            corridors: Vec::new(),
        }
    }

    /// Default configuration with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        })
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Rooms from the last generation
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Corridors from the last generation
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    /// Mutable access to the RNG, e.g. for level assembly decorations
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Generate using the configured room count, sizes and weights
    pub fn generate(&mut self) -> (&[Room], &[Corridor]) {
        let weights = self.config.room_type_weights.clone();
        self.generate_level(
            self.config.num_rooms,
            self.config.min_room_size,
            self.config.max_room_size,
            &weights,
        )
    }

    /// Generate a level of up to `num_rooms` rooms
    ///
    /// Returns fewer rooms than requested when the attempt budget
    /// (`num_rooms * attempts_per_room`) runs out. That is a valid result.
    pub fn generate_level(
        &mut self,
        num_rooms: usize,
        min_room_size: f32,
        max_room_size: f32,
        room_type_weights: &RoomTypeWeights,
    ) -> (&[Room], &[Corridor]) {
        self.rooms = self.place_rooms(num_rooms, min_room_size, max_room_size, room_type_weights);
        let style = self.corridor_style();
        self.corridors = connectivity::connect(&mut self.rooms, &style);
        info!(
            "generated level: {} rooms, {} corridors",
            self.rooms.len(),
            self.corridors.len()
        );
        (&self.rooms, &self.corridors)
    }

    /// Connect caller-placed rooms, replacing generator state
    ///
    /// Existing `connections` on the input rooms are discarded.
    pub fn connect_rooms(&mut self, rooms: Vec<Room>) -> (&[Room], &[Corridor]) {
        self.rooms = rooms;
        for room in &mut self.rooms {
            room.connections.clear();
        }
        let style = self.corridor_style();
        self.corridors = connectivity::connect(&mut self.rooms, &style);
        (&self.rooms, &self.corridors)
    }

    /// Spawn the last generated level, drawing decoration placement from this generator's RNG
    pub fn instantiate<F: EntityFactory>(
        &mut self,
        assembler: &LevelAssembler,
        factory: &mut F,
        physics: &mut PhysicsWorld,
    ) -> AssembledLevel {
        assembler.instantiate(&self.rooms, &self.corridors, factory, physics, &mut self.rng)
    }

    fn corridor_style(&self) -> CorridorStyle {
        CorridorStyle {
            width: self.config.corridor_width,
            height: self.config.corridor_height,
            extra_edge_ratio: self.config.extra_edge_ratio,
        }
    }

    fn place_rooms(
        &mut self,
        num_rooms: usize,
        min_room_size: f32,
        max_room_size: f32,
        weights: &RoomTypeWeights,
    ) -> Vec<Room> {
        if !min_room_size.is_finite() || !max_room_size.is_finite() {
            warn!("room sizes must be finite (got {min_room_size}, {max_room_size}), placing nothing");
            return Vec::new();
        }

        let mut rooms: Vec<Room> = Vec::with_capacity(num_rooms.min(MAX_PREALLOCATED_ROOMS));
        let (min_size, max_size) = if min_room_size <= max_room_size {
            (min_room_size, max_room_size)
        } else {
            warn!("min room size {min_room_size} exceeds max {max_room_size}, swapping");
            (max_room_size, min_room_size)
        };
        let bounds = Aabb::new(self.config.level_min, self.config.level_max);
        let max_attempts = attempt_budget(num_rooms, self.config.attempts_per_room);
        let mut attempts = 0;

        while rooms.len() < num_rooms && attempts < max_attempts {
            attempts += 1;

            let width = self.rng.gen_range(min_size..=max_size);
            let height = self.rng.gen_range(min_size / 2.0..=max_size / 2.0);
            let depth = self.rng.gen_range(min_size..=max_size);

            let Some(position) = self.sample_center(&bounds, Vec3::new(width, height, depth)) else {
                continue;
            };

            let room_type = weights.select(&mut self.rng);
            let candidate = Room::new(position, width, height, depth, room_type);

            if rooms.iter().any(|room| candidate.intersects(room, self.config.room_buffer)) {
                continue;
            }

            debug!(
                "added {} room at ({:.2}, {:.2}, {:.2})",
                candidate.room_type, position.x, position.y, position.z
            );
            rooms.push(candidate);
        }

        if rooms.len() < num_rooms {
            warn!(
                "placement budget exhausted after {attempts} attempts: placed {} of {num_rooms} rooms",
                rooms.len()
            );
        }
        rooms
    }

    /// Random center keeping a box of `size` fully inside `bounds`
    fn sample_center(&mut self, bounds: &Aabb, size: Vec3) -> Option<Vec3> {
        let half = size * 0.5;
        let lo = bounds.min + half;
        let hi = bounds.max - half;
        if lo.x > hi.x || lo.y > hi.y || lo.z > hi.z {
            return None;
        }
        Some(Vec3::new(
            self.rng.gen_range(lo.x..=hi.x),
            self.rng.gen_range(lo.y..=hi.y),
            self.rng.gen_range(lo.z..=hi.z),
        ))
    }
}

/// Placement attempts allowed for `num_rooms`, saturating on overflow
fn attempt_budget(num_rooms: usize, attempts_per_room: usize) -> usize {
    num_rooms.saturating_mul(attempts_per_room)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::room::RoomType;

    #[test]
    fn test_zero_rooms_is_empty() {
        let mut generator = LevelGenerator::with_seed(1);
        let (rooms, corridors) = generator.generate_level(0, 5.0, 15.0, &RoomTypeWeights::default());
        assert!(rooms.is_empty());
        assert!(corridors.is_empty());
    }

    #[test]
    fn test_rooms_stay_inside_bounds_and_apart() {
        let mut generator = LevelGenerator::with_seed(42);
        let buffer = generator.config().room_buffer;
        // Tolerance for float rounding in center +/- half extents
        let bounds = Aabb::new(generator.config().level_min, generator.config().level_max).expanded(1e-3);
        let (rooms, _) = generator.generate_level(10, 5.0, 15.0, &RoomTypeWeights::default());

        assert!(!rooms.is_empty() && rooms.len() <= 10);
        for (i, a) in rooms.iter().enumerate() {
            assert!(bounds.contains_point(a.min_bounds()));
            assert!(bounds.contains_point(a.max_bounds()));
            assert!(a.width >= 5.0 && a.width <= 15.0);
            assert!(a.height >= 2.5 && a.height <= 7.5);
            for b in &rooms[i + 1..] {
                assert!(!a.aabb().expanded(buffer).intersects(&b.aabb()));
            }
        }
    }

    #[test]
    fn test_huge_room_count_does_not_preallocate() {
        let mut generator = LevelGenerator::new(GeneratorConfig {
            seed: Some(4),
            attempts_per_room: 0,
            ..GeneratorConfig::default()
        });
        let (rooms, corridors) = generator.generate_level(usize::MAX / 4, 5.0, 15.0, &RoomTypeWeights::default());
        assert!(rooms.is_empty());
        assert!(corridors.is_empty());
    }

    #[test]
    fn test_attempt_budget_saturates() {
        assert_eq!(attempt_budget(10, 10), 100);
        assert_eq!(attempt_budget(usize::MAX / 4, 10), usize::MAX);
        assert_eq!(attempt_budget(usize::MAX, 0), 0);
    }

    #[test]
    fn test_non_finite_sizes_place_nothing() {
        let mut generator = LevelGenerator::with_seed(2);
        let (rooms, corridors) = generator.generate_level(3, f32::NAN, 15.0, &RoomTypeWeights::default());
        assert!(rooms.is_empty());
        assert!(corridors.is_empty());
        let (rooms, _) = generator.generate_level(3, 5.0, f32::INFINITY, &RoomTypeWeights::default());
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_oversized_rooms_place_nothing() {
        let mut generator = LevelGenerator::with_seed(7);
        let (rooms, corridors) = generator.generate_level(5, 150.0, 200.0, &RoomTypeWeights::default());
        assert!(rooms.is_empty());
        assert!(corridors.is_empty());
    }

    #[test]
    fn test_generation_replaces_previous_state() {
        let mut generator = LevelGenerator::with_seed(3);
        generator.generate_level(8, 5.0, 10.0, &RoomTypeWeights::default());
        let (rooms, _) = generator.generate_level(1, 5.0, 10.0, &RoomTypeWeights::default());
        assert_eq!(rooms.len(), 1);
        assert!(generator.corridors().is_empty());
    }

    #[test]
    fn test_single_type_table() {
        let weights = RoomTypeWeights::new([(RoomType::Custom("crypt".into()), 1.0)]);
        let mut generator = LevelGenerator::with_seed(11);
        let (rooms, _) = generator.generate_level(6, 5.0, 8.0, &weights);
        assert!(rooms.iter().all(|r| r.room_type == RoomType::Custom("crypt".into())));
    }

    #[test]
    fn test_connect_rooms_clears_stale_connections() {
        let mut generator = LevelGenerator::with_seed(0);
        let mut stale = Room::new(Vec3::zeros(), 5.0, 3.0, 5.0, RoomType::Default);
        stale.connections.insert(99);
        let other = Room::new(Vec3::new(20.0, 0.0, 0.0), 5.0, 3.0, 5.0, RoomType::Boss);
        let (rooms, corridors) = generator.connect_rooms(vec![stale, other]);
        assert_eq!(corridors.len(), 1);
        assert_eq!(rooms[0].connections.iter().copied().collect::<Vec<_>>(), vec![1]);
    }
}

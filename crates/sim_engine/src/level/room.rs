//! Rooms, corridors and room type tables

use crate::foundation::bounds::Aabb;
use crate::foundation::math::{Vec3, Vec3Ext};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label describing what a room is used for
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RoomType {
    /// Plain room
    #[default]
    Default,
    /// Holds a treasure chest
    Treasure,
    /// Populated with enemies
    Enemy,
    /// Holds a boss
    Boss,
    /// Shopkeeper and items for sale
    Shop,
    /// Any other generator-defined label
    Custom(String),
}

impl RoomType {
    /// Label used in weight tables and object kinds
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Treasure => "treasure",
            Self::Enemy => "enemy",
            Self::Boss => "boss",
            Self::Shop => "shop",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "default" => Self::Default,
            "treasure" => Self::Treasure,
            "enemy" => Self::Enemy,
            "boss" => Self::Boss,
            "shop" => Self::Shop,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for RoomType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(room_type) => room_type,
            Err(never) => match never {},
        }
    }
}

impl From<RoomType> for String {
    fn from(room_type: RoomType) -> Self {
        room_type.as_str().to_string()
    }
}

/// One entry of a [`RoomTypeWeights`] table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeWeight {
    /// Room type label
    pub room_type: RoomType,
    /// Selection probability
    pub weight: f32,
}

/// Ordered room type probability table
///
/// Order matters: selection walks the entries accumulating weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomTypeWeights {
    entries: Vec<RoomTypeWeight>,
}

impl RoomTypeWeights {
    /// Build a table from `(type, weight)` pairs, keeping their order
    pub fn new(entries: impl IntoIterator<Item = (RoomType, f32)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(room_type, weight)| RoomTypeWeight { room_type, weight })
                .collect(),
        }
    }

    /// Table entries in selection order
    pub fn entries(&self) -> &[RoomTypeWeight] {
        &self.entries
    }

    /// Sum of all weights
    pub fn total(&self) -> f32 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    /// Draw a room type
    ///
    /// Draws `r` in `[0, 1)` and returns the first entry whose cumulative
    /// weight reaches `r`. Tables that sum below `r` fall back to
    /// [`RoomType::Default`].
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> RoomType {
        let r: f32 = rng.gen();
        self.select_with(r)
    }

    /// Deterministic half of [`RoomTypeWeights::select`]
    pub fn select_with(&self, r: f32) -> RoomType {
        let mut cumulative = 0.0;
        for entry in &self.entries {
            cumulative += entry.weight;
            if r <= cumulative {
                return entry.room_type.clone();
            }
        }
        RoomType::Default
    }

    /// Rescale so the weights sum to 1.0
    ///
    /// Tables already within 0.01 of 1.0 and tables with a non-positive total
    /// are returned unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total();
        if total <= 0.0 || (total - 1.0).abs() <= 0.01 {
            return self.clone();
        }
        Self {
            entries: self
                .entries
                .iter()
                .map(|e| RoomTypeWeight {
                    room_type: e.room_type.clone(),
                    weight: e.weight / total,
                })
                .collect(),
        }
    }
}

impl Default for RoomTypeWeights {
    fn default() -> Self {
        Self::new([
            (RoomType::Default, 0.5),
            (RoomType::Treasure, 0.1),
            (RoomType::Enemy, 0.25),
            (RoomType::Boss, 0.05),
            (RoomType::Shop, 0.1),
        ])
    }
}

/// A box-shaped room in the level
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Center of the room
    pub position: Vec3,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
    /// Extent along Z
    pub depth: f32,
    /// What the room is used for
    pub room_type: RoomType,
    /// Indices of rooms linked to this one by a corridor
    pub connections: BTreeSet<usize>,
}

impl Room {
    /// Create an unconnected room
    pub fn new(position: Vec3, width: f32, height: f32, depth: f32, room_type: RoomType) -> Self {
        Self {
            position,
            width,
            height,
            depth,
            room_type,
            connections: BTreeSet::new(),
        }
    }

    /// Center of the room
    pub fn center(&self) -> Vec3 {
        self.position
    }

    /// Full extents as a vector
    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Bounding box of the room
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size())
    }

    /// Minimum corner
    pub fn min_bounds(&self) -> Vec3 {
        self.aabb().min
    }

    /// Maximum corner
    pub fn max_bounds(&self) -> Vec3 {
        self.aabb().max
    }

    /// Overlap test with both boxes grown by `buffer` on every side
    pub fn intersects(&self, other: &Room, buffer: f32) -> bool {
        self.aabb().expanded(buffer).intersects(&other.aabb().expanded(buffer))
    }

    /// Distance between room centers
    pub fn distance_to(&self, other: &Room) -> f32 {
        self.position.distance_to(&other.position)
    }
}

/// Corridor connecting two rooms
#[derive(Debug, Clone, PartialEq)]
pub struct Corridor {
    /// Index of the room the path starts in
    pub start_room: usize,
    /// Index of the room the path ends in
    pub end_room: usize,
    /// Corridor width
    pub width: f32,
    /// Corridor height
    pub height: f32,
    /// Waypoints from the start room center to the end room center
    pub path_points: Vec<Vec3>,
}

impl Corridor {
    /// Consecutive waypoint pairs
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.path_points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total path length
    pub fn length(&self) -> f32 {
        self.segments().map(|(a, b)| a.distance_to(&b)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_room_type_labels_round_trip() {
        for label in ["default", "treasure", "enemy", "boss", "shop", "armory"] {
            let room_type: RoomType = label.parse().unwrap();
            assert_eq!(room_type.to_string(), label);
        }
        assert_eq!("armory".parse::<RoomType>().unwrap(), RoomType::Custom("armory".into()));
    }

    #[test]
    fn test_weighted_selection_boundaries() {
        let weights = RoomTypeWeights::default();
        assert_eq!(weights.select_with(0.0), RoomType::Default);
        assert_eq!(weights.select_with(0.5), RoomType::Default);
        assert_eq!(weights.select_with(0.55), RoomType::Treasure);
        assert_eq!(weights.select_with(0.7), RoomType::Enemy);
        assert_eq!(weights.select_with(0.88), RoomType::Boss);
        assert_eq!(weights.select_with(0.95), RoomType::Shop);
    }

    #[test]
    fn test_short_table_falls_back_to_default() {
        let weights = RoomTypeWeights::new([(RoomType::Boss, 0.2)]);
        assert_eq!(weights.select_with(0.1), RoomType::Boss);
        assert_eq!(weights.select_with(0.9), RoomType::Default);
        assert_eq!(RoomTypeWeights::new([]).select_with(0.0), RoomType::Default);
    }

    #[test]
    fn test_normalized() {
        let weights = RoomTypeWeights::new([(RoomType::Enemy, 2.0), (RoomType::Shop, 2.0)]);
        let normalized = weights.normalized();
        assert_relative_eq!(normalized.total(), 1.0);
        assert_relative_eq!(normalized.entries()[0].weight, 0.5);
        assert_eq!(RoomTypeWeights::default().normalized(), RoomTypeWeights::default());
        let empty = RoomTypeWeights::new([]);
        assert_eq!(empty.normalized(), empty);
    }

    #[test]
    fn test_room_bounds_and_buffer() {
        let a = Room::new(Vec3::zeros(), 4.0, 2.0, 4.0, RoomType::Default);
        assert_eq!(a.min_bounds(), Vec3::new(-2.0, -1.0, -2.0));
        assert_eq!(a.max_bounds(), Vec3::new(2.0, 1.0, 2.0));

        // 1.0 gap between faces: clear without a buffer, blocked with one
        let b = Room::new(Vec3::new(5.0, 0.0, 0.0), 4.0, 2.0, 4.0, RoomType::Shop);
        assert!(!a.intersects(&b, 0.0));
        assert!(a.intersects(&b, 1.0));
        assert_relative_eq!(a.distance_to(&b), 5.0);
    }

    #[test]
    fn test_corridor_length() {
        let corridor = Corridor {
            start_room: 0,
            end_room: 1,
            width: 2.0,
            height: 3.0,
            path_points: vec![Vec3::zeros(), Vec3::new(3.0, 0.0, 0.0), Vec3::new(3.0, 0.0, 4.0)],
        };
        assert_eq!(corridor.segments().count(), 2);
        assert_relative_eq!(corridor.length(), 7.0);
    }
}

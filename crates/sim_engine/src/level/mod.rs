//! Procedural level generation
//!
//! - [`room`] - rooms, corridors and room type weight tables
//! - [`generator`] - rejection-sampling placement and the generator front end
//! - [`connectivity`] - spanning tree, loop edges and corridor paths
//! - [`assembly`] - turns a generated level into entities and colliders

pub mod room;
pub mod generator;
pub mod connectivity;
pub mod assembly;

pub use room::{Room, RoomType, RoomTypeWeight, RoomTypeWeights, Corridor};
pub use generator::LevelGenerator;
pub use connectivity::{DisjointSet, Edge, CorridorStyle};
pub use assembly::{LevelAssembler, AssembledLevel, EntityFactory};

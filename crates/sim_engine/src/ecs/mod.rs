//! Entity layer
//!
//! Entities are opaque handles; subsystems reach the data behind them only
//! through the capability traits in [`capability`].

pub mod world;
pub mod entity;
pub mod capability;

pub use world::{World, GameObject};
pub use entity::Entity;
pub use capability::{Positioned, HasProperties, PropertyValue, EntityResolver};

//! Narrow capability traits that engine subsystems depend on
//!
//! Physics needs nothing from an entity except a readable and writable
//! position, so it depends on [`Positioned`] alone. Level assembly also tags
//! objects with metadata through [`HasProperties`].

use super::Entity;
use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Anything with a mutable position in world space
pub trait Positioned {
    /// Current world-space position
    fn position(&self) -> Vec3;

    /// Move to a new world-space position
    fn set_position(&mut self, position: Vec3);
}

/// Typed metadata value attached to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point scalar
    Float(f32),
    /// Free-form text
    Text(String),
    /// RGB color
    Color(u8, u8, u8),
    /// Vector value
    Vector(Vec3),
}

/// Key/value metadata on an entity
pub trait HasProperties {
    /// Look up a property by key
    fn property(&self, key: &str) -> Option<&PropertyValue>;

    /// Insert or replace a property
    fn set_property(&mut self, key: &str, value: PropertyValue);
}

/// Resolves entity handles to their positioned objects
///
/// The physics world only holds [`Entity`] handles and never owns the
/// objects behind them. A handle that no longer resolves is treated as a
/// stale reference, not an error.
pub trait EntityResolver {
    /// Shared access to the entity's position
    fn resolve(&self, entity: Entity) -> Option<&dyn Positioned>;

    /// Mutable access to the entity's position
    fn resolve_mut(&mut self, entity: Entity) -> Option<&mut dyn Positioned>;
}

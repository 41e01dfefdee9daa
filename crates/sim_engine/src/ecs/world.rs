//! Minimal entity store
//!
//! Holds [`GameObject`]s in a sparse table keyed by [`Entity`]. This is the
//! reference implementation of the capability traits; hosts with their own
//! entity storage implement [`EntityResolver`] directly instead.

use super::capability::{EntityResolver, HasProperties, Positioned, PropertyValue};
use super::Entity;
use crate::foundation::math::Vec3;
use std::collections::HashMap;

/// A named, positioned object with typed properties
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    /// Human readable name, e.g. `room_3`
    pub name: String,
    /// Kind tag, e.g. `room_treasure` or `enemy`
    pub kind: String,
    position: Vec3,
    properties: HashMap<String, PropertyValue>,
}

impl GameObject {
    /// Create a new object at a position
    pub fn new(name: impl Into<String>, kind: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            position,
            properties: HashMap::new(),
        }
    }

    /// Iterate over all properties
    pub fn properties(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Positioned for GameObject {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl HasProperties for GameObject {
    fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    fn set_property(&mut self, key: &str, value: PropertyValue) {
        self.properties.insert(key.to_string(), value);
    }
}

/// World containing all game objects
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    objects: HashMap<Entity, GameObject>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            objects: HashMap::new(),
        }
    }
    
    /// Create a new entity holding `object`
    pub fn spawn(&mut self, object: GameObject) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        self.objects.insert(entity, object);
        entity
    }

    /// Convenience wrapper around [`World::spawn`]
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        kind: impl Into<String>,
        position: Vec3,
    ) -> Entity {
        self.spawn(GameObject::new(name, kind, position))
    }

    /// Remove an entity, returning its object if it existed
    pub fn despawn(&mut self, entity: Entity) -> Option<GameObject> {
        let object = self.objects.remove(&entity)?;
        self.entities.retain(|&e| e != entity);
        Some(object)
    }
    
    /// Get an object by entity
    pub fn get(&self, entity: Entity) -> Option<&GameObject> {
        self.objects.get(&entity)
    }
    
    /// Get a mutable object by entity
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut GameObject> {
        self.objects.get_mut(&entity)
    }

    /// Find the first object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<Entity> {
        self.entities
            .iter()
            .copied()
            .find(|e| self.objects.get(e).is_some_and(|o| o.name == name))
    }

    /// Current position of an entity, if alive
    pub fn position_of(&self, entity: Entity) -> Option<Vec3> {
        self.objects.get(&entity).map(Positioned::position)
    }
    
    /// Get an iterator over all entities in creation order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the world holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityResolver for World {
    fn resolve(&self, entity: Entity) -> Option<&dyn Positioned> {
        self.objects.get(&entity).map(|o| o as &dyn Positioned)
    }

    fn resolve_mut(&mut self, entity: Entity) -> Option<&mut dyn Positioned> {
        self.objects.get_mut(&entity).map(|o| o as &mut dyn Positioned)
    }
}

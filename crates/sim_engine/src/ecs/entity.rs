//! Entity implementation

/// Entity identifier
///
/// Opaque and stable for the lifetime of the entity; used as the key for
/// collision callbacks and collider ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity {
    id: u32,
}

impl Entity {
    /// Create a new entity with the given ID
    pub(crate) fn new(id: u32) -> Self {
        Self { id }
    }
    
    /// Wrap an id from a host's own entity storage
    ///
    /// For hosts that implement [`EntityResolver`](super::EntityResolver)
    /// themselves. Do not mix these with entities spawned by a
    /// [`World`](super::World); the id spaces overlap.
    pub fn from_raw(id: u32) -> Self {
        Self::new(id)
    }

    /// Get the entity ID
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl From<u32> for Entity {
    fn from(id: u32) -> Self {
        Self::from_raw(id)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.id)
    }
}

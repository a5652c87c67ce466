//! Identifiers for drag surfaces, containers, groups and draggables.

use std::fmt;

/// A stable identifier for a draggable, a container or a container group.
///
/// Ids are plain 64-bit values. Numeric ids map straight through; string keys
/// are hashed with FNV-1a so the same key always yields the same id.
///
/// # Example
/// ```
/// use sortable_core::id::Id;
///
/// let todo = Id::new("todo");
/// assert_eq!(todo, Id::from("todo"));
/// assert_eq!(Id::from(7u64).as_u64(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(u64);

/// Identifier of a draggable item, unique within its container.
pub type DraggableId = Id;
/// Identifier of a container (droppable zone).
pub type ContainerId = Id;
/// Identifier of a group of containers that may exchange items.
pub type GroupId = Id;

impl Id {
    /// Create an id from a string key.
    ///
    /// Uses FNV-1a hash for fast, consistent hashing.
    pub fn new(key: &str) -> Self {
        Self(Self::hash_str(key))
    }

    /// Create an id from a raw u64.
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw u64 value.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    fn hash_str(s: &str) -> u64 {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let mut hash = FNV_OFFSET_BASIS;
        for byte in s.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        hash
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id(0x{:016x})", self.0)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Self::from_raw(id)
    }
}

impl From<u32> for Id {
    fn from(id: u32) -> Self {
        Self::from_raw(id as u64)
    }
}

impl From<usize> for Id {
    fn from(id: usize) -> Self {
        Self::from_raw(id as u64)
    }
}

/// Identifier of one mounted drag surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u32);

impl ContextId {
    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextId({})", self.0)
    }
}

/// Hands out [`ContextId`]s.
///
/// Owned by whatever manages the mounted drag surfaces and passed into each
/// context on creation; there is no process-wide counter.
#[derive(Debug, Default)]
pub struct ContextIdAllocator {
    next: u32,
}

impl ContextIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id. Ids start at 1.
    pub fn allocate(&mut self) -> ContextId {
        self.next = self.next.wrapping_add(1).max(1);
        ContextId(self.next)
    }

    /// Number of ids handed out so far.
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

//! # Entity Management
//!
//! Entities are lightweight identifiers consisting of:
//! - An index into the slot table
//! - A generation counter for safe reuse

use super::mask::ComponentMask;
use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Unique identifier for an entity.
///
/// The ID is split into two parts:
/// - Lower 32 bits: Index into the entity slot table
/// - Upper 32 bits: Generation counter for detecting stale references
///
/// Handles are plain values. Storing one inside a component (a missile's
/// target, for instance) creates no ownership; check it with
/// [`World::is_valid`](crate::World::is_valid) before every use.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Creates a new entity ID from index and generation.
    ///
    /// # Arguments
    ///
    /// * `index` - The slot index (0 to 2^32-1)
    /// * `generation` - The generation counter (0 to 2^32-1)
    #[inline]
    #[must_use]
    pub const fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (index as u64))
    }

    /// Returns the index portion of the entity ID.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn index(self) -> u32 {
        self.0 as u32
    }

    /// Returns the generation portion of the entity ID.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Null/invalid entity ID. Never valid in any world.
    pub const NULL: Self = Self(u64::MAX);

    /// Checks if this entity ID is null/invalid.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u64::MAX
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::NULL
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("EntityId(NULL)");
        }
        write!(f, "EntityId({}v{})", self.index(), self.generation())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        write!(f, "{}v{}", self.index(), self.generation())
    }
}

/// One slot of the entity table.
///
/// Slots never move. A slot is either live (owned by exactly one entity) or
/// free; its generation only ever grows.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EntitySlot {
    /// Current generation of the slot.
    pub generation: u32,
    /// Bitmask of attached components.
    pub mask: ComponentMask,
    /// Whether this entity slot is currently alive.
    pub alive: bool,
}

impl EntitySlot {
    /// Creates a free slot at generation zero.
    #[inline]
    #[must_use]
    pub const fn free() -> Self {
        Self {
            generation: 0,
            mask: ComponentMask::EMPTY,
            alive: false,
        }
    }

    /// Checks whether `id` names the entity currently living in this slot.
    #[inline]
    #[must_use]
    pub const fn matches(&self, id: EntityId) -> bool {
        self.alive && self.generation == id.generation()
    }
}

impl Default for EntitySlot {
    fn default() -> Self {
        Self::free()
    }
}

//! # Component Masks
//!
//! A fixed 64-bit set over component ids. The same type records which
//! components an entity owns and declares which components a system needs.

use super::component::Component;
use std::fmt;

/// Upper bound on component types in any world (one bit each).
pub const MAX_COMPONENT_TYPES: u8 = 64;

#[inline]
const fn bit(id: u8) -> u64 {
    match 1u64.checked_shl(id as u32) {
        Some(b) => b,
        None => 0,
    }
}

/// Bitset of component ids.
///
/// Ids at or above [`MAX_COMPONENT_TYPES`] have no bit and are ignored.
///
/// # Example
///
/// ```rust,ignore
/// const MOVEMENT: ComponentMask = ComponentMask::EMPTY
///     .with::<Transform>()
///     .with::<Velocity>();
///
/// if world.has_mask(entity, MOVEMENT) { /* ... */ }
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ComponentMask(u64);

impl ComponentMask {
    /// The mask with no bits set.
    pub const EMPTY: Self = Self(0);

    /// Creates a mask containing each of `ids`.
    #[must_use]
    pub const fn from_ids(ids: &[u8]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < ids.len() {
            bits |= bit(ids[i]);
            i += 1;
        }
        Self(bits)
    }

    /// Returns this mask plus the bit of component `C`.
    #[inline]
    #[must_use]
    pub const fn with<C: Component>(self) -> Self {
        Self(self.0 | bit(C::ID))
    }

    /// Sets the bit for `id`.
    #[inline]
    pub fn insert(&mut self, id: u8) {
        self.0 |= bit(id);
    }

    /// Clears the bit for `id`.
    #[inline]
    pub fn remove(&mut self, id: u8) {
        self.0 &= !bit(id);
    }

    /// Checks the bit for `id`.
    #[inline]
    #[must_use]
    pub const fn contains(self, id: u8) -> bool {
        self.0 & bit(id) != 0
    }

    /// Checks that every bit of `required` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Returns whether no bits are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of bits set.
    #[inline]
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates over the set ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation)]
            let id = bits.trailing_zeros() as u8;
            bits &= bits - 1;
            Some(id)
        })
    }
}

impl fmt::Debug for ComponentMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

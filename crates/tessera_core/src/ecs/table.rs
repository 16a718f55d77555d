//! # Entity Table
//!
//! The authoritative list of entity slots. Owns liveness, generations,
//! component masks, per-component cell indices and the free list.
//!
//! Slots never move: destroying an entity only clears its slot and bumps the
//! generation, so a scan over ascending indices stays valid while entities
//! are created and destroyed underneath it.

use super::entity::{EntityId, EntitySlot};
use super::mask::ComponentMask;

const NO_CELL: u32 = u32::MAX;

/// Fixed-size table of entity slots.
pub struct EntityTable {
    /// All entity slots (pre-allocated).
    slots: Box<[EntitySlot]>,
    /// Pool cell per (slot, component id), row-major with `stride` columns.
    cells: Box<[u32]>,
    /// Number of component ids per row.
    stride: usize,
    /// Released slot indices, reused LIFO.
    free_indices: Vec<u32>,
    /// Slots at or above this index have never been handed out.
    high_water: u32,
    /// Number of currently alive entities.
    alive_count: u32,
}

impl EntityTable {
    /// Creates a table with `capacity` free slots and room for
    /// `component_types` component ids per slot.
    #[must_use]
    pub fn new(capacity: u32, component_types: u8) -> Self {
        let stride = usize::from(component_types);
        let slots = vec![EntitySlot::free(); capacity as usize].into_boxed_slice();
        let cells = vec![NO_CELL; capacity as usize * stride].into_boxed_slice();

        Self {
            slots,
            cells,
            stride,
            // Reserved up front so destroying never reallocates
            free_indices: Vec::with_capacity(capacity as usize),
            high_water: 0,
            alive_count: 0,
        }
    }

    /// Total number of slots.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn capacity(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Number of slots ever handed out. Scans walk `0..upper_bound()`.
    #[inline]
    #[must_use]
    pub const fn upper_bound(&self) -> u32 {
        self.high_water
    }

    /// Number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Checks that `id` names a live entity.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, id: EntityId) -> bool {
        self.slots
            .get(id.index() as usize)
            .is_some_and(|slot| slot.matches(id))
    }

    /// Returns the slot of a live entity.
    #[inline]
    #[must_use]
    pub fn slot(&self, id: EntityId) -> Option<&EntitySlot> {
        self.slots
            .get(id.index() as usize)
            .filter(|slot| slot.matches(id))
    }

    /// Returns the handle of the entity living at `index`, if any.
    #[inline]
    #[must_use]
    pub fn handle_at(&self, index: u32) -> Option<EntityId> {
        let slot = self.slots.get(index as usize)?;
        slot.alive.then(|| EntityId::new(index, slot.generation))
    }

    /// Claims a slot.
    ///
    /// This is a **zero-allocation** operation - it reuses pre-allocated slots.
    ///
    /// Returns `None` when every slot is live.
    pub fn allocate(&mut self) -> Option<EntityId> {
        let index = if let Some(index) = self.free_indices.pop() {
            index
        } else if self.high_water < self.capacity() {
            self.high_water += 1;
            self.high_water - 1
        } else {
            return None;
        };

        let slot = &mut self.slots[index as usize];
        slot.alive = true;
        slot.mask = ComponentMask::EMPTY;
        self.alive_count += 1;

        Some(EntityId::new(index, slot.generation))
    }

    /// Frees the slot of a live entity, invalidating every handle to it.
    ///
    /// Components must already be detached. Returns `false` for stale handles.
    pub fn free(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index() as usize) else {
            return false;
        };
        if !slot.matches(id) {
            return false;
        }
        debug_assert!(slot.mask.is_empty(), "freeing entity with attached components");

        slot.alive = false;
        slot.mask = ComponentMask::EMPTY;
        // Increment generation to invalidate old references
        slot.generation = slot.generation.wrapping_add(1);
        self.alive_count -= 1;
        self.free_indices.push(id.index());
        true
    }

    /// Pool cell holding component `component_id` of the entity at `index`.
    #[inline]
    #[must_use]
    pub fn cell(&self, index: u32, component_id: u8) -> Option<u32> {
        let slot = self.slots.get(index as usize)?;
        if !slot.mask.contains(component_id) {
            return None;
        }
        Some(self.cells[self.cell_offset(index, component_id)])
    }

    /// Records that component `component_id` of the entity at `index` lives
    /// in `cell`, and sets the mask bit.
    pub fn attach(&mut self, index: u32, component_id: u8, cell: u32) {
        let offset = self.cell_offset(index, component_id);
        self.cells[offset] = cell;
        self.slots[index as usize].mask.insert(component_id);
    }

    /// Clears the mask bit and returns the cell the component occupied.
    pub fn detach(&mut self, index: u32, component_id: u8) -> Option<u32> {
        let cell = self.cell(index, component_id)?;
        let offset = self.cell_offset(index, component_id);
        self.cells[offset] = NO_CELL;
        self.slots[index as usize].mask.remove(component_id);
        Some(cell)
    }

    #[inline]
    fn cell_offset(&self, index: u32, component_id: u8) -> usize {
        index as usize * self.stride + usize::from(component_id)
    }
}

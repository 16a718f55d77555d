//! # Component Pool
//!
//! Fixed-capacity cell storage for one component type.

use std::any::Any;

/// Per-type cleanup hook. Receives each destroyed instance exactly once.
pub type Destructor<T> = Box<dyn FnMut(T)>;

/// A pool of fixed-size cells for one component type.
///
/// Cells are handed out from the free list first, then from the untouched
/// tail of the buffer. The buffer is allocated once and never grows, so a
/// cell index stays valid until that cell is released.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. It is owned by a single world.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool: ComponentPool<Velocity> = ComponentPool::new("Velocity", 200);
///
/// // Allocate - O(1), no heap allocation
/// let cell = pool.allocate(Velocity::default()).ok()?;
///
/// // Release - O(1), runs the destructor hook if one is set
/// pool.release(cell);
/// ```
pub struct ComponentPool<T> {
    /// The cell buffer.
    cells: Box<[Option<T>]>,
    /// Released cell indices, reused LIFO.
    free_list: Vec<u32>,
    /// Cells at or above this index have never been handed out.
    high_water: u32,
    /// Number of occupied cells.
    len: u32,
    /// Total capacity.
    capacity: u32,
    /// Component name for diagnostics.
    name: &'static str,
    /// Optional cleanup hook.
    destructor: Option<Destructor<T>>,
}

impl<T> ComponentPool<T> {
    /// Creates a new pool with the specified capacity.
    ///
    /// All memory is pre-allocated upfront. A capacity of zero is allowed;
    /// such a pool rejects every allocation.
    ///
    /// # Arguments
    ///
    /// * `name` - Component name used in diagnostics
    /// * `capacity` - Maximum number of live instances
    #[must_use]
    pub fn new(name: &'static str, capacity: u32) -> Self {
        let cells: Vec<Option<T>> = (0..capacity).map(|_| None).collect();

        Self {
            cells: cells.into_boxed_slice(),
            // Reserved up front so releasing never reallocates
            free_list: Vec::with_capacity(capacity as usize),
            high_water: 0,
            len: 0,
            capacity,
            name,
            destructor: None,
        }
    }

    /// Creates a pool whose released instances are passed to `destructor`.
    #[must_use]
    pub fn with_destructor(name: &'static str, capacity: u32, destructor: Destructor<T>) -> Self {
        let mut pool = Self::new(name, capacity);
        pool.destructor = Some(destructor);
        pool
    }

    /// Returns the total capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the number of occupied cells.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Returns whether no cell is occupied.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the component name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Moves `value` into a free cell.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**.
    ///
    /// # Errors
    ///
    /// Hands `value` back untouched if the pool is full.
    pub fn allocate(&mut self, value: T) -> Result<u32, T> {
        let cell = if let Some(cell) = self.free_list.pop() {
            cell
        } else if self.high_water < self.capacity {
            self.high_water += 1;
            self.high_water - 1
        } else {
            return Err(value);
        };

        self.cells[cell as usize] = Some(value);
        self.len += 1;
        Ok(cell)
    }

    /// Gets a reference to an occupied cell.
    #[inline]
    #[must_use]
    pub fn get(&self, cell: u32) -> Option<&T> {
        self.cells.get(cell as usize)?.as_ref()
    }

    /// Gets a mutable reference to an occupied cell.
    #[inline]
    pub fn get_mut(&mut self, cell: u32) -> Option<&mut T> {
        self.cells.get_mut(cell as usize)?.as_mut()
    }

    /// Empties a cell and returns its value without running the destructor.
    pub fn take(&mut self, cell: u32) -> Option<T> {
        let value = self.cells.get_mut(cell as usize)?.take()?;
        self.free_list.push(cell);
        self.len -= 1;
        Some(value)
    }

    /// Empties a cell, running the destructor on its value.
    ///
    /// Returns `false` if the cell was not occupied.
    pub fn release(&mut self, cell: u32) -> bool {
        let Some(value) = self.take(cell) else {
            return false;
        };
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(value);
        }
        true
    }
}

/// Type-erased pool interface used by the world's registry.
pub(crate) trait ErasedPool {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn release(&mut self, cell: u32) -> bool;
    fn name(&self) -> &'static str;
}

impl<T: 'static> ErasedPool for ComponentPool<T> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn release(&mut self, cell: u32) -> bool {
        ComponentPool::release(self, cell)
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_pool_allocate_release() {
        let mut pool: ComponentPool<u32> = ComponentPool::new("u32", 10);

        let c1 = pool.allocate(42).unwrap();
        assert_eq!(*pool.get(c1).unwrap(), 42);
        assert_eq!(pool.len(), 1);

        assert!(pool.release(c1));
        assert!(pool.get(c1).is_none());
        assert_eq!(pool.len(), 0);
        assert!(!pool.release(c1));
    }

    #[test]
    fn test_pool_full_returns_value() {
        let mut pool: ComponentPool<u8> = ComponentPool::new("u8", 2);

        pool.allocate(1).unwrap();
        pool.allocate(2).unwrap();
        assert_eq!(pool.len(), pool.capacity());
        assert_eq!(pool.allocate(3), Err(3));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_zero_capacity_rejects() {
        let mut pool: ComponentPool<u8> = ComponentPool::new("u8", 0);
        assert_eq!(pool.allocate(1), Err(1));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_pool_reuse_lifo() {
        let mut pool: ComponentPool<u32> = ComponentPool::new("u32", 3);

        let a = pool.allocate(1).unwrap();
        let b = pool.allocate(2).unwrap();
        assert_eq!((a, b), (0, 1));

        pool.release(a);
        let c = pool.allocate(3).unwrap();
        assert_eq!(c, a);
        assert_eq!(*pool.get(c).unwrap(), 3);

        // Untouched tail is used once the free list is empty
        assert_eq!(pool.allocate(4).unwrap(), 2);
    }

    #[test]
    fn test_destructor_runs_once_per_release() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut pool: ComponentPool<u32> = ComponentPool::with_destructor(
            "u32",
            4,
            Box::new(move |v| sink.borrow_mut().push(v)),
        );

        let a = pool.allocate(10).unwrap();
        let b = pool.allocate(20).unwrap();
        pool.allocate(30).unwrap();

        assert_eq!(pool.take(b), Some(20));
        pool.release(a);
        assert_eq!(*seen.borrow(), vec![10]);
        assert_eq!(pool.len(), 1);

        // Released cells are handed out again before the untouched tail
        assert_eq!(pool.allocate(40).unwrap(), a);
        assert_eq!(pool.allocate(50).unwrap(), b);
        assert_eq!(pool.allocate(60).unwrap(), 3);
        assert_eq!(*seen.borrow(), vec![10]);
    }
}

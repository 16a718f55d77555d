//! # Memory Management
//!
//! Pre-allocated component pools.
//!
//! ## Design Philosophy
//!
//! All pool memory is allocated once, at component registration. After that:
//! - No heap allocations on add or remove
//! - Freed cells are recycled through a free list
//! - Capacity is a hard limit, never silently raised

mod pool;

pub(crate) use pool::ErasedPool;
pub use pool::{ComponentPool, Destructor};

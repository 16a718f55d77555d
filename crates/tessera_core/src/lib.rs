//! # Tessera Core
//!
//! Entity Component System runtime with fixed capacities:
//! - Generational entity handles that detect use after destruction
//! - Fixed-capacity component pools with free-list cell reuse
//! - O(1) component lookup and mask tests
//! - Phased, strictly ordered system scheduling
//!
//! ## Architecture Rules
//!
//! 1. **No growth after setup** - Pools and slots are sized once; exceeding
//!    a limit is an error
//! 2. **Stable slots** - Destroying an entity never moves another, so systems
//!    may destroy entities while scanning
//! 3. **Handles are weak** - A stored [`EntityId`] must be checked with
//!    [`World::is_valid`] before every use
//!
//! ## Example
//!
//! ```rust,ignore
//! use tessera_core::{World, WorldConfig, SystemPhase};
//!
//! let mut world = World::new(WorldConfig::new(1000, 4, 3))?;
//! world.register_component::<Transform>(1000)?;
//! world.register_system(SystemPhase::Update, movement_system)?;
//! world.run_systems(SystemPhase::Update);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod memory;

pub use config::WorldConfig;
pub use ecs::{
    Component, ComponentMask, EntityDescription, EntityId, System, SystemPhase, World,
    MAX_COMPONENT_TYPES,
};
pub use error::{EcsError, EcsResult};
pub use memory::{ComponentPool, Destructor};

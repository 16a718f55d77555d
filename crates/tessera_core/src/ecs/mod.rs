//! # Entity Component System
//!
//! A fixed-capacity ECS built around a scan of stable entity slots.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation or component registration
//! - Entity IDs are slot indices with generation counters
//! - Component membership is a 64-bit mask, so eligibility is one AND
//! - Systems walk the slot table and filter by mask; there is no archetype
//!   index to keep consistent when entities are destroyed mid-scan

mod component;
mod entity;
mod mask;
mod system;
mod table;
mod world;

pub use component::Component;
pub use entity::EntityId;
pub use mask::{ComponentMask, MAX_COMPONENT_TYPES};
pub use system::{System, SystemPhase};
pub use world::{EntityDescription, World};

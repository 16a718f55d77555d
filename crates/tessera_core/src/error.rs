//! # ECS Error Types
//!
//! All errors that can occur while driving a [`World`](crate::World).
//!
//! Setup errors (registration, configuration) are returned immediately and
//! callers usually treat them as fatal. Per-tick errors leave the world in
//! exactly the state it had before the failed call.

use crate::ecs::EntityId;
use thiserror::Error;

/// Errors that can occur in the ECS runtime.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The handle is out of range, refers to a free slot, or carries an old
    /// generation.
    #[error("invalid or stale entity handle: {0}")]
    InvalidHandle(EntityId),

    /// A component id was registered twice.
    #[error("component id {id} already registered (as {name})")]
    AlreadyRegistered {
        /// The component id.
        id: u8,
        /// Name of the type that holds the id.
        name: &'static str,
    },

    /// The component type has no pool in this world.
    #[error("component {name} (id {id}) is not registered")]
    UnregisteredComponent {
        /// The component id.
        id: u8,
        /// Name of the requested type.
        name: &'static str,
    },

    /// The component id does not fit the world's configured type count.
    #[error("component id {id} out of range: world supports {max} component types")]
    ComponentIdOutOfRange {
        /// The component id.
        id: u8,
        /// Configured `max_component_types`.
        max: u8,
    },

    /// Every cell of the component pool is occupied.
    #[error("component pool for {name} exhausted: capacity {capacity}")]
    PoolExhausted {
        /// Name of the component type.
        name: &'static str,
        /// Fixed pool capacity.
        capacity: u32,
    },

    /// Every entity slot is live.
    #[error("entity capacity exhausted: {max_entities} slots in use")]
    CapacityExhausted {
        /// Configured `max_entities`.
        max_entities: u32,
    },

    /// The entity already owns an instance of this component.
    #[error("entity {entity} already has component {name}")]
    AlreadyPresent {
        /// The entity.
        entity: EntityId,
        /// Name of the component type.
        name: &'static str,
    },

    /// The entity does not own an instance of this component.
    #[error("entity {entity} has no component {name}")]
    NotPresent {
        /// The entity.
        entity: EntityId,
        /// Name of the component type.
        name: &'static str,
    },

    /// More systems than `max_systems` were registered.
    #[error("system capacity exhausted: {max} systems registered")]
    SystemCapacityExhausted {
        /// Configured `max_systems`.
        max: u32,
    },

    /// Invalid world configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for ECS operations.
pub type EcsResult<T> = Result<T, EcsError>;

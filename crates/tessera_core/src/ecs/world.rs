//! # ECS World
//!
//! The central container for all entities, component pools and systems.
//! Entity slots are pre-allocated at creation; each pool is pre-allocated
//! when its component type is registered.

use super::component::Component;
use super::entity::EntityId;
use super::mask::ComponentMask;
use super::system::{Schedule, System, SystemPhase};
use super::table::EntityTable;
use crate::config::WorldConfig;
use crate::error::{EcsError, EcsResult};
use crate::memory::{ComponentPool, ErasedPool};
use std::fmt;
use tracing::{debug, trace, warn};

type PoolSlots = [Option<Box<dyn ErasedPool>>];

fn typed_pool<C: Component>(pools: &PoolSlots) -> Option<&ComponentPool<C>> {
    pools
        .get(usize::from(C::ID))?
        .as_ref()?
        .as_any()
        .downcast_ref::<ComponentPool<C>>()
}

fn typed_pool_mut<C: Component>(pools: &mut PoolSlots) -> Option<&mut ComponentPool<C>> {
    pools
        .get_mut(usize::from(C::ID))?
        .as_mut()?
        .as_any_mut()
        .downcast_mut::<ComponentPool<C>>()
}

fn unregistered<C: Component>() -> EcsError {
    EcsError::UnregisteredComponent {
        id: C::ID,
        name: C::name(),
    }
}

/// The ECS World - container for all game state.
///
/// The world has fixed capacities set at creation (see [`WorldConfig`]).
/// None of them can be changed at runtime: exceeding one is an error, never
/// silent growth.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(WorldConfig::new(1000, 4, 3))?;
/// world.register_component::<Transform>(1000)?;
/// world.register_system(SystemPhase::Update, movement_system)?;
///
/// let entity = world.create_entity()?;
/// world.add_component(entity, Transform { x: 0.0, y: 0.0 })?;
///
/// world.run_systems(SystemPhase::Update);
/// ```
pub struct World {
    /// Capacity limits.
    config: WorldConfig,
    /// All entity slots (pre-allocated).
    entities: EntityTable,
    /// One pool per registered component id.
    pools: Box<PoolSlots>,
    /// Registered systems by phase.
    schedule: Schedule,
}

impl World {
    /// Creates a new world with the given capacities.
    ///
    /// This pre-allocates the entity slots, the per-slot cell table and the
    /// entity free list.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidConfig`] if the configuration is invalid.
    pub fn new(config: WorldConfig) -> EcsResult<Self> {
        config.validate()?;

        let pools: Box<PoolSlots> = (0..config.max_component_types)
            .map(|_| None)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            max_entities = config.max_entities,
            max_component_types = config.max_component_types,
            max_systems = config.max_systems,
            "created world"
        );

        Ok(Self {
            config,
            entities: EntityTable::new(config.max_entities, config.max_component_types),
            pools,
            schedule: Schedule::default(),
        })
    }

    /// Returns the capacities this world was created with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the maximum number of entities.
    #[inline]
    #[must_use]
    pub const fn max_entities(&self) -> u32 {
        self.config.max_entities
    }

    /// Returns the number of currently alive entities.
    #[inline]
    #[must_use]
    pub const fn live_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Number of slots ever handed out, live or dead.
    ///
    /// Systems scan `0..entity_count_upper_bound()` and skip dead slots:
    /// slot indices are stable identities, not a packed array.
    #[inline]
    #[must_use]
    pub const fn entity_count_upper_bound(&self) -> u32 {
        self.entities.upper_bound()
    }

    // =========================================================================
    // Component registry
    // =========================================================================

    /// Registers component type `C` with a pool of `capacity` cells.
    ///
    /// # Errors
    ///
    /// - [`EcsError::ComponentIdOutOfRange`] if `C::ID` is not below
    ///   `max_component_types`
    /// - [`EcsError::AlreadyRegistered`] if the id already has a pool
    pub fn register_component<C: Component>(&mut self, capacity: u32) -> EcsResult<()> {
        self.install_pool(ComponentPool::<C>::new(C::name(), capacity))
    }

    /// Registers component type `C` with a destructor hook.
    ///
    /// The hook receives every instance of `C` that is removed, destroyed
    /// with its entity, or dropped with the world, exactly once.
    ///
    /// # Errors
    ///
    /// Same as [`register_component`](Self::register_component).
    pub fn register_component_with_destructor<C, F>(
        &mut self,
        capacity: u32,
        destructor: F,
    ) -> EcsResult<()>
    where
        C: Component,
        F: FnMut(C) + 'static,
    {
        self.install_pool(ComponentPool::<C>::with_destructor(
            C::name(),
            capacity,
            Box::new(destructor),
        ))
    }

    fn install_pool<C: Component>(&mut self, pool: ComponentPool<C>) -> EcsResult<()> {
        if C::ID >= self.config.max_component_types {
            return Err(EcsError::ComponentIdOutOfRange {
                id: C::ID,
                max: self.config.max_component_types,
            });
        }

        let slot = &mut self.pools[usize::from(C::ID)];
        if let Some(existing) = slot {
            return Err(EcsError::AlreadyRegistered {
                id: C::ID,
                name: existing.name(),
            });
        }

        debug!(
            component = C::name(),
            id = C::ID,
            capacity = pool.capacity(),
            "registered component"
        );
        *slot = Some(Box::new(pool));
        Ok(())
    }

    /// Returns whether `C` has a pool in this world.
    #[inline]
    #[must_use]
    pub fn is_registered<C: Component>(&self) -> bool {
        typed_pool::<C>(&self.pools).is_some()
    }

    /// Number of live instances of `C`, or `None` if `C` is unregistered.
    #[must_use]
    pub fn pool_len<C: Component>(&self) -> Option<u32> {
        typed_pool::<C>(&self.pools).map(ComponentPool::len)
    }

    /// Pool capacity of `C`, or `None` if `C` is unregistered.
    #[must_use]
    pub fn pool_capacity<C: Component>(&self) -> Option<u32> {
        typed_pool::<C>(&self.pools).map(ComponentPool::capacity)
    }

    // =========================================================================
    // Entity lifecycle
    // =========================================================================

    /// Creates a new entity with no components.
    ///
    /// This is a **zero-allocation** operation - it reuses pre-allocated slots.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::CapacityExhausted`] if every slot is live.
    pub fn create_entity(&mut self) -> EcsResult<EntityId> {
        let Some(entity) = self.entities.allocate() else {
            warn!(
                max_entities = self.config.max_entities,
                "entity capacity exhausted"
            );
            return Err(EcsError::CapacityExhausted {
                max_entities: self.config.max_entities,
            });
        };
        trace!(%entity, "created entity");
        Ok(entity)
    }

    /// Destroys an entity, releasing every component it owns.
    ///
    /// Destructor hooks run once per released component. The slot's
    /// generation is bumped, so every copy of `entity` becomes stale. Other
    /// slots are untouched, which makes this safe to call from a system that
    /// is scanning the slot table.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::InvalidHandle`] if `entity` is not live.
    pub fn destroy_entity(&mut self, entity: EntityId) -> EcsResult<()> {
        let Some(mask) = self.mask_of(entity) else {
            return Err(EcsError::InvalidHandle(entity));
        };

        for id in mask.iter() {
            let Some(cell) = self.entities.detach(entity.index(), id) else {
                continue;
            };
            if let Some(pool) = self.pools[usize::from(id)].as_mut() {
                pool.release(cell);
            }
        }

        self.entities.free(entity);
        trace!(%entity, "destroyed entity");
        Ok(())
    }

    /// Checks whether `entity` refers to a live entity.
    ///
    /// Every handle read back out of component data must pass this check
    /// before use: its referent may have been destroyed since it was stored.
    #[inline]
    #[must_use]
    pub fn is_valid(&self, entity: EntityId) -> bool {
        self.entities.is_valid(entity)
    }

    /// Returns the handle of the live entity in slot `index`.
    ///
    /// `None` for free slots and indices past the upper bound.
    #[inline]
    #[must_use]
    pub fn entity_at(&self, index: u32) -> Option<EntityId> {
        self.entities.handle_at(index)
    }

    // =========================================================================
    // Component access
    // =========================================================================

    /// Moves `value` into a pool cell and attaches it to `entity`.
    ///
    /// A failed call leaves the world unchanged.
    ///
    /// # Errors
    ///
    /// Checked in this order:
    /// - [`EcsError::InvalidHandle`] if `entity` is not live
    /// - [`EcsError::UnregisteredComponent`] if `C` has no pool
    /// - [`EcsError::AlreadyPresent`] if `entity` already has a `C`
    /// - [`EcsError::PoolExhausted`] if every cell of the pool is occupied
    pub fn add_component<C: Component>(&mut self, entity: EntityId, value: C) -> EcsResult<()> {
        let Some(slot) = self.entities.slot(entity) else {
            return Err(EcsError::InvalidHandle(entity));
        };
        let present = slot.mask.contains(C::ID);

        let pool = typed_pool_mut::<C>(&mut self.pools).ok_or_else(unregistered::<C>)?;
        if present {
            return Err(EcsError::AlreadyPresent {
                entity,
                name: C::name(),
            });
        }

        let cell = match pool.allocate(value) {
            Ok(cell) => cell,
            Err(_) => {
                warn!(
                    component = C::name(),
                    capacity = pool.capacity(),
                    "component pool exhausted"
                );
                return Err(EcsError::PoolExhausted {
                    name: C::name(),
                    capacity: pool.capacity(),
                });
            }
        };

        self.entities.attach(entity.index(), C::ID, cell);
        Ok(())
    }

    /// Detaches `C` from `entity` and runs its destructor hook.
    ///
    /// # Errors
    ///
    /// - [`EcsError::InvalidHandle`] if `entity` is not live
    /// - [`EcsError::UnregisteredComponent`] if `C` has no pool
    /// - [`EcsError::NotPresent`] if `entity` has no `C`
    pub fn remove_component<C: Component>(&mut self, entity: EntityId) -> EcsResult<()> {
        let cell = self.detach::<C>(entity)?;
        if let Some(pool) = typed_pool_mut::<C>(&mut self.pools) {
            pool.release(cell);
        }
        Ok(())
    }

    /// Detaches `C` from `entity` and hands the value back.
    ///
    /// The destructor hook does not run: ownership moves to the caller.
    ///
    /// # Errors
    ///
    /// Same as [`remove_component`](Self::remove_component).
    pub fn take_component<C: Component>(&mut self, entity: EntityId) -> EcsResult<C> {
        let cell = self.detach::<C>(entity)?;
        typed_pool_mut::<C>(&mut self.pools)
            .and_then(|pool| pool.take(cell))
            .ok_or(EcsError::NotPresent {
                entity,
                name: C::name(),
            })
    }

    fn detach<C: Component>(&mut self, entity: EntityId) -> EcsResult<u32> {
        if !self.entities.is_valid(entity) {
            return Err(EcsError::InvalidHandle(entity));
        }
        if typed_pool::<C>(&self.pools).is_none() {
            return Err(unregistered::<C>());
        }
        self.entities
            .detach(entity.index(), C::ID)
            .ok_or(EcsError::NotPresent {
                entity,
                name: C::name(),
            })
    }

    /// Gets a reference to the `C` of `entity`.
    ///
    /// `None` if the handle is stale, `C` is unregistered or absent.
    #[inline]
    #[must_use]
    pub fn get_component<C: Component>(&self, entity: EntityId) -> Option<&C> {
        if !self.entities.is_valid(entity) {
            return None;
        }
        let cell = self.entities.cell(entity.index(), C::ID)?;
        typed_pool::<C>(&self.pools)?.get(cell)
    }

    /// Gets a mutable reference to the `C` of `entity`.
    ///
    /// `None` if the handle is stale, `C` is unregistered or absent.
    #[inline]
    pub fn get_component_mut<C: Component>(&mut self, entity: EntityId) -> Option<&mut C> {
        if !self.entities.is_valid(entity) {
            return None;
        }
        let cell = self.entities.cell(entity.index(), C::ID)?;
        typed_pool_mut::<C>(&mut self.pools)?.get_mut(cell)
    }

    /// Checks whether `entity` is live and has a `C`.
    ///
    /// Agrees with [`get_component`](Self::get_component): a type that shares
    /// its id with the registered one is never reported present.
    #[inline]
    #[must_use]
    pub fn has_component<C: Component>(&self, entity: EntityId) -> bool {
        self.has_component_id(entity, C::ID) && typed_pool::<C>(&self.pools).is_some()
    }

    /// Checks whether `entity` is live and has the component with id `id`.
    #[inline]
    #[must_use]
    pub fn has_component_id(&self, entity: EntityId, id: u8) -> bool {
        self.entities
            .slot(entity)
            .is_some_and(|slot| slot.mask.contains(id))
    }

    /// Checks whether `entity` is live and has every component in `mask`.
    ///
    /// One comparison regardless of how many components the mask names.
    #[inline]
    #[must_use]
    pub fn has_mask(&self, entity: EntityId, mask: ComponentMask) -> bool {
        self.entities
            .slot(entity)
            .is_some_and(|slot| slot.mask.contains_all(mask))
    }

    /// Returns the component mask of a live entity.
    #[inline]
    #[must_use]
    pub fn mask_of(&self, entity: EntityId) -> Option<ComponentMask> {
        self.entities.slot(entity).map(|slot| slot.mask)
    }

    /// Describes a live entity: its handle and the names of its components.
    #[must_use]
    pub fn describe_entity(&self, entity: EntityId) -> Option<EntityDescription> {
        let mask = self.mask_of(entity)?;
        let components = mask
            .iter()
            .filter_map(|id| self.pools.get(usize::from(id))?.as_ref())
            .map(|pool| pool.name())
            .collect();
        Some(EntityDescription { entity, components })
    }

    // =========================================================================
    // Systems
    // =========================================================================

    /// Appends `system` to `phase`. Systems of a phase run in registration
    /// order. Registering the same callable twice runs it twice.
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::SystemCapacityExhausted`] once `max_systems`
    /// systems are registered across all phases.
    pub fn register_system<S: System + 'static>(
        &mut self,
        phase: SystemPhase,
        system: S,
    ) -> EcsResult<()> {
        if self.schedule.registered() >= self.config.max_systems {
            return Err(EcsError::SystemCapacityExhausted {
                max: self.config.max_systems,
            });
        }

        let name = std::any::type_name::<S>();
        debug!(%phase, system = name, "registered system");
        self.schedule.push(phase, name, Box::new(system));
        Ok(())
    }

    /// Number of systems registered for `phase`.
    #[must_use]
    pub fn system_count(&self, phase: SystemPhase) -> usize {
        self.schedule.len(phase)
    }

    /// Runs every system of `phase` once, in registration order.
    pub fn run_systems(&mut self, phase: SystemPhase) {
        let mut records = self.schedule.take(phase);
        for record in &mut records {
            trace!(%phase, system = record.name, order = record.order, "running system");
            record.system.run(self);
        }
        self.schedule.restore(phase, records);
    }

    /// Runs a single system outside the phase lists.
    pub fn run_system<S: System>(&mut self, mut system: S) {
        system.run(self);
    }
}

impl Drop for World {
    /// Destroys every live entity so destructor hooks run before the pools
    /// are freed.
    fn drop(&mut self) {
        for index in 0..self.entities.upper_bound() {
            if let Some(entity) = self.entities.handle_at(index) {
                // Cannot fail: the handle was just read from a live slot
                let _ = self.destroy_entity(entity);
            }
        }
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("live", &self.live_count())
            .field("upper_bound", &self.entity_count_upper_bound())
            .finish_non_exhaustive()
    }
}

/// Debug listing of one entity's components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityDescription {
    /// The entity.
    pub entity: EntityId,
    /// Component names in id order.
    pub components: Vec<&'static str>,
}

impl fmt::Display for EntityDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity {} [{}]", self.entity, self.components.join(", "))
    }
}

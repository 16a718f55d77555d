//! # Tessera Demo
//!
//! A ship, a homing missile, and the systems that move, steer and print them.
//! This crate is application glue: it only uses the public `tessera_core`
//! contract.

pub mod components;
pub mod systems;

use components::{Sprite, Target, Transform, Velocity};
use tessera_core::{EcsResult, EntityId, World};

/// Pool sizes per component type.
pub const TRANSFORM_CAPACITY: u32 = 1000;
/// Velocity pool size.
pub const VELOCITY_CAPACITY: u32 = 200;
/// Sprite pool size.
pub const SPRITE_CAPACITY: u32 = 1000;
/// Target pool size: at most this many missiles in flight.
pub const TARGET_CAPACITY: u32 = 10;

/// Registers every demo component type.
///
/// # Errors
///
/// Returns an error if a component is already registered or the world
/// supports too few component types.
pub fn register_components(world: &mut World) -> EcsResult<()> {
    world.register_component::<Transform>(TRANSFORM_CAPACITY)?;
    world.register_component::<Velocity>(VELOCITY_CAPACITY)?;
    world.register_component::<Sprite>(SPRITE_CAPACITY)?;
    world.register_component::<Target>(TARGET_CAPACITY)?;
    Ok(())
}

/// Spawns a drawable ship moving at a constant velocity.
///
/// # Errors
///
/// Returns an error if an entity slot or pool cell is unavailable.
pub fn spawn_ship(
    world: &mut World,
    transform: Transform,
    velocity: Velocity,
    sprite: Sprite,
) -> EcsResult<EntityId> {
    let ship = world.create_entity()?;
    world.add_component(ship, transform)?;
    world.add_component(ship, velocity)?;
    world.add_component(ship, sprite)?;
    Ok(ship)
}

/// Spawns a drawable missile at rest, homing in on `target`.
///
/// # Errors
///
/// Returns an error if an entity slot or pool cell is unavailable.
pub fn spawn_missile(
    world: &mut World,
    transform: Transform,
    sprite: Sprite,
    target: EntityId,
) -> EcsResult<EntityId> {
    let missile = world.create_entity()?;
    world.add_component(missile, transform)?;
    world.add_component(missile, Velocity::default())?;
    world.add_component(missile, sprite)?;
    world.add_component(missile, Target { entity: target })?;
    Ok(missile)
}

//! Shared component fixtures for integration tests.

#![allow(dead_code)]

use bytemuck::{Pod, Zeroable};
use tessera_core::{Component, EntityId, World, WorldConfig};

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Component for Position {
    const ID: u8 = 0;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

impl Component for Velocity {
    const ID: u8 = 1;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Health(pub u32);

impl Component for Health {
    const ID: u8 = 2;
}

/// Holds a weak reference to another entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Follow {
    pub leader: EntityId,
}

impl Component for Follow {
    const ID: u8 = 3;
}

/// Owns heap data, so it exercises destructor hooks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag(pub String);

impl Component for Tag {
    const ID: u8 = 4;
}

pub const COMPONENT_TYPES: u8 = 8;

/// A world with `Position`, `Velocity`, `Health` and `Follow` registered.
pub fn world(max_entities: u32) -> World {
    let mut world = World::new(WorldConfig::new(max_entities, COMPONENT_TYPES, 16)).unwrap();
    world.register_component::<Position>(max_entities).unwrap();
    world.register_component::<Velocity>(max_entities).unwrap();
    world.register_component::<Health>(max_entities).unwrap();
    world.register_component::<Follow>(max_entities).unwrap();
    world
}

/// Handles of every live entity, in slot order.
pub fn live_entities(world: &World) -> Vec<EntityId> {
    (0..world.entity_count_upper_bound())
        .filter_map(|index| world.entity_at(index))
        .collect()
}

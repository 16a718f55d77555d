//! # Demo Components

use bytemuck::{Pod, Zeroable};
use tessera_core::{Component, EntityId};

/// Number of component ids the demo uses.
pub const COMPONENT_COUNT: u8 = 4;

/// Position in the plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Transform {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Component for Transform {
    const ID: u8 = 0;
}

/// Displacement applied once per update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Velocity {
    /// X displacement per tick.
    pub dx: f32,
    /// Y displacement per tick.
    pub dy: f32,
}

impl Component for Velocity {
    const ID: u8 = 1;
}

/// Something to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    /// Texture id.
    pub gl_id: u32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Display name.
    pub name: &'static str,
}

impl Component for Sprite {
    const ID: u8 = 2;
}

/// Marks a missile and names what it chases.
///
/// The handle is weak: the target may be destroyed by anyone at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct Target {
    /// The entity being chased.
    pub entity: EntityId,
}

impl Component for Target {
    const ID: u8 = 3;
}

//! # Demo Systems
//!
//! Every system scans the slot table and gates on its mask alone.

use crate::components::{Sprite, Target, Transform, Velocity};
use tessera_core::{ComponentMask, EcsResult, EntityId, SystemPhase, World};

/// Distance a missile covers per tick.
pub const MISSILE_SPEED: f32 = 0.25;

/// A missile closer than this to its target detonates.
pub const DETONATION_RADIUS: f32 = 0.2;

/// Entities that move.
pub const MOVEMENT_MASK: ComponentMask = ComponentMask::EMPTY
    .with::<Transform>()
    .with::<Velocity>();

/// Entities that are drawn.
pub const SPRITE_MASK: ComponentMask = ComponentMask::EMPTY
    .with::<Transform>()
    .with::<Sprite>();

/// Entities that home in on a target.
pub const MISSILE_MASK: ComponentMask = ComponentMask::EMPTY
    .with::<Transform>()
    .with::<Velocity>()
    .with::<Target>();

/// The live entity in slot `index`, if it matches `mask`.
fn matching(world: &World, index: u32, mask: ComponentMask) -> Option<EntityId> {
    world
        .entity_at(index)
        .filter(|&entity| world.has_mask(entity, mask))
}

/// Adds each entity's velocity to its transform.
pub fn movement_system(world: &mut World) {
    for index in 0..world.entity_count_upper_bound() {
        let Some(entity) = matching(world, index, MOVEMENT_MASK) else {
            continue;
        };
        let Some(velocity) = world.get_component::<Velocity>(entity).copied() else {
            continue;
        };
        if let Some(transform) = world.get_component_mut::<Transform>(entity) {
            transform.x += velocity.dx;
            transform.y += velocity.dy;
        }
    }
}

/// What happened to one missile during a guidance pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Guidance {
    /// The missile.
    pub missile: EntityId,
    /// The target it chased.
    pub target: EntityId,
    /// Distance to the target before detonation.
    pub distance: f32,
    /// Whether missile and target were destroyed.
    pub detonated: bool,
}

/// Steers every missile toward its target at [`MISSILE_SPEED`].
///
/// Missiles whose target is gone or has no transform are left alone. A
/// missile within [`DETONATION_RADIUS`] is destroyed together with its target.
///
/// # Errors
///
/// Propagates ECS errors from destroying entities.
pub fn guide_missiles(world: &mut World) -> EcsResult<Vec<Guidance>> {
    let mut reports = Vec::new();

    for index in 0..world.entity_count_upper_bound() {
        let Some(missile) = matching(world, index, MISSILE_MASK) else {
            continue;
        };
        let Some(&Target { entity: target }) = world.get_component::<Target>(missile) else {
            continue;
        };

        // Stored handle: the target may have been destroyed since
        if !world.is_valid(target) {
            continue;
        }
        let Some(aim) = world.get_component::<Transform>(target).copied() else {
            continue;
        };
        let Some(position) = world.get_component::<Transform>(missile).copied() else {
            continue;
        };

        let tx = aim.x - position.x;
        let ty = aim.y - position.y;
        let distance = tx.hypot(ty);

        if distance > 0.0 {
            if let Some(velocity) = world.get_component_mut::<Velocity>(missile) {
                velocity.dx = tx / distance * MISSILE_SPEED;
                velocity.dy = ty / distance * MISSILE_SPEED;
            }
        }

        let detonated = distance < DETONATION_RADIUS;
        if detonated {
            world.destroy_entity(missile)?;
            // A missile aimed at itself is already gone
            if world.is_valid(target) {
                world.destroy_entity(target)?;
            }
        }

        reports.push(Guidance {
            missile,
            target,
            distance,
            detonated,
        });
    }

    Ok(reports)
}

/// One line per drawable entity.
#[must_use]
pub fn sprite_lines(world: &World) -> Vec<String> {
    (0..world.entity_count_upper_bound())
        .filter_map(|index| matching(world, index, SPRITE_MASK))
        .filter_map(|entity| sprite_line(world, entity))
        .collect()
}

fn sprite_line(world: &World, entity: EntityId) -> Option<String> {
    let transform = world.get_component::<Transform>(entity)?;
    let sprite = world.get_component::<Sprite>(entity)?;
    Some(format!(
        "id {} ({}), rot {:.6}, x {:.6}, y {:.6}",
        sprite.gl_id, sprite.name, sprite.rotation, transform.x, transform.y
    ))
}

/// Number of live entities that have a transform.
#[must_use]
pub fn count_transforms(world: &World) -> usize {
    (0..world.entity_count_upper_bound())
        .filter_map(|index| world.entity_at(index))
        .filter(|&entity| world.has_component::<Transform>(entity))
        .count()
}

/// Registers the demo systems: movement then guidance on update, sprites on
/// render.
///
/// # Errors
///
/// Returns an error if the world's system capacity is too small.
pub fn register_systems(world: &mut World) -> EcsResult<()> {
    world.register_system(SystemPhase::Update, movement_system)?;
    world.register_system(SystemPhase::Update, |world: &mut World| {
        match guide_missiles(world) {
            Ok(reports) => {
                for report in reports {
                    println!("target distance {:.6}", report.distance);
                    if report.detonated {
                        println!("BOOM!");
                    }
                }
            }
            Err(err) => eprintln!("missile guidance failed: {err}"),
        }
    })?;
    world.register_system(SystemPhase::Render, |world: &mut World| {
        for line in sprite_lines(world) {
            println!("{line}");
        }
    })?;
    Ok(())
}

//! Ship-and-missile scenario driven through the public demo API.

use tessera_core::{SystemPhase, World, WorldConfig};
use tessera_demo::components::{Sprite, Target, Transform, Velocity, COMPONENT_COUNT};
use tessera_demo::systems::{
    count_transforms, guide_missiles, movement_system, register_systems, sprite_lines,
};
use tessera_demo::{register_components, spawn_missile, spawn_ship};

const EPSILON: f32 = 1e-5;

fn demo_world() -> World {
    let mut world = World::new(WorldConfig::new(1000, COMPONENT_COUNT, 3)).unwrap();
    register_components(&mut world).unwrap();
    world
}

fn sprite(gl_id: u32, name: &'static str) -> Sprite {
    Sprite {
        gl_id,
        rotation: 0.0,
        name,
    }
}

#[test]
fn test_movement_adds_velocity() {
    let mut world = demo_world();
    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity { dx: 1.0, dy: 0.0 },
        sprite(1, "ship"),
    )
    .unwrap();

    movement_system(&mut world);

    let t = world.get_component::<Transform>(ship).unwrap();
    assert_eq!(*t, Transform { x: 1.0, y: 0.0 });
}

#[test]
fn test_guidance_steers_at_missile_speed() {
    let mut world = demo_world();
    let ship = spawn_ship(
        &mut world,
        Transform { x: 1.0, y: 0.0 },
        Velocity::default(),
        sprite(1, "ship"),
    )
    .unwrap();
    let missile = spawn_missile(
        &mut world,
        Transform { x: 4.0, y: 4.0 },
        sprite(2, "missile"),
        ship,
    )
    .unwrap();

    let reports = guide_missiles(&mut world).unwrap();
    assert_eq!(reports.len(), 1);
    assert!((reports[0].distance - 5.0).abs() < EPSILON);
    assert!(!reports[0].detonated);

    let v = world.get_component::<Velocity>(missile).unwrap();
    assert!((v.dx + 0.15).abs() < EPSILON);
    assert!((v.dy + 0.2).abs() < EPSILON);
}

#[test]
fn test_missile_detonates_and_destroys_both() {
    let mut world = demo_world();
    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity { dx: 0.1, dy: 0.0 },
        sprite(1, "ship"),
    )
    .unwrap();
    let missile = spawn_missile(
        &mut world,
        Transform { x: 4.0, y: 4.0 },
        sprite(2, "missile"),
        ship,
    )
    .unwrap();
    assert_eq!(world.live_count(), 2);

    let mut detonated = false;
    for _ in 0..1000 {
        movement_system(&mut world);
        if guide_missiles(&mut world).unwrap().iter().any(|r| r.detonated) {
            detonated = true;
            break;
        }
    }

    assert!(detonated);
    assert!(!world.is_valid(ship));
    assert!(!world.is_valid(missile));
    assert_eq!(world.live_count(), 0);
    assert_eq!(count_transforms(&world), 0);
}

#[test]
fn test_missile_ignores_destroyed_target() {
    let mut world = demo_world();
    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity::default(),
        sprite(1, "ship"),
    )
    .unwrap();
    let missile = spawn_missile(
        &mut world,
        Transform { x: 4.0, y: 4.0 },
        sprite(2, "missile"),
        ship,
    )
    .unwrap();

    world.destroy_entity(ship).unwrap();
    // The freed slot is reused by an unrelated entity
    let stranger = spawn_ship(
        &mut world,
        Transform { x: 4.0, y: 4.1 },
        Velocity::default(),
        sprite(3, "stranger"),
    )
    .unwrap();
    assert_eq!(stranger.index(), ship.index());

    let reports = guide_missiles(&mut world).unwrap();
    assert!(reports.is_empty());
    assert!(world.is_valid(missile));
    assert!(world.is_valid(stranger));
    assert_eq!(
        *world.get_component::<Velocity>(missile).unwrap(),
        Velocity::default()
    );
}

#[test]
fn test_self_targeting_missile_does_not_stall_later_missiles() {
    let mut world = demo_world();
    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity::default(),
        sprite(1, "ship"),
    )
    .unwrap();
    let rogue = spawn_missile(
        &mut world,
        Transform { x: 9.0, y: 9.0 },
        sprite(2, "rogue"),
        ship,
    )
    .unwrap();
    world.get_component_mut::<Target>(rogue).unwrap().entity = rogue;
    let missile = spawn_missile(
        &mut world,
        Transform { x: 3.0, y: 4.0 },
        sprite(3, "missile"),
        ship,
    )
    .unwrap();
    assert!(rogue.index() < missile.index());

    let reports = guide_missiles(&mut world).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports[0].detonated);
    assert_eq!(reports[0].missile, rogue);
    assert_eq!(reports[1].missile, missile);
    assert!(!reports[1].detonated);

    assert!(!world.is_valid(rogue));
    assert!(world.is_valid(ship));
    let v = world.get_component::<Velocity>(missile).unwrap();
    assert!((v.dx + 0.15).abs() < EPSILON);
    assert!((v.dy + 0.2).abs() < EPSILON);
}

#[test]
fn test_registered_systems_run_to_completion() {
    let mut world = demo_world();
    register_systems(&mut world).unwrap();
    assert_eq!(world.system_count(SystemPhase::Update), 2);
    assert_eq!(world.system_count(SystemPhase::Render), 1);

    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity { dx: 0.1, dy: 0.0 },
        sprite(1, "ship"),
    )
    .unwrap();
    spawn_missile(
        &mut world,
        Transform { x: 4.0, y: 4.0 },
        sprite(2, "missile"),
        ship,
    )
    .unwrap();

    let mut ticks = 0;
    while count_transforms(&world) > 0 && ticks < 1000 {
        for phase in SystemPhase::ALL {
            world.run_systems(phase);
        }
        ticks += 1;
    }

    assert!(ticks < 1000);
    assert_eq!(world.live_count(), 0);
}

#[test]
fn test_sprite_lines_format() {
    let mut world = demo_world();
    spawn_ship(
        &mut world,
        Transform { x: 0.5, y: -1.0 },
        Velocity::default(),
        sprite(7, "ship"),
    )
    .unwrap();

    assert_eq!(
        sprite_lines(&world),
        vec!["id 7 (ship), rot 0.000000, x 0.500000, y -1.000000".to_string()]
    );
}

//! # Tessera Missile Demo
//!
//! Spawns a ship and a missile chasing it, then runs update and render
//! phases until nothing with a transform is left.
//!
//! ```bash
//! # Default capacities
//! missile_demo
//!
//! # Capacities from a TOML file
//! missile_demo world.toml
//! ```

use std::error::Error;
use tessera_core::{SystemPhase, World, WorldConfig};
use tessera_demo::components::{Sprite, Transform, Velocity, COMPONENT_COUNT};
use tessera_demo::systems::{count_transforms, register_systems};
use tessera_demo::{register_components, spawn_missile, spawn_ship};

/// Safety net against a missile that never catches its target.
const MAX_TICKS: u32 = 10_000;

fn load_config() -> Result<WorldConfig, Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            Ok(WorldConfig::from_toml_str(&source)?)
        }
        None => Ok(WorldConfig::new(1000, COMPONENT_COUNT, 3)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut world = World::new(load_config()?)?;
    register_components(&mut world)?;
    register_systems(&mut world)?;

    let ship = spawn_ship(
        &mut world,
        Transform { x: 0.0, y: 0.0 },
        Velocity { dx: 0.1, dy: 0.0 },
        Sprite {
            gl_id: 1,
            rotation: 0.0,
            name: "ship",
        },
    )?;
    let missile = spawn_missile(
        &mut world,
        Transform { x: 4.0, y: 4.0 },
        Sprite {
            gl_id: 2,
            rotation: 0.0,
            name: "missile",
        },
        ship,
    )?;

    for entity in [ship, missile] {
        if let Some(description) = world.describe_entity(entity) {
            println!("{description}");
        }
    }

    let mut ticks = 0;
    while count_transforms(&world) > 0 && ticks < MAX_TICKS {
        for phase in SystemPhase::ALL {
            world.run_systems(phase);
        }
        println!("------------------");
        ticks += 1;
    }

    println!("finished after {ticks} ticks, {} entities live", world.live_count());
    Ok(())
}

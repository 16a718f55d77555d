//! # Systems and Scheduling
//!
//! Systems are callables that take the world explicitly. They are grouped
//! by phase and run strictly in registration order.

use super::world::World;
use std::fmt;

/// A system that operates on the world each tick.
///
/// A system normally scans `0..world.entity_count_upper_bound()`, skips free
/// slots and tests [`World::has_mask`] before touching per-entity data.
pub trait System {
    /// Runs the system once.
    fn run(&mut self, world: &mut World);
}

/// Blanket implementation so closures and plain functions can be used as systems.
impl<F: FnMut(&mut World)> System for F {
    fn run(&mut self, world: &mut World) {
        (self)(world);
    }
}

/// Execution group for systems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemPhase {
    /// Simulation systems.
    Update,
    /// Presentation systems.
    Render,
}

impl SystemPhase {
    /// All phases, in their conventional per-tick order.
    pub const ALL: [Self; 2] = [Self::Update, Self::Render];

    const fn slot(self) -> usize {
        match self {
            Self::Update => 0,
            Self::Render => 1,
        }
    }
}

impl fmt::Display for SystemPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Render => f.write_str("render"),
        }
    }
}

/// A registered system.
pub(crate) struct SystemRecord {
    /// Position in the global registration sequence.
    pub(crate) order: u32,
    /// Type name of the system, for tracing.
    pub(crate) name: &'static str,
    pub(crate) system: Box<dyn System>,
}

/// Ordered system lists, one per phase.
#[derive(Default)]
pub(crate) struct Schedule {
    phases: [Vec<SystemRecord>; 2],
    registered: u32,
}

impl Schedule {
    /// Total number of systems across all phases.
    pub(crate) const fn registered(&self) -> u32 {
        self.registered
    }

    pub(crate) fn len(&self, phase: SystemPhase) -> usize {
        self.phases[phase.slot()].len()
    }

    pub(crate) fn push(&mut self, phase: SystemPhase, name: &'static str, system: Box<dyn System>) {
        let order = self.registered;
        self.phases[phase.slot()].push(SystemRecord {
            order,
            name,
            system,
        });
        self.registered += 1;
    }

    /// Detaches a phase's list so its systems can borrow the world mutably.
    pub(crate) fn take(&mut self, phase: SystemPhase) -> Vec<SystemRecord> {
        std::mem::take(&mut self.phases[phase.slot()])
    }

    /// Reattaches a list detached by [`take`](Self::take). Systems registered
    /// while it was detached keep their place after the existing ones.
    pub(crate) fn restore(&mut self, phase: SystemPhase, mut records: Vec<SystemRecord>) {
        let list = &mut self.phases[phase.slot()];
        records.append(list);
        *list = records;
    }
}

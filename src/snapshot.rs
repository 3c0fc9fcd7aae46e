use glam::Vec2;
use serde::Serialize;

use crate::ecs::components::{Evolution, Facing, Meters, PetBehavior, PetState, Position, Timers};
use crate::ecs::systems::Surroundings;
use crate::tuning::Tuning;

/// Read-only status after a tick. UI layers render from this and never
/// reach into the simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    /// Session clock in seconds. Frozen once the pet ascends.
    pub elapsed: f64,

    pub state: PetState,
    pub position: Vec2,
    pub facing_right: bool,

    pub meters: Meters,
    pub happiness_pct: f32,
    pub exhaustion_pct: f32,
    pub timers: Timers,

    pub evolution_level: u32,
    pub stage: String,
    /// Saturated time toward the next stage, 0-1.
    pub evolution_progress: f32,
    pub ascended: bool,

    pub couch: Vec2,
    pub food: Option<Vec2>,
}

impl Snapshot {
    /// Capture the pet `entity` and the props. `None` if the entity is gone.
    pub fn capture(
        world: &hecs::World,
        entity: hecs::Entity,
        tuning: &Tuning,
        tick: u64,
        elapsed: f64,
    ) -> Option<Self> {
        let mut query = world
            .query_one::<(&Position, &Facing, &PetBehavior, &Meters, &Timers, &Evolution)>(entity)
            .ok()?;
        let (pos, facing, behavior, meters, timers, evolution) = query.get()?;

        let (happiness_pct, exhaustion_pct) = meters.percentages(tuning.sleep_threshold);
        let evolution_progress = if evolution.target_time > 0.0 {
            (timers.evolution / evolution.target_time).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let around = Surroundings::read(world);

        Some(Self {
            tick,
            elapsed,
            state: behavior.state,
            position: pos.0,
            facing_right: facing.right,
            meters: *meters,
            happiness_pct,
            exhaustion_pct,
            timers: *timers,
            evolution_level: evolution.level,
            stage: tuning.stage_name(evolution.level).to_string(),
            evolution_progress,
            ascended: evolution.ascended,
            couch: around.couch,
            food: around.food,
        })
    }
}

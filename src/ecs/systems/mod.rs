pub mod behavior;
pub mod evolution;
pub mod meters;
pub mod movement;
pub mod placement;

use glam::Vec2;

use crate::ecs::components::{Couch, FoodBowl, Position};
use crate::events::SimEvent;
use crate::tuning::Tuning;
use crate::viewport::Reach;

/// Per-tick inputs shared by every system.
pub struct TickContext<'a> {
    pub dt: f32,
    /// Raw pointer position, before `pointer_scale`.
    pub pointer: Vec2,
    pub tuning: &'a Tuning,
    pub reach: &'a Reach,
}

/// Couch and food positions, read once before the pets update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surroundings {
    pub couch: Vec2,
    /// Only set while the bowl is visible.
    pub food: Option<Vec2>,
}

impl Surroundings {
    pub fn read(world: &hecs::World) -> Self {
        let food = world
            .query::<(&Position, &FoodBowl)>()
            .iter()
            .find(|(_, (_, bowl))| bowl.visible)
            .map(|(_, (pos, _))| pos.0);
        Self {
            couch: couch_position(world),
            food,
        }
    }
}

/// Deferred changes to the props, applied after the pet query is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldCmd {
    PlaceCouch,
    PlaceFood,
    HideFood,
}

/// Run all simulation systems for one fixed tick.
pub fn tick(
    world: &mut hecs::World,
    ctx: &TickContext,
    rng: &mut fastrand::Rng,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) {
    cmds.clear();

    // 1. Snapshot the props
    let around = Surroundings::read(world);

    // 2. Pet state machines (meters, movement, evolution)
    behavior::update(world, ctx, &around, cmds, events);

    // 3. Reposition / show / hide props
    apply(world, cmds, ctx.reach, rng);
}

/// Apply queued prop changes in order.
pub fn apply(world: &mut hecs::World, cmds: &[WorldCmd], reach: &Reach, rng: &mut fastrand::Rng) {
    for cmd in cmds {
        match cmd {
            WorldCmd::PlaceCouch => {
                let spot = placement::place_couch(rng, reach);
                for (_, (pos, _)) in world.query_mut::<(&mut Position, &Couch)>() {
                    pos.0 = spot;
                }
                log::debug!("Couch moved to ({:.0}, {:.0})", spot.x, spot.y);
            }
            WorldCmd::PlaceFood => {
                let spot = placement::place_food(rng, reach, couch_position(world));
                for (_, (pos, bowl)) in world.query_mut::<(&mut Position, &mut FoodBowl)>() {
                    pos.0 = spot;
                    bowl.visible = true;
                }
                log::debug!("Food served at ({:.0}, {:.0})", spot.x, spot.y);
            }
            WorldCmd::HideFood => {
                for (_, bowl) in world.query_mut::<&mut FoodBowl>() {
                    bowl.visible = false;
                }
            }
        }
    }
}

pub fn couch_position(world: &hecs::World) -> Vec2 {
    world
        .query::<(&Position, &Couch)>()
        .iter()
        .next()
        .map(|(_, (pos, _))| pos.0)
        .unwrap_or(Vec2::ZERO)
}

pub mod animation;

use glam::Vec2;

use crate::ecs::components::*;
use crate::ecs::systems::placement;
use crate::tuning::Tuning;
use crate::viewport::Reach;

/// Spawn a fresh pet centered in the play area.
pub fn spawn_pet(world: &mut hecs::World, tuning: &Tuning, reach: &Reach) -> hecs::Entity {
    let center = reach.bounds * 0.5;
    world.spawn((
        Position(center),
        Facing { right: true },
        PetBehavior::default(),
        Meters::new(tuning.initial_happiness),
        Timers::default(),
        Evolution {
            level: 0,
            target_time: tuning.evolution_time(0),
            ascended: false,
        },
        // Pointer resting right over the pet.
        PointerMemory(center / tuning.pointer_scale),
    ))
}

/// Spawn the couch at a random spot.
pub fn spawn_couch(world: &mut hecs::World, reach: &Reach, rng: &mut fastrand::Rng) -> hecs::Entity {
    let spot = placement::place_couch(rng, reach);
    world.spawn((Position(spot), Couch))
}

/// Spawn the food bowl, hidden until food is offered.
pub fn spawn_food_bowl(world: &mut hecs::World) -> hecs::Entity {
    world.spawn((Position(Vec2::ZERO), FoodBowl { visible: false }))
}

use glam::Vec2;

use crate::viewport::Reach;

/// Hard cap on food placement draws.
pub const MAX_FOOD_ATTEMPTS: usize = 20;

/// Uniform draw in `[lo, hi]`. Collapses to `hi` when the margin eats the
/// whole range, so results stay in bounds.
fn uniform(rng: &mut fastrand::Rng, lo: f32, hi: f32) -> f32 {
    if hi <= lo {
        hi
    } else {
        lo + rng.f32() * (hi - lo)
    }
}

fn sample(rng: &mut fastrand::Rng, margin: f32, bounds: Vec2) -> Vec2 {
    Vec2::new(
        uniform(rng, margin, bounds.x),
        uniform(rng, margin, bounds.y),
    )
}

/// Drop the couch somewhere inside the margins. Single draw.
pub fn place_couch(rng: &mut fastrand::Rng, reach: &Reach) -> Vec2 {
    sample(rng, reach.couch_margin, reach.bounds)
}

/// Drop the food bowl, preferring spots at least `food_separation` from
/// the couch. Best effort: after `MAX_FOOD_ATTEMPTS` misses the last draw
/// is kept anyway.
pub fn place_food(rng: &mut fastrand::Rng, reach: &Reach, couch: Vec2) -> Vec2 {
    let mut pick = Vec2::ZERO;
    for _ in 0..MAX_FOOD_ATTEMPTS {
        pick = sample(rng, reach.food_margin, reach.bounds);
        if pick.distance(couch) >= reach.food_separation {
            return pick;
        }
    }
    log::debug!("Food placed {:.0}px from couch after {MAX_FOOD_ATTEMPTS} tries", pick.distance(couch));
    pick
}

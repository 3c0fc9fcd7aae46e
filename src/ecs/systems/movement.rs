use glam::Vec2;

use crate::viewport::Reach;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Vec2,
    /// Distance actually covered after clamping. Feeds exhaustion.
    pub moved: f32,
}

impl Step {
    fn between(from: Vec2, to: Vec2) -> Self {
        Self {
            position: to,
            moved: from.distance(to),
        }
    }
}

/// Inside the band where the pet actively chases.
pub fn engaged(distance: f32, reach: &Reach) -> bool {
    reach.min_distance < distance && distance < reach.max_follow
}

/// Chase speed in px/s. Inside the activation radius it eases up
/// quadratically toward `max_speed` the closer the target is, then gets
/// the evolution boost. Outside it's a flat `min_speed`.
pub fn chase_speed(distance: f32, reach: &Reach, boost: f32) -> f32 {
    if distance < reach.activation {
        let r = distance / reach.activation;
        (reach.min_speed + (reach.max_speed - reach.min_speed) * (1.0 - r * r)) * boost
    } else {
        reach.min_speed
    }
}

/// Fixed speed used when heading for the couch.
pub fn seek_speed(reach: &Reach, fraction: f32) -> f32 {
    reach.min_speed + (reach.max_speed - reach.min_speed) * fraction
}

/// Keep a position inside `[0, bounds]` on both axes.
pub fn clamp_to(pos: Vec2, bounds: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, bounds)
}

/// Move toward `target` at the chase speed. Never overshoots the target.
pub fn follow(pos: Vec2, target: Vec2, dt: f32, reach: &Reach, boost: f32) -> Step {
    let offset = target - pos;
    let distance = offset.length();
    let travel = (chase_speed(distance, reach, boost) * dt).min(distance);
    let next = clamp_to(pos + offset.normalize_or_zero() * travel, reach.bounds);
    Step::between(pos, next)
}

/// Walk toward the couch at the fixed seek speed, landing on it exactly
/// once it's within reach of this step.
pub fn seek(pos: Vec2, couch: Vec2, dt: f32, reach: &Reach, fraction: f32) -> Step {
    let offset = couch - pos;
    let distance = offset.length();
    let travel = seek_speed(reach, fraction) * dt;
    let next = if travel >= distance {
        couch
    } else {
        pos + offset.normalize_or_zero() * travel
    };
    Step::between(pos, clamp_to(next, reach.bounds))
}

use crate::ecs::components::{Evolution, Meters, Timers};
use crate::ecs::systems::meters::reached;
use crate::ecs::systems::WorldCmd;
use crate::events::{SimEvent, SoundCue};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Promoted(u32),
    Ascended,
}

/// Accrue saturated-happiness time and evolve once it reaches the target.
///
/// Accrual is continuous: any tick below full happiness zeroes the timer.
pub fn advance(
    meters: &Meters,
    timers: &mut Timers,
    evolution: &mut Evolution,
    tuning: &Tuning,
    dt: f32,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) -> Option<Outcome> {
    if evolution.ascended {
        return None;
    }
    if !meters.is_saturated() {
        timers.evolution = 0.0;
        return None;
    }
    timers.evolution += dt;
    if !reached(timers.evolution, evolution.target_time) {
        return None;
    }
    Some(try_evolve(evolution, timers, tuning, cmds, events))
}

/// Promote to the next stage, or ascend when already on the last one.
pub fn try_evolve(
    evolution: &mut Evolution,
    timers: &mut Timers,
    tuning: &Tuning,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) -> Outcome {
    timers.evolution = 0.0;

    if evolution.level >= tuning.final_level() {
        evolution.ascended = true;
        log::info!(
            "Pet ascended from stage {} ({})",
            evolution.level,
            tuning.stage_name(evolution.level)
        );
        events.push(SimEvent::Sound(SoundCue::Ascend));
        events.push(SimEvent::Ascended {
            level: evolution.level,
        });
        return Outcome::Ascended;
    }

    evolution.level += 1;
    evolution.target_time = tuning.evolution_time(evolution.level);
    let stage = tuning.stage_name(evolution.level).to_string();
    log::info!(
        "Pet evolved to stage {} ({stage}), next in {:.0}s",
        evolution.level,
        evolution.target_time
    );

    cmds.push(WorldCmd::PlaceCouch);
    events.push(SimEvent::Sound(SoundCue::Evolve));
    events.push(SimEvent::Evolved {
        level: evolution.level,
        stage,
    });
    Outcome::Promoted(evolution.level)
}

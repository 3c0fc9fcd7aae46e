use glam::Vec2;

use crate::cat::animation::AnimationCue;
use crate::ecs::components::{
    Evolution, Facing, Meters, PetBehavior, PetState, PointerMemory, Position, Timers,
};
use crate::ecs::systems::evolution::{self, Outcome};
use crate::ecs::systems::meters::reached;
use crate::ecs::systems::movement;
use crate::ecs::systems::{Surroundings, TickContext, WorldCmd};
use crate::events::{SimEvent, SoundCue};
use crate::tuning::Tuning;

/// Mutable view over one pet's components for the duration of a tick.
struct PetMut<'a> {
    pos: &'a mut Position,
    facing: &'a mut Facing,
    behavior: &'a mut PetBehavior,
    meters: &'a mut Meters,
    timers: &'a mut Timers,
    evolution: &'a mut Evolution,
    memory: &'a mut PointerMemory,
}

/// Advance every pet's state machine by one tick.
pub fn update(
    world: &mut hecs::World,
    ctx: &TickContext,
    around: &Surroundings,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) {
    for (_, (pos, facing, behavior, meters, timers, evolution, memory)) in world.query_mut::<(
        &mut Position,
        &mut Facing,
        &mut PetBehavior,
        &mut Meters,
        &mut Timers,
        &mut Evolution,
        &mut PointerMemory,
    )>() {
        let mut pet = PetMut {
            pos,
            facing,
            behavior,
            meters,
            timers,
            evolution,
            memory,
        };
        step(&mut pet, ctx, around, cmds, events);
    }
}

fn step(
    pet: &mut PetMut,
    ctx: &TickContext,
    around: &Surroundings,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) {
    if pet.evolution.ascended {
        return;
    }
    let tuning = ctx.tuning;

    // 1. Geometry
    let target = ctx.pointer * tuning.pointer_scale;
    let distance = pet.pos.0.distance(target);
    let pointer_moved = ctx.pointer.distance(pet.memory.0) > tuning.pointer_jitter;
    pet.memory.0 = ctx.pointer;

    // 2. Evolution
    match evolution::advance(
        pet.meters,
        pet.timers,
        pet.evolution,
        tuning,
        ctx.dt,
        cmds,
        events,
    ) {
        Some(Outcome::Ascended) => return,
        Some(Outcome::Promoted(_)) => events.push(SimEvent::Animation(cue(pet, tuning))),
        None => {}
    }

    // 3. Facing
    let look_at = if pet.behavior.state == PetState::SeekingCouch {
        around.couch
    } else {
        target
    };
    face(pet, look_at, tuning, events);

    // 4. States that own the whole tick
    match pet.behavior.state {
        PetState::Eating => {
            eat(pet, ctx, cmds, events);
            return;
        }
        PetState::SeekingCouch => {
            seek_couch(pet, ctx, around, events);
            return;
        }
        PetState::Asleep => {
            sleep(pet, ctx, events);
            return;
        }
        PetState::Awake | PetState::Idle | PetState::Exhausted => {}
    }

    // 5. Pointer-driven states
    accrue_idle(pet, distance, pointer_moved, ctx);

    let resting = matches!(pet.behavior.state, PetState::Idle | PetState::Exhausted);
    if resting && pointer_moved && distance < ctx.reach.reengagement {
        reengage(pet, tuning, events);
        return;
    }

    if promote_idle(pet, tuning, events) {
        return;
    }

    match pet.behavior.state {
        PetState::Awake => chase(pet, target, distance, ctx, around, cmds, events),
        PetState::Idle => {
            pet.meters.sadden(tuning.happiness_decay, ctx.dt);
            pet.meters.recover(tuning.idle_recovery, ctx.dt);
        }
        PetState::Exhausted => {
            pet.meters.sadden(tuning.happiness_decay, ctx.dt);
            pet.meters.recover(tuning.exhausted_recovery, ctx.dt);
        }
        _ => {}
    }
}

fn cue(pet: &PetMut, tuning: &Tuning) -> AnimationCue {
    AnimationCue::new(
        tuning.stage_name(pet.evolution.level),
        pet.behavior.state,
        pet.facing.right,
    )
}

/// Switch state and tell the renderer. No-op when already there.
fn enter(pet: &mut PetMut, next: PetState, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    let from = pet.behavior.state;
    if from == next {
        return;
    }
    log::debug!("Pet {} -> {}", from.label(), next.label());
    pet.behavior.state = next;
    events.push(SimEvent::StateChanged { from, to: next });
    events.push(SimEvent::Animation(cue(pet, tuning)));
}

fn face(pet: &mut PetMut, look_at: Vec2, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    // Directly above or below: keep the current facing.
    if look_at.x == pet.pos.0.x {
        return;
    }
    let right = look_at.x > pet.pos.0.x;
    if right != pet.facing.right {
        pet.facing.right = right;
        events.push(SimEvent::Animation(cue(pet, tuning)));
    }
}

fn accrue_idle(pet: &mut PetMut, distance: f32, pointer_moved: bool, ctx: &TickContext) {
    let timers = &mut *pet.timers;
    // An awake pet is bored by a still pointer; a resting one just keeps resting.
    if pet.behavior.state == PetState::Awake && pointer_moved {
        timers.idle = 0.0;
    } else {
        timers.idle += ctx.dt;
    }
    if distance >= ctx.reach.max_follow {
        timers.outside_range += ctx.dt;
    } else {
        timers.outside_range = 0.0;
    }
}

fn reengage(pet: &mut PetMut, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    pet.behavior.second_wind = pet.behavior.state == PetState::Exhausted;
    pet.timers.reset();
    enter(pet, PetState::Awake, tuning, events);
}

/// Awake -> Idle after a still or out-of-range pointer, Idle -> couch
/// after long enough idling.
fn promote_idle(pet: &mut PetMut, tuning: &Tuning, events: &mut Vec<SimEvent>) -> bool {
    let timers = *pet.timers;
    match pet.behavior.state {
        PetState::Awake
            if reached(timers.idle, tuning.idle_timeout)
                || reached(timers.outside_range, tuning.idle_timeout) =>
        {
            enter(pet, PetState::Idle, tuning, events);
            true
        }
        PetState::Idle if reached(timers.idle, tuning.idle_to_sleep_timeout) => {
            pet.behavior.bored = tuning.bored_penalty;
            enter(pet, PetState::SeekingCouch, tuning, events);
            true
        }
        _ => false,
    }
}

fn chase(
    pet: &mut PetMut,
    target: Vec2,
    distance: f32,
    ctx: &TickContext,
    around: &Surroundings,
    cmds: &mut Vec<WorldCmd>,
    events: &mut Vec<SimEvent>,
) {
    let tuning = ctx.tuning;
    let reach = ctx.reach;

    // At the cap the pet heads for the couch whether or not it is chasing.
    if pet.meters.exhaustion >= tuning.sleep_threshold {
        enter(pet, PetState::SeekingCouch, tuning, events);
        return;
    }

    if let Some(food) = around.food {
        if pet.pos.0.distance(food) <= reach.food_threshold {
            pet.timers.eating = 0.0;
            events.push(SimEvent::Sound(SoundCue::Eat));
            enter(pet, PetState::Eating, tuning, events);
            return;
        }
    }

    if movement::engaged(distance, reach) {
        let boost = tuning.speed_boost(pet.evolution.level);
        let step = movement::follow(pet.pos.0, target, ctx.dt, reach, boost);
        pet.pos.0 = step.position;
        pet.meters.tire(step.moved * tuning.exhaust_factor, tuning.sleep_threshold);
        pet.meters.cheer(tuning.happiness_gain * ctx.dt);

        if pet.meters.exhaustion >= tuning.sleep_threshold {
            enter(pet, PetState::SeekingCouch, tuning, events);
        } else if pet.meters.exhaustion >= tuning.exhaust_threshold && !pet.behavior.second_wind {
            if around.food.is_none() {
                cmds.push(WorldCmd::PlaceFood);
            }
            enter(pet, PetState::Exhausted, tuning, events);
        }
    } else {
        pet.meters.recover(tuning.awake_recovery, ctx.dt);
    }

    if pet.behavior.second_wind && pet.meters.exhaustion < tuning.exhaust_threshold {
        pet.behavior.second_wind = false;
    }
}

fn eat(pet: &mut PetMut, ctx: &TickContext, cmds: &mut Vec<WorldCmd>, events: &mut Vec<SimEvent>) {
    let tuning = ctx.tuning;
    pet.timers.eating += ctx.dt;
    if !reached(pet.timers.eating, tuning.eating_duration) {
        return;
    }
    pet.timers.eating = 0.0;
    pet.meters.set_exhaustion(0.0, tuning.sleep_threshold);
    pet.meters.cheer(tuning.eating_happiness_bonus);
    pet.behavior.second_wind = false;
    cmds.push(WorldCmd::HideFood);
    enter(pet, PetState::Awake, tuning, events);
}

fn seek_couch(
    pet: &mut PetMut,
    ctx: &TickContext,
    around: &Surroundings,
    events: &mut Vec<SimEvent>,
) {
    let tuning = ctx.tuning;
    pet.meters.sadden(tuning.happiness_decay, ctx.dt);

    if pet.pos.0.distance(around.couch) <= ctx.reach.couch_threshold {
        pet.pos.0 = around.couch;
        pet.timers.sleep = 0.0;
        enter(pet, PetState::Asleep, tuning, events);
        return;
    }

    let step = movement::seek(
        pet.pos.0,
        around.couch,
        ctx.dt,
        ctx.reach,
        tuning.seek_speed_fraction,
    );
    pet.pos.0 = step.position;
}

fn sleep(pet: &mut PetMut, ctx: &TickContext, events: &mut Vec<SimEvent>) {
    let tuning = ctx.tuning;
    pet.timers.sleep += ctx.dt;
    pet.meters.sadden(tuning.happiness_decay, ctx.dt);
    if reached(pet.timers.sleep, tuning.sleep_duration) {
        wake(pet, tuning, events);
    }
}

fn wake(pet: &mut PetMut, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    let penalty = if pet.behavior.bored { 2.0 } else { 1.0 };
    let exhaustion = tuning.wake_exhaustion * (pet.evolution.level + 1) as f32 * penalty;

    pet.meters.scale_happiness(tuning.wake_happiness_factor);
    pet.meters.set_exhaustion(exhaustion, tuning.sleep_threshold);
    pet.behavior.bored = false;
    pet.behavior.second_wind = false;
    pet.timers.reset();
    enter(pet, PetState::Awake, tuning, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Couch, FoodBowl, HAPPINESS_MAX};
    use crate::ecs::systems;
    use crate::viewport::{Reach, Viewport};

    struct Rig {
        world: hecs::World,
        pet: hecs::Entity,
        tuning: Tuning,
        reach: Reach,
        rng: fastrand::Rng,
        cmds: Vec<WorldCmd>,
        events: Vec<SimEvent>,
    }

    impl Rig {
        fn new(pet_at: Vec2, couch_at: Vec2) -> Self {
            let tuning = Tuning::default();
            let reach = Viewport::new(800.0, 600.0).reach(&tuning);
            let mut world = hecs::World::new();
            let pet = world.spawn((
                Position(pet_at),
                Facing { right: true },
                PetBehavior::default(),
                Meters::new(50.0),
                Timers::default(),
                Evolution {
                    level: 0,
                    target_time: tuning.evolution_time(0),
                    ascended: false,
                },
                PointerMemory(Vec2::ZERO),
            ));
            world.spawn((Position(couch_at), Couch));
            world.spawn((Position(Vec2::ZERO), FoodBowl { visible: false }));
            Self {
                world,
                pet,
                tuning,
                reach,
                rng: fastrand::Rng::with_seed(5),
                cmds: Vec::new(),
                events: Vec::new(),
            }
        }

        fn tick(&mut self, dt: f32, pointer: Vec2) {
            let ctx = TickContext {
                dt,
                pointer,
                tuning: &self.tuning,
                reach: &self.reach,
            };
            systems::tick(&mut self.world, &ctx, &mut self.rng, &mut self.cmds, &mut self.events);
        }

        fn state(&self) -> PetState {
            self.world.get::<&PetBehavior>(self.pet).unwrap().state
        }

        fn set_state(&mut self, state: PetState) {
            self.world.get::<&mut PetBehavior>(self.pet).unwrap().state = state;
        }

        fn meters(&self) -> Meters {
            *self.world.get::<&Meters>(self.pet).unwrap()
        }

        fn timers(&self) -> Timers {
            *self.world.get::<&Timers>(self.pet).unwrap()
        }

        fn pos(&self) -> Vec2 {
            self.world.get::<&Position>(self.pet).unwrap().0
        }

        fn food_visible(&self) -> bool {
            self.world
                .query::<&FoodBowl>()
                .iter()
                .any(|(_, bowl)| bowl.visible)
        }
    }

    #[test]
    fn chases_at_min_speed_outside_activation() {
        let mut rig = Rig::new(Vec2::ZERO, Vec2::new(700.0, 500.0));
        let dt = 1.0 / 60.0;
        rig.tick(dt, Vec2::new(200.0, 200.0));

        let moved = rig.pos().length();
        assert!((moved - rig.reach.min_speed * dt).abs() < 1e-4);
        assert!((rig.pos().x - rig.pos().y).abs() < 1e-5);
        let expected = moved * rig.tuning.exhaust_factor;
        assert!((rig.meters().exhaustion - expected).abs() < 1e-6);
        assert_eq!(rig.state(), PetState::Awake);
    }

    #[test]
    fn still_pointer_idles_then_seeks_couch() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(400.0, 300.0));
        let pointer = Vec2::new(200.0, 200.0); // target on top of the pet
        rig.tick(0.5, pointer);

        let mut last_idle = rig.timers().idle;
        while rig.state() == PetState::Awake {
            rig.tick(0.5, pointer);
            let idle = rig.timers().idle;
            assert!(idle >= last_idle);
            last_idle = idle;
        }
        assert_eq!(rig.state(), PetState::Idle);
        assert!(rig.timers().idle >= rig.tuning.idle_timeout);

        while rig.state() == PetState::Idle {
            rig.tick(0.5, pointer);
        }
        assert_eq!(rig.state(), PetState::SeekingCouch);
        assert!(rig.world.get::<&PetBehavior>(rig.pet).unwrap().bored);
    }

    #[test]
    fn far_pointer_counts_outside_range() {
        let mut rig = Rig::new(Vec2::ZERO, Vec2::new(400.0, 300.0));
        for i in 0..10 {
            // Keep the pointer moving but far beyond follow range.
            rig.tick(0.5, Vec2::new(1500.0 + i as f32 * 10.0, 1200.0));
        }
        assert_eq!(rig.state(), PetState::Idle);
        assert_eq!(rig.timers().idle, 0.0);
        assert_eq!(rig.pos(), Vec2::ZERO);
    }

    #[test]
    fn moved_pointer_reengages_idle_pet() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(400.0, 300.0));
        rig.set_state(PetState::Idle);
        rig.world.get::<&mut Timers>(rig.pet).unwrap().evolution = 3.0;

        rig.tick(0.1, Vec2::new(260.0, 200.0)); // target 30px away
        assert_eq!(rig.state(), PetState::Awake);
        assert_eq!(rig.timers(), Timers::default());
    }

    #[test]
    fn distant_pointer_does_not_reengage() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(400.0, 300.0));
        rig.set_state(PetState::Exhausted);
        rig.tick(0.1, Vec2::new(600.0, 200.0)); // target 200px away
        assert_eq!(rig.state(), PetState::Exhausted);
    }

    #[test]
    fn exhaustion_tips_into_exhausted_and_serves_food() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
        rig.world
            .get::<&mut Meters>(rig.pet)
            .unwrap()
            .tire(rig.tuning.exhaust_threshold - 0.01, rig.tuning.sleep_threshold);

        rig.tick(0.1, Vec2::new(600.0, 600.0));
        assert_eq!(rig.state(), PetState::Exhausted);
        assert!(rig.food_visible());
        assert!(rig
            .events
            .contains(&SimEvent::StateChanged { from: PetState::Awake, to: PetState::Exhausted }));
    }

    #[test]
    fn second_wind_runs_until_couch() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
        {
            let mut behavior = rig.world.get::<&mut PetBehavior>(rig.pet).unwrap();
            behavior.second_wind = true;
        }
        rig.world
            .get::<&mut Meters>(rig.pet)
            .unwrap()
            .tire(rig.tuning.sleep_threshold - 0.01, rig.tuning.sleep_threshold);

        rig.tick(0.1, Vec2::new(600.0, 600.0));
        assert_eq!(rig.state(), PetState::SeekingCouch);
        assert_eq!(rig.meters().exhaustion, rig.tuning.sleep_threshold);
    }

    #[test]
    fn eating_resets_exhaustion_and_hides_food() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
        for (_, (pos, bowl)) in rig.world.query_mut::<(&mut Position, &mut FoodBowl)>() {
            pos.0 = Vec2::new(110.0, 100.0);
            bowl.visible = true;
        }
        rig.world.get::<&mut Meters>(rig.pet).unwrap().tire(80.0, 250.0);

        rig.tick(0.25, Vec2::new(200.0, 200.0));
        assert_eq!(rig.state(), PetState::Eating);
        assert!(rig.events.contains(&SimEvent::Sound(SoundCue::Eat)));

        while rig.state() == PetState::Eating {
            rig.tick(0.25, Vec2::new(200.0, 200.0));
        }
        assert_eq!(rig.state(), PetState::Awake);
        assert_eq!(rig.meters().exhaustion, 0.0);
        assert!(!rig.food_visible());
    }

    #[test]
    fn seeking_ignores_pointer_and_lands_on_couch() {
        let couch = Vec2::new(300.0, 100.0);
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), couch);
        rig.set_state(PetState::SeekingCouch);

        rig.tick(0.5, Vec2::ZERO);
        let after_one = rig.pos();
        assert!(after_one.x > 100.0, "moved toward couch, not pointer");
        assert!(rig.world.get::<&Facing>(rig.pet).unwrap().right);

        for _ in 0..100 {
            if rig.state() == PetState::Asleep {
                break;
            }
            rig.tick(0.5, Vec2::ZERO);
        }
        assert_eq!(rig.state(), PetState::Asleep);
        assert_eq!(rig.pos(), couch);
    }

    #[test]
    fn sleep_cycle_wakes_with_level_scaled_exhaustion() {
        for dt in [0.25_f32, 0.1, 1.0 / 30.0] {
            let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
            rig.set_state(PetState::Asleep);
            rig.world.get::<&mut Evolution>(rig.pet).unwrap().level = 1;
            let h = 80.0;
            rig.world.get::<&mut Meters>(rig.pet).unwrap().happiness = h;

            let ticks = (f64::from(rig.tuning.sleep_duration) / f64::from(dt)).ceil() as usize;
            for _ in 0..ticks - 1 {
                rig.tick(dt, Vec2::new(900.0, 900.0));
                assert_eq!(rig.state(), PetState::Asleep, "dt={dt}");
            }
            rig.tick(dt, Vec2::new(900.0, 900.0));

            assert_eq!(rig.state(), PetState::Awake, "dt={dt}");
            let expected = ((h - ticks as f32 * dt) * 0.9).max(0.0);
            assert!((rig.meters().happiness - expected).abs() < 1e-2, "dt={dt}");
            assert_eq!(rig.meters().exhaustion, 50.0 * 2.0);
        }
    }

    #[test]
    fn eating_lasts_its_full_duration_at_any_timestep() {
        for dt in [0.1_f32, 1.0 / 30.0] {
            let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
            for (_, (pos, bowl)) in rig.world.query_mut::<(&mut Position, &mut FoodBowl)>() {
                pos.0 = Vec2::new(110.0, 100.0);
                bowl.visible = true;
            }
            rig.tick(dt, Vec2::new(200.0, 200.0));
            assert_eq!(rig.state(), PetState::Eating);

            let ticks = (f64::from(rig.tuning.eating_duration) / f64::from(dt)).ceil() as usize;
            for _ in 0..ticks - 1 {
                rig.tick(dt, Vec2::new(200.0, 200.0));
                assert_eq!(rig.state(), PetState::Eating, "dt={dt}");
            }
            rig.tick(dt, Vec2::new(200.0, 200.0));
            assert_eq!(rig.state(), PetState::Awake, "dt={dt}");
        }
    }

    #[test]
    fn capped_exhaustion_seeks_couch_without_chasing() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
        {
            let mut behavior = rig.world.get::<&mut PetBehavior>(rig.pet).unwrap();
            behavior.state = PetState::Asleep;
            behavior.bored = true;
        }
        rig.world.get::<&mut Evolution>(rig.pet).unwrap().level = 2;

        // Pointer far outside follow range the whole time.
        let far = Vec2::new(1500.0, 1200.0);
        while rig.state() == PetState::Asleep {
            rig.tick(0.5, far);
        }
        assert_eq!(rig.state(), PetState::Awake);
        assert_eq!(rig.meters().exhaustion, rig.tuning.sleep_threshold);

        rig.tick(0.5, far);
        assert_eq!(rig.state(), PetState::SeekingCouch);
    }

    #[test]
    fn reengaging_an_exhausted_pet_earns_a_second_wind() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(700.0, 500.0));
        rig.world
            .get::<&mut Meters>(rig.pet)
            .unwrap()
            .tire(rig.tuning.exhaust_threshold - 0.01, rig.tuning.sleep_threshold);
        rig.tick(0.1, Vec2::new(600.0, 600.0));
        assert_eq!(rig.state(), PetState::Exhausted);
        // Keep the served bowl out of the way of the chase below.
        for (_, bowl) in rig.world.query_mut::<&mut FoodBowl>() {
            bowl.visible = false;
        }

        let pointer = (rig.pos() + Vec2::new(30.0, 0.0)) * 2.0;
        rig.tick(1.0 / 60.0, pointer);
        assert_eq!(rig.state(), PetState::Awake);
        assert!(rig.world.get::<&PetBehavior>(rig.pet).unwrap().second_wind);
        assert!(rig.meters().exhaustion >= rig.tuning.exhaust_threshold);

        for i in 0..(120 * 60) {
            if rig.state() != PetState::Awake {
                break;
            }
            let angle = i as f32 * 0.05;
            let pointer = (rig.pos() + Vec2::new(angle.cos(), angle.sin()) * 40.0) * 2.0;
            rig.tick(1.0 / 60.0, pointer);
        }
        assert_eq!(rig.state(), PetState::SeekingCouch);
        assert_eq!(rig.meters().exhaustion, rig.tuning.sleep_threshold);
    }

    #[test]
    fn bored_nap_doubles_wake_exhaustion() {
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), Vec2::new(100.0, 100.0));
        {
            let mut behavior = rig.world.get::<&mut PetBehavior>(rig.pet).unwrap();
            behavior.state = PetState::Asleep;
            behavior.bored = true;
        }
        for _ in 0..16 {
            rig.tick(0.5, Vec2::ZERO);
        }
        assert_eq!(rig.state(), PetState::Awake);
        assert_eq!(rig.meters().exhaustion, 100.0);
        assert!(!rig.world.get::<&PetBehavior>(rig.pet).unwrap().bored);
    }

    #[test]
    fn saturated_happiness_evolves_and_moves_couch() {
        let couch = Vec2::new(5.0, 5.0);
        let mut rig = Rig::new(Vec2::new(100.0, 100.0), couch);
        rig.world.get::<&mut Meters>(rig.pet).unwrap().happiness = HAPPINESS_MAX;

        // Keep the pointer orbiting close so the pet stays engaged and happy.
        let mut evolved = false;
        for i in 0..(12 * 60) {
            let angle = i as f32 * 0.05;
            let pet = rig.pos();
            let pointer = (pet + Vec2::new(angle.cos(), angle.sin()) * 40.0) * 2.0;
            rig.tick(1.0 / 60.0, pointer);
            if rig.world.get::<&Evolution>(rig.pet).unwrap().level == 1 {
                evolved = true;
                break;
            }
        }
        assert!(evolved);
        assert_ne!(systems::couch_position(&rig.world), couch);
        assert!(rig.events.iter().any(|e| matches!(
            e,
            SimEvent::Animation(cue) if cue.stage == "cat"
        )));
    }

    #[test]
    fn meters_stay_bounded_under_random_input() {
        let mut rig = Rig::new(Vec2::new(300.0, 300.0), Vec2::new(200.0, 150.0));
        let mut rng = fastrand::Rng::with_seed(1234);
        for _ in 0..20_000 {
            let pointer = Vec2::new(rng.f32() * 1600.0, rng.f32() * 1200.0);
            let dt = rng.f32() * 0.1;
            rig.tick(dt, pointer);
            let m = rig.meters();
            assert!((0.0..=HAPPINESS_MAX).contains(&m.happiness));
            assert!((0.0..=rig.tuning.sleep_threshold).contains(&m.exhaustion));
            let p = rig.pos();
            assert!(p.x >= 0.0 && p.x <= rig.reach.bounds.x);
            assert!(p.y >= 0.0 && p.y <= rig.reach.bounds.y);
        }
    }
}

use glam::Vec2;

use crate::cat;
use crate::ecs::components::{Couch, Evolution, Position};
use crate::ecs::systems::{self, Surroundings, TickContext, WorldCmd};
use crate::error::SimError;
use crate::events::SimEvent;
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;
use crate::viewport::{Reach, Viewport};

/// One game: a pet, its couch and food bowl, and everything needed to tick
/// them deterministically.
pub struct Session {
    world: hecs::World,
    pet: hecs::Entity,

    tuning: Tuning,
    viewport: Viewport,
    // Zoom-scaled tuning, rebuilt on resize.
    reach: Reach,

    // Seeded so a replayed input sequence reproduces the session.
    rng: fastrand::Rng,

    // Reused each tick.
    cmds: Vec<WorldCmd>,
    events: Vec<SimEvent>,

    tick_count: u64,
    elapsed: f64,
}

impl Session {
    pub fn new(tuning: Tuning, viewport: Viewport, seed: u64) -> Result<Self, SimError> {
        tuning.validate()?;
        viewport.validate()?;
        let reach = viewport.reach(&tuning);
        let mut world = hecs::World::new();
        let mut rng = fastrand::Rng::with_seed(seed);
        let pet = populate(&mut world, &tuning, &reach, &mut rng);
        log::info!(
            "New game on {}x{} canvas (zoom {}), seed {seed}",
            viewport.width,
            viewport.height,
            viewport.zoom
        );
        Ok(Self {
            world,
            pet,
            tuning,
            viewport,
            reach,
            rng,
            cmds: Vec::with_capacity(4),
            events: Vec::with_capacity(16),
            tick_count: 0,
            elapsed: 0.0,
        })
    }

    /// Advance one tick. A bad `dt` is rejected without touching any state.
    pub fn tick(&mut self, dt: f32, pointer: Vec2) -> Result<Snapshot, SimError> {
        if !dt.is_finite() || dt < 0.0 {
            log::warn!("Rejected tick with dt={dt}");
            return Err(SimError::InvalidTimestep(dt));
        }
        if self.is_won() {
            return self.snapshot();
        }

        let ctx = TickContext {
            dt,
            pointer,
            tuning: &self.tuning,
            reach: &self.reach,
        };
        systems::tick(
            &mut self.world,
            &ctx,
            &mut self.rng,
            &mut self.cmds,
            &mut self.events,
        );

        self.tick_count += 1;
        if !self.is_won() {
            self.elapsed += f64::from(dt);
        }
        self.snapshot()
    }

    /// Host canvas changed size or zoom. Everything is pulled back in bounds.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), SimError> {
        viewport.validate()?;
        self.viewport = viewport;
        self.reach = viewport.reach(&self.tuning);
        let bounds = self.reach.bounds;
        for (_, pos) in self.world.query_mut::<&mut Position>() {
            pos.0 = pos.0.clamp(Vec2::ZERO, bounds);
        }
        log::debug!(
            "Resized to {}x{} zoom {}, bounds ({:.0}, {:.0})",
            viewport.width,
            viewport.height,
            viewport.zoom,
            bounds.x,
            bounds.y
        );
        Ok(())
    }

    /// Put food out (or move it). Returns where the bowl landed.
    pub fn offer_food(&mut self) -> Vec2 {
        systems::apply(
            &mut self.world,
            &[WorldCmd::PlaceFood],
            &self.reach,
            &mut self.rng,
        );
        self.food().unwrap_or(Vec2::ZERO)
    }

    /// Start over: fresh pet, level 0, new couch, clock at zero.
    pub fn restart(&mut self) {
        self.world.clear();
        self.pet = populate(&mut self.world, &self.tuning, &self.reach, &mut self.rng);
        self.events.clear();
        self.tick_count = 0;
        self.elapsed = 0.0;
        log::info!("Game restarted");
    }

    /// Current status. Fails only if the pet was despawned via [`Session::world_mut`].
    pub fn snapshot(&self) -> Result<Snapshot, SimError> {
        Snapshot::capture(&self.world, self.pet, &self.tuning, self.tick_count, self.elapsed)
            .ok_or(SimError::PetMissing(self.pet))
    }

    /// Take the events queued since the last drain.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SimEvent> {
        self.events.drain(..)
    }

    /// The pet ascended; further ticks are no-ops.
    pub fn is_won(&self) -> bool {
        self.world
            .get::<&Evolution>(self.pet)
            .map(|evo| evo.ascended)
            .unwrap_or(false)
    }

    pub fn couch(&self) -> Vec2 {
        systems::couch_position(&self.world)
    }

    pub fn food(&self) -> Option<Vec2> {
        Surroundings::read(&self.world).food
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn reach(&self) -> &Reach {
        &self.reach
    }

    pub fn pet(&self) -> hecs::Entity {
        self.pet
    }

    pub fn world(&self) -> &hecs::World {
        &self.world
    }

    /// Direct component access, for hosts that script scenarios.
    pub fn world_mut(&mut self) -> &mut hecs::World {
        &mut self.world
    }

    /// Move the couch. Mostly for scripted scenarios.
    pub fn set_couch(&mut self, spot: Vec2) {
        let spot = spot.clamp(Vec2::ZERO, self.reach.bounds);
        for (_, (pos, _)) in self.world.query_mut::<(&mut Position, &Couch)>() {
            pos.0 = spot;
        }
    }
}

fn populate(
    world: &mut hecs::World,
    tuning: &Tuning,
    reach: &Reach,
    rng: &mut fastrand::Rng,
) -> hecs::Entity {
    let pet = cat::spawn_pet(world, tuning, reach);
    cat::spawn_couch(world, reach, rng);
    cat::spawn_food_bowl(world);
    pet
}

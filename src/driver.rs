//! Headless host: a fixed-timestep loop feeding a scripted pointer into a
//! [`Session`] and logging what the pet does.

use glam::Vec2;
use instant::Instant;

use crate::ecs::components::PetState;
use crate::events::SimEvent;
use crate::session::Session;
use crate::snapshot::Snapshot;
use crate::tuning::Tuning;
use crate::viewport::Viewport;

/// Target simulation tick rate (seconds per tick).
pub const TICK_RATE: f64 = 1.0 / 60.0;
/// Max accumulated time before we clamp (prevents spiral of death).
const MAX_ACCUMULATOR: f64 = 0.25;
/// How often to log pet status and frame cost (simulated seconds).
const STATUS_LOG_INTERVAL: f64 = 10.0;
/// Give up on a session that never ascends.
const MAX_SESSION_SECONDS: f64 = 1800.0;
/// Simulated resize partway through, to exercise the viewport path.
const RESIZE_AT: f64 = 300.0;
const CANVAS: (f32, f32) = (1280.0, 720.0);

/// Pointer script phase lengths (seconds).
const PLAY_SECONDS: f64 = 40.0;
const REST_SECONDS: f64 = 45.0;

// ---------------------------------------------------------------------------
// Fixed timestep
// ---------------------------------------------------------------------------

/// Banks variable frame time and pays it out in whole ticks.
pub struct FixedStep {
    accumulator: f64,
}

impl FixedStep {
    pub fn new() -> Self {
        Self { accumulator: 0.0 }
    }

    /// Add a frame's worth of time. Returns how many ticks to run now.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        if self.accumulator > MAX_ACCUMULATOR {
            self.accumulator = MAX_ACCUMULATOR;
        }
        let mut ticks = 0;
        while self.accumulator >= TICK_RATE {
            self.accumulator -= TICK_RATE;
            ticks += 1;
        }
        ticks
    }

    /// Interpolation alpha for rendering between ticks.
    pub fn alpha(&self) -> f32 {
        (self.accumulator / TICK_RATE) as f32
    }
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Frame timing
// ---------------------------------------------------------------------------

struct FrameStats {
    frame_count: u64,
    frames_since_log: u32,
    sim_since_log: f64,
    busy_sum: f64,
    busy_max: f64,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_count: 0,
            frames_since_log: 0,
            sim_since_log: 0.0,
            busy_sum: 0.0,
            busy_max: 0.0,
        }
    }

    /// `busy` is wall time spent ticking this frame.
    fn record_frame(&mut self, frame_dt: f64, busy: f64) {
        self.frame_count += 1;
        self.frames_since_log += 1;
        self.sim_since_log += frame_dt;
        self.busy_sum += busy;
        self.busy_max = self.busy_max.max(busy);

        if self.sim_since_log >= STATUS_LOG_INTERVAL {
            log::debug!(
                "Frames: {} | avg fps: {:.0} | tick cost avg: {:.1}us max: {:.1}us",
                self.frame_count,
                self.frames_since_log as f64 / self.sim_since_log,
                self.busy_sum / self.frames_since_log as f64 * 1_000_000.0,
                self.busy_max * 1_000_000.0,
            );
            self.frames_since_log = 0;
            self.sim_since_log = 0.0;
            self.busy_sum = 0.0;
            self.busy_max = 0.0;
        }
    }
}

// ---------------------------------------------------------------------------
// Scripted pointer
// ---------------------------------------------------------------------------

/// Plays with the pet for a while, then leaves the pointer alone.
/// Dangles the pointer near a tired pet and leads it to food when there is any.
pub struct PointerScript {
    phase_time: f64,
    playing: bool,
    angle: f32,
    last: Vec2,
}

impl PointerScript {
    pub fn new(start: Vec2) -> Self {
        Self {
            phase_time: 0.0,
            playing: true,
            angle: 0.0,
            last: start,
        }
    }

    /// Raw pointer position for the next tick.
    pub fn aim(&mut self, dt: f64, snap: &Snapshot, pointer_scale: f32) -> Vec2 {
        self.phase_time += dt;
        let limit = if self.playing { PLAY_SECONDS } else { REST_SECONDS };
        if self.phase_time >= limit {
            self.playing = !self.playing;
            self.phase_time = 0.0;
            log::info!(
                "Pointer {}",
                if self.playing { "back to play" } else { "resting" }
            );
        }
        if !self.playing {
            return self.last;
        }

        self.angle += 4.0 * dt as f32;
        let pet = snap.position;
        let target = match (snap.state, snap.food) {
            // Lead toward the bowl without leaving follow range.
            (PetState::Awake, Some(food)) => pet + (food - pet).clamp_length_max(80.0),
            // Wiggle right next to a tired pet to get it going again.
            (PetState::Exhausted, _) | (PetState::Idle, _) => {
                pet + Vec2::new(self.angle.cos(), self.angle.sin()) * 30.0
            }
            _ => {
                let radius = 90.0 + 60.0 * (self.angle * 0.3).sin();
                pet + Vec2::new(self.angle.cos(), self.angle.sin()) * radius
            }
        };
        self.last = target / pointer_scale;
        self.last
    }
}

fn report(event: &SimEvent) {
    match event {
        SimEvent::Sound(cue) => log::info!("Sound: {}", cue.name()),
        SimEvent::Animation(cue) => log::debug!("Animation: {}", cue.name()),
        SimEvent::StateChanged { from, to } => {
            log::info!("Pet {} -> {}", from.label(), to.label())
        }
        SimEvent::Evolved { level, stage } => log::info!("Evolved to {stage} (level {level})"),
        SimEvent::Ascended { level } => log::info!("Ascended at level {level}"),
    }
}

fn log_status(snap: &Snapshot) {
    log::info!(
        "[{:>6.1}s] {:<13} at ({:>4.0}, {:>4.0}) | happy {:>5.1}% | tired {:>5.1}% | {} {:.0}%",
        snap.elapsed,
        snap.state.label(),
        snap.position.x,
        snap.position.y,
        snap.happiness_pct,
        snap.exhaustion_pct,
        snap.stage,
        snap.evolution_progress * 100.0,
    );
}

/// Run one scripted session. `config` is an optional tuning JSON path.
pub fn run(config: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match config {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let pointer_scale = tuning.pointer_scale;
    let seed = fastrand::u64(..);
    let mut frame_rng = fastrand::Rng::with_seed(seed.rotate_left(17));

    let mut session = Session::new(tuning, Viewport::new(CANVAS.0, CANVAS.1), seed)?;
    let mut snap = session.snapshot()?;
    let mut script = PointerScript::new(snap.position / pointer_scale);
    let mut fixed = FixedStep::new();
    let mut stats = FrameStats::new();

    let started = Instant::now();
    let mut sim_time = 0.0;
    let mut next_status = 0.0;
    let mut resized = false;

    while sim_time < MAX_SESSION_SECONDS && !snap.ascended {
        // Uneven frame pacing, roughly 50-75 fps.
        let frame_dt = 1.0 / 75.0 + frame_rng.f64() * (1.0 / 50.0 - 1.0 / 75.0);

        let frame_start = Instant::now();
        for _ in 0..fixed.advance(frame_dt) {
            let pointer = script.aim(TICK_RATE, &snap, pointer_scale);
            snap = session.tick(TICK_RATE as f32, pointer)?;
            sim_time += TICK_RATE;
            for event in session.drain_events() {
                report(&event);
            }
        }
        stats.record_frame(frame_dt, frame_start.elapsed().as_secs_f64());

        if !resized && sim_time >= RESIZE_AT {
            session.resize(Viewport::new(1024.0, 640.0).with_zoom(1.25))?;
            resized = true;
        }
        if sim_time >= next_status {
            log_status(&snap);
            next_status += STATUS_LOG_INTERVAL;
        }
    }

    if snap.ascended {
        log::info!("Won in {:.1}s of play", snap.elapsed);
    } else {
        log::info!("Stopped after {:.0}s without ascending", sim_time);
    }
    log::info!(
        "{} ticks in {:.2}s wall time",
        snap.tick,
        started.elapsed().as_secs_f64()
    );
    println!("{}", serde_json::to_string_pretty(&snap)?);
    Ok(())
}

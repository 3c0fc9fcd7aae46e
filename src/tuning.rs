use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Every knob of the simulation. Distances and speeds are in canvas pixels
/// at zoom 1.0 and get scaled by the viewport; times are in seconds.
///
/// Missing fields in a config file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // --- Pointer ---
    /// Factor applied to the raw pointer before any distance math.
    pub pointer_scale: f32,
    /// Pointer deltas at or below this count as "not moved".
    pub pointer_jitter: f32,

    // --- Distances ---
    pub min_distance: f32,
    pub max_follow_distance: f32,
    /// Inside this distance the chase speed ramps up.
    pub activation_distance: f32,
    pub reengagement_distance: f32,
    pub couch_threshold: f32,
    pub food_threshold: f32,

    // --- Speeds (px/s) ---
    pub min_speed: f32,
    pub max_speed: f32,
    /// Extra speed per evolution level, as a fraction of base speed.
    pub evolution_speed_step: f32,
    /// Position of the couch-seeking speed between min and max speed.
    pub seek_speed_fraction: f32,

    // --- Happiness ---
    pub initial_happiness: f32,
    /// Gain per second while engaged.
    pub happiness_gain: f32,
    /// Loss per second while idle, exhausted, asleep or seeking the couch.
    pub happiness_decay: f32,
    pub eating_happiness_bonus: f32,
    /// Multiplier applied to happiness on waking.
    pub wake_happiness_factor: f32,

    // --- Exhaustion ---
    /// Exhaustion gained per pixel moved.
    pub exhaust_factor: f32,
    pub exhaust_threshold: f32,
    /// Also the cap of the exhaustion meter.
    pub sleep_threshold: f32,
    /// Recovery per second for an awake pet that isn't moving.
    pub awake_recovery: f32,
    pub idle_recovery: f32,
    pub exhausted_recovery: f32,
    /// Exhaustion on waking, per evolution level (level + 1).
    pub wake_exhaustion: f32,
    /// Double the wake exhaustion after a boredom nap.
    pub bored_penalty: bool,

    // --- Timing ---
    pub idle_timeout: f32,
    pub idle_to_sleep_timeout: f32,
    pub sleep_duration: f32,
    pub eating_duration: f32,

    // --- Evolution ---
    /// Saturated-happiness seconds for the first promotion; scaled by
    /// (level + 1) afterwards.
    pub evolution_base_time: f32,
    /// Ordered stage names. Evolving past the last one wins the game.
    pub stages: Vec<String>,

    // --- Placement (tiles) ---
    pub tile_size: f32,
    pub couch_margin_tiles: f32,
    pub food_margin_tiles: f32,
    /// Preferred minimum distance between food bowl and couch.
    pub food_separation: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            pointer_scale: 0.5,
            pointer_jitter: 2.0,

            min_distance: 8.0,
            max_follow_distance: 300.0,
            activation_distance: 100.0,
            reengagement_distance: 60.0,
            couch_threshold: 8.0,
            food_threshold: 20.0,

            min_speed: 60.0,
            max_speed: 240.0,
            evolution_speed_step: 0.25,
            seek_speed_fraction: 0.25,

            initial_happiness: 50.0,
            happiness_gain: 4.0,
            happiness_decay: 1.0,
            eating_happiness_bonus: 10.0,
            wake_happiness_factor: 0.9,

            exhaust_factor: 0.05,
            exhaust_threshold: 150.0,
            sleep_threshold: 250.0,
            awake_recovery: 1.0,
            idle_recovery: 2.0,
            exhausted_recovery: 5.0,
            wake_exhaustion: 50.0,
            bored_penalty: true,

            idle_timeout: 5.0,
            idle_to_sleep_timeout: 15.0,
            sleep_duration: 8.0,
            eating_duration: 3.0,

            evolution_base_time: 10.0,
            stages: ["kitten", "cat", "lion", "cosmic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),

            tile_size: 16.0,
            couch_margin_tiles: 2.0,
            food_margin_tiles: 1.0,
            food_separation: 120.0,
        }
    }
}

impl Tuning {
    /// Load from a JSON file and validate.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&text)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(text)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the state machine can't run on.
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("pointer_scale", self.pointer_scale),
            ("max_follow_distance", self.max_follow_distance),
            ("activation_distance", self.activation_distance),
            ("min_speed", self.min_speed),
            ("sleep_threshold", self.sleep_threshold),
            ("tile_size", self.tile_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidTuning(format!("{name} must be positive")));
            }
        }
        if self.max_speed < self.min_speed {
            return Err(SimError::InvalidTuning(
                "max_speed must be at least min_speed".into(),
            ));
        }
        if self.min_distance >= self.max_follow_distance {
            return Err(SimError::InvalidTuning(
                "min_distance must be below max_follow_distance".into(),
            ));
        }
        if self.exhaust_threshold > self.sleep_threshold {
            return Err(SimError::InvalidTuning(
                "exhaust_threshold must not exceed sleep_threshold".into(),
            ));
        }
        if self.stages.is_empty() {
            return Err(SimError::InvalidTuning("at least one stage is required".into()));
        }
        Ok(())
    }

    /// Speed multiplier for an evolution level.
    pub fn speed_boost(&self, level: u32) -> f32 {
        1.0 + level as f32 * self.evolution_speed_step
    }

    /// Saturated-happiness seconds required to leave `level`.
    pub fn evolution_time(&self, level: u32) -> f32 {
        self.evolution_base_time * (level + 1) as f32
    }

    /// Stage name for a level. Levels past the list stick to the last stage.
    pub fn stage_name(&self, level: u32) -> &str {
        let idx = (level as usize).min(self.stages.len().saturating_sub(1));
        self.stages.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn final_level(&self) -> u32 {
        self.stages.len().saturating_sub(1) as u32
    }
}

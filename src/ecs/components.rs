use glam::Vec2;
use serde::Serialize;

/// Upper bound of the happiness meter.
pub const HAPPINESS_MAX: f32 = 100.0;

/// Current world position in canvas pixels (top-left of the sprite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Horizontal orientation, relative to whatever the pet is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub right: bool,
}

/// Behavior state plus the sticky modifiers that ride along with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PetBehavior {
    pub state: PetState,
    /// Fell asleep out of boredom; doubles the wake-up exhaustion.
    pub bored: bool,
    /// Re-engaged while exhausted; holds off the Exhausted guard until
    /// exhaustion drops back under the exhaust threshold.
    pub second_wind: bool,
}

impl Default for PetBehavior {
    fn default() -> Self {
        Self {
            state: PetState::Awake,
            bored: false,
            second_wind: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PetState {
    Awake,
    Idle,
    Exhausted,
    Asleep,
    Eating,
    SeekingCouch,
}

impl PetState {
    pub fn label(self) -> &'static str {
        match self {
            PetState::Awake => "awake",
            PetState::Idle => "idle",
            PetState::Exhausted => "exhausted",
            PetState::Asleep => "asleep",
            PetState::Eating => "eating",
            PetState::SeekingCouch => "seeking_couch",
        }
    }

    /// Only an awake pet follows the pointer.
    pub fn follows_pointer(self) -> bool {
        self == PetState::Awake
    }
}

/// The two well-being meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Meters {
    /// Mood, in [0, HAPPINESS_MAX].
    pub happiness: f32,
    /// Fatigue, in [0, sleep threshold].
    pub exhaustion: f32,
}

/// Elapsed-time counters in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Timers {
    /// Time the pointer has been still (or, once idle, time spent idle).
    pub idle: f32,
    /// Time the pointer has been beyond follow range.
    pub outside_range: f32,
    pub sleep: f32,
    pub eating: f32,
    /// Time happiness has been saturated.
    pub evolution: f32,
}

/// Progression through the evolution stages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evolution {
    pub level: u32,
    /// Seconds of saturated happiness needed for the next promotion.
    pub target_time: f32,
    /// Terminal win flag. Once set the session clock stops.
    pub ascended: bool,
}

/// Pointer position seen on the previous tick, for movement detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMemory(pub Vec2);

/// Marks the couch entity the pet naps on.
#[derive(Debug, Clone, Copy)]
pub struct Couch;

/// The food bowl. Hidden until food is offered.
#[derive(Debug, Clone, Copy)]
pub struct FoodBowl {
    pub visible: bool,
}

use crate::ecs::components::{Meters, Timers, HAPPINESS_MAX};

/// Slack for timers built from summed f32 `dt`s, which land a hair short
/// of round durations (80 x 0.1 sums to 7.99999).
pub const TIMER_EPSILON: f32 = 1e-4;

/// True once an accumulated timer has covered `duration`.
pub fn reached(timer: f32, duration: f32) -> bool {
    timer + TIMER_EPSILON >= duration
}

/// `meter - rate * multiplier * dt`, floored at zero.
pub fn decay(meter: f32, rate: f32, dt: f32, multiplier: f32) -> f32 {
    (meter - rate * multiplier * dt).max(0.0)
}

/// `meter + amount`, capped at `cap` and floored at zero.
pub fn increase(meter: f32, amount: f32, cap: f32) -> f32 {
    (meter + amount).clamp(0.0, cap)
}

impl Meters {
    pub fn new(happiness: f32) -> Self {
        Self {
            happiness: happiness.clamp(0.0, HAPPINESS_MAX),
            exhaustion: 0.0,
        }
    }

    pub fn cheer(&mut self, amount: f32) {
        self.happiness = increase(self.happiness, amount, HAPPINESS_MAX);
    }

    pub fn sadden(&mut self, rate: f32, dt: f32) {
        self.happiness = decay(self.happiness, rate, dt, 1.0);
    }

    /// Scale happiness by `factor`, keeping it in bounds.
    pub fn scale_happiness(&mut self, factor: f32) {
        self.happiness = (self.happiness * factor).clamp(0.0, HAPPINESS_MAX);
    }

    pub fn tire(&mut self, amount: f32, cap: f32) {
        self.exhaustion = increase(self.exhaustion, amount, cap);
    }

    pub fn recover(&mut self, rate: f32, dt: f32) {
        self.exhaustion = decay(self.exhaustion, rate, dt, 1.0);
    }

    pub fn set_exhaustion(&mut self, value: f32, cap: f32) {
        self.exhaustion = value.clamp(0.0, cap);
    }

    pub fn is_saturated(&self) -> bool {
        self.happiness >= HAPPINESS_MAX
    }

    /// (happiness, exhaustion) as 0-100 percentages for display.
    pub fn percentages(&self, sleep_threshold: f32) -> (f32, f32) {
        let exhaustion = if sleep_threshold > 0.0 {
            self.exhaustion / sleep_threshold * 100.0
        } else {
            0.0
        };
        (
            self.happiness / HAPPINESS_MAX * 100.0,
            exhaustion.clamp(0.0, 100.0),
        )
    }
}

impl Timers {
    /// Zero every timer. Happens on each re-engagement with the pointer.
    pub fn reset(&mut self) {
        *self = Timers::default();
    }
}

use glam::Vec2;

use crate::error::SimError;
use crate::tuning::Tuning;

/// Default unscaled sprite edge length in pixels.
pub const DEFAULT_SPRITE_SIZE: f32 = 32.0;

/// Canvas geometry owned by the host. Only changes on resize/zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub zoom: f32,
    /// Pet sprite edge length before zoom.
    pub sprite_size: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            zoom: 1.0,
            sprite_size: DEFAULT_SPRITE_SIZE,
        }
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let ok = |v: f32| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) && ok(self.zoom) && self.sprite_size >= 0.0 {
            Ok(())
        } else {
            Err(SimError::InvalidViewport {
                width: self.width,
                height: self.height,
                zoom: self.zoom,
            })
        }
    }

    pub fn scaled_sprite(&self) -> f32 {
        self.sprite_size * self.zoom
    }

    /// Largest legal position: canvas minus the scaled sprite, never negative.
    pub fn bounds(&self) -> Vec2 {
        let size = self.scaled_sprite();
        Vec2::new(
            (self.width - size).max(0.0),
            (self.height - size).max(0.0),
        )
    }

    /// Bake zoom into every distance and speed of `tuning`.
    pub fn reach(&self, tuning: &Tuning) -> Reach {
        let z = self.zoom;
        Reach {
            min_distance: tuning.min_distance * z,
            max_follow: tuning.max_follow_distance * z,
            activation: tuning.activation_distance * z,
            reengagement: tuning.reengagement_distance * z,
            couch_threshold: tuning.couch_threshold * z,
            food_threshold: tuning.food_threshold * z,
            min_speed: tuning.min_speed * z,
            max_speed: tuning.max_speed * z,
            food_separation: tuning.food_separation * z,
            couch_margin: tuning.tile_size * z * tuning.couch_margin_tiles,
            food_margin: tuning.tile_size * z * tuning.food_margin_tiles,
            bounds: self.bounds(),
        }
    }
}

/// Zoom-scaled distances, speeds and bounds. Recomputed on resize, not per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reach {
    pub min_distance: f32,
    pub max_follow: f32,
    pub activation: f32,
    pub reengagement: f32,
    pub couch_threshold: f32,
    pub food_threshold: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub food_separation: f32,
    pub couch_margin: f32,
    pub food_margin: f32,
    pub bounds: Vec2,
}

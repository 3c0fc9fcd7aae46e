use thiserror::Error;

/// Errors surfaced by the simulation's public entry points.
#[derive(Debug, Error)]
pub enum SimError {
    /// `dt` was negative, NaN or infinite. The tick is not applied.
    #[error("invalid timestep {0}: dt must be finite and non-negative")]
    InvalidTimestep(f32),

    #[error("invalid viewport {width}x{height} at zoom {zoom}")]
    InvalidViewport { width: f32, height: f32, zoom: f32 },

    /// The pet entity was despawned out from under the session.
    #[error("pet entity {0:?} is no longer in the world")]
    PetMissing(hecs::Entity),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("failed to read config {path}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

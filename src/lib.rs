//! Virtual pet simulation: a cat that chases the pointer, tires out, naps
//! on its couch and evolves while kept happy.
//!
//! The host drives [`Session::tick`] once per fixed step and renders from
//! the returned [`Snapshot`] plus the queued [`SimEvent`]s.

pub mod cat;
pub mod driver;
pub mod ecs;
pub mod error;
pub mod events;
pub mod session;
pub mod snapshot;
pub mod tuning;
pub mod viewport;

pub use ecs::components::PetState;
pub use error::SimError;
pub use events::{SimEvent, SoundCue};
pub use session::Session;
pub use snapshot::Snapshot;
pub use tuning::Tuning;
pub use viewport::Viewport;

use crate::cat::animation::AnimationCue;
use crate::ecs::components::PetState;

/// Fire-and-forget sound effects for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    Evolve,
    Ascend,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Eat => "eat",
            SoundCue::Evolve => "evolve",
            SoundCue::Ascend => "ascend",
        }
    }
}

/// Everything the simulation tells its collaborators, queued per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    Sound(SoundCue),
    Animation(AnimationCue),
    StateChanged { from: PetState, to: PetState },
    Evolved { level: u32, stage: String },
    /// Evolved past the final stage. The session is won and frozen.
    Ascended { level: u32 },
}

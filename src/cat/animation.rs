use crate::ecs::components::PetState;

/// Which sprite set a renderer should play for the pet.
/// Emitted only when stage, state or facing changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationCue {
    pub stage: String,
    pub state: PetState,
    pub facing_right: bool,
}

impl AnimationCue {
    pub fn new(stage: &str, state: PetState, facing_right: bool) -> Self {
        Self {
            stage: stage.to_string(),
            state,
            facing_right,
        }
    }

    /// Sprite set name, e.g. `kitten_awake_right`.
    pub fn name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.stage,
            self.state.label(),
            if self.facing_right { "right" } else { "left" }
        )
    }
}

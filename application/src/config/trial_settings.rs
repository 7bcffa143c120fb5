//! Trial behavior configuration.

use crate::ports::text_generation::GenerationParams;

/// Controls how a trial runs and how roles sample the generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSettings {
    /// Advertised round limit (reported in status, not enforced)
    pub max_rounds: u32,
    /// Character limit quoted to every role prompt
    pub max_response_length: usize,
    /// Parameters for role statements
    pub generation: GenerationParams,
    /// Parameters for rubric evaluations (near-deterministic)
    pub evaluation: GenerationParams,
}

impl Default for TrialSettings {
    fn default() -> Self {
        Self {
            max_rounds: 5,
            max_response_length: 500,
            generation: GenerationParams::new(2000, 0.7),
            evaluation: GenerationParams::new(300, 0.3),
        }
    }
}

impl TrialSettings {
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_max_response_length(mut self, length: usize) -> Self {
        self.max_response_length = length;
        self
    }

    pub fn with_generation(mut self, params: GenerationParams) -> Self {
        self.generation = params;
        self
    }

    pub fn with_evaluation(mut self, params: GenerationParams) -> Self {
        self.evaluation = params;
        self
    }
}

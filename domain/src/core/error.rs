//! Domain error types

use thiserror::Error;

/// Recoverable failures of trial operations.
///
/// None of these end the session: the display text is the descriptive
/// result shown to the caller, and the operation can be retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrialError {
    #[error("No active trial. Please start a trial first.")]
    Inactive,

    #[error("Witness '{0}' not found.")]
    WitnessNotFound(String),

    #[error("Evidence '{0}' not found.")]
    EvidenceNotFound(String),

    #[error("No witness currently on the stand.")]
    NoWitnessOnStand,
}

impl TrialError {
    /// Check if this error is a lookup miss the caller can retry with another key
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrialError::WitnessNotFound(_) | TrialError::EvidenceNotFound(_)
        )
    }
}

//! Step-completion transitions.

use std::collections::BTreeSet;

use crate::progress::progress_percent;
use crate::steps::{ApplicationStep, StepFlag};

/// The explicit, enumerated update persisted when a step completes.
///
/// `current_step`, `completed_steps`, `progress` and the per-step flags are
/// written together as one logical update; there is no way to express a
/// partial or unknown-field write.
#[derive(Debug, Clone, PartialEq)]
pub struct StepTransition {
    /// Position after the transition. At the last step this stays put; the
    /// controller hands off instead of advancing.
    pub current_step: ApplicationStep,
    /// Full completed set after the union, never a delta.
    pub completed_steps: BTreeSet<ApplicationStep>,
    pub progress: u8,
    /// Denormalized flags the completed step sets.
    pub flags: &'static [StepFlag],
}

impl StepTransition {
    /// Build the transition for completing `step` given the completed set
    /// read from the record. Re-completing a step is a set no-op, so
    /// progress never decreases.
    pub fn for_completion(
        completed_before: &BTreeSet<ApplicationStep>,
        step: ApplicationStep,
    ) -> Self {
        let mut completed_steps = completed_before.clone();
        completed_steps.insert(step);
        let progress = progress_percent(&completed_steps);
        Self {
            current_step: step.next().unwrap_or(step),
            completed_steps,
            progress,
            flags: step.completion_flags(),
        }
    }
}

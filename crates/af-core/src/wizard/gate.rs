//! Direct-navigation gating.

use std::collections::BTreeSet;

use crate::steps::ApplicationStep;

/// Whether direct navigation to `target` is permitted.
///
/// Allowed targets are the current step, any already-completed step, and
/// the immediate successor of the current step. Peeking one step ahead of
/// an uncompleted current step is deliberate product behavior, not a hole
/// in the gate.
pub fn jump_allowed(
    current_step: ApplicationStep,
    completed: &BTreeSet<ApplicationStep>,
    target: ApplicationStep,
) -> bool {
    target == current_step
        || current_step.next() == Some(target)
        || completed.contains(&target)
}

//! Progress projection.
//!
//! Pure functions over step-completion state. Consumed by the wizard
//! controller and by unrelated list/dashboard views ("Continue Application
//! (NN%)"), so their contract stays stable.

use std::collections::BTreeSet;

use crate::steps::{all_steps, ApplicationStep};

/// Percentage of registry steps completed, rounded to the nearest integer.
///
/// Always in `[0, 100]`. Membership in the registry is structural: the set
/// is typed over [`ApplicationStep`], so it cannot hold unregistered ids.
pub fn progress_percent(completed: &BTreeSet<ApplicationStep>) -> u8 {
    let total = all_steps().len();
    let done = completed.len().min(total);
    ((done * 100) as f64 / total as f64).round() as u8
}

/// First step in sequence order the applicant has not completed.
pub fn first_incomplete(completed: &BTreeSet<ApplicationStep>) -> Option<ApplicationStep> {
    all_steps()
        .iter()
        .map(|d| d.step)
        .find(|step| !completed.contains(step))
}

/// Where a returning applicant should land.
///
/// The persisted position wins unless it lies beyond the first incomplete
/// step (a stale or inconsistent position); then the first incomplete step
/// wins. With every step complete the persisted position stands.
pub fn resume_step(
    current_step: ApplicationStep,
    completed: &BTreeSet<ApplicationStep>,
) -> ApplicationStep {
    match first_incomplete(completed) {
        Some(incomplete) if current_step.index() > incomplete.index() => incomplete,
        _ => current_step,
    }
}

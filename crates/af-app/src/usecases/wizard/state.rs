//! Wizard position.

use af_core::application::{ApplicationRecord, Preselection};
use af_core::ids::ApplicationId;
use af_core::steps::ApplicationStep;

/// Where one wizard session stands.
///
/// The "application may or may not exist yet" situation is a sum type, not
/// a nullable record: every consumer handles both branches.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardPosition {
    /// No backing record yet. Only the first step renders; the
    /// preselection seeds its form.
    Fresh { preselection: Preselection },
    /// A record exists and the wizard is positioned at its current step.
    Active { record: ApplicationRecord },
    /// Terminal: the last step completed and navigation was handed off to
    /// the "view application" action. The wizard does not loop or reset.
    HandedOff { application_id: ApplicationId },
}

impl WizardPosition {
    /// The step whose unit should be mounted, `None` once handed off.
    pub fn active_step(&self) -> Option<ApplicationStep> {
        match self {
            WizardPosition::Fresh { .. } => Some(ApplicationStep::first()),
            WizardPosition::Active { record } => Some(record.current_step),
            WizardPosition::HandedOff { .. } => None,
        }
    }

    pub fn record(&self) -> Option<&ApplicationRecord> {
        match self {
            WizardPosition::Active { record } => Some(record),
            _ => None,
        }
    }

    pub fn preselection(&self) -> Option<&Preselection> {
        match self {
            WizardPosition::Fresh { preselection } => Some(preselection),
            _ => None,
        }
    }
}

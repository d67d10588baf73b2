//! Step input-collection unit port.

use async_trait::async_trait;

use crate::application::ApplicationRecord;
use crate::ids::ApplicantId;
use crate::steps::ApplicationStep;

/// One input-collection unit per wizard step.
///
/// The unit owns its field logic and validation. It receives the current
/// record (`None` before lazy creation) and the acting applicant, and
/// produces a view model for the hosting UI. Completion is signalled in
/// exactly one way: the host feeds the unit's collected payload into
/// `WizardController::complete_step`.
#[async_trait]
pub trait StepUnitPort: Send + Sync {
    /// The step this unit collects input for.
    fn step(&self) -> ApplicationStep;

    async fn render(
        &self,
        record: Option<&ApplicationRecord>,
        applicant: &ApplicantId,
    ) -> anyhow::Result<serde_json::Value>;
}

impl std::fmt::Debug for dyn StepUnitPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepUnitPort")
            .field("step", &self.step())
            .finish_non_exhaustive()
    }
}

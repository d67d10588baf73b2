//! Progress summary use case.

use std::sync::Arc;

use serde::Serialize;

use af_core::application::ApplicationStatus;
use af_core::ids::ApplicationId;
use af_core::ports::ApplicationRepositoryPort;
use af_core::progress::{progress_percent, resume_step};
use af_core::steps::ApplicationStep;
use af_core::wizard::WizardError;

/// What an intake card or dashboard tile needs to render
/// "Continue Application (NN%)".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressSummary {
    pub percent: u8,
    pub resume_step: ApplicationStep,
    pub status: ApplicationStatus,
}

/// Read-only projection over one stored application record.
///
/// Percent and resume step are recomputed from `completed_steps` rather
/// than read from the persisted `progress` column, so a summary never shows
/// a transiently stale value.
pub struct ApplicationProgress {
    repository: Arc<dyn ApplicationRepositoryPort>,
}

impl ApplicationProgress {
    pub fn new(repository: Arc<dyn ApplicationRepositoryPort>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, id: &ApplicationId) -> Result<ProgressSummary, WizardError> {
        let record = self.repository.get(id).await?;
        Ok(ProgressSummary {
            percent: progress_percent(&record.completed_steps),
            resume_step: resume_step(record.current_step, &record.completed_steps),
            status: record.status,
        })
    }
}

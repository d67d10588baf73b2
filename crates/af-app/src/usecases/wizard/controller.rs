//! Wizard controller.
//!
//! Drives one applicant through the step sequence for exactly one
//! application record. Every transition is a read-modify-write against the
//! record store; the in-memory position is committed only after the store
//! write succeeds, so a failed write leaves the applicant exactly where
//! they were.

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use af_core::application::{ApplicationRecord, Preselection, StepPayload, ValidationError};
use af_core::ids::{ApplicantId, ApplicationId};
use af_core::ports::{
    ApplicationRepositoryError, ApplicationRepositoryPort, Notification, NotificationPort,
};
use af_core::steps::ApplicationStep;
use af_core::wizard::{gate, StepTransition, WizardError};

use super::context::WizardContext;
use super::state::WizardPosition;

pub struct WizardController {
    repository: Arc<dyn ApplicationRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
    applicant_id: ApplicantId,
    context: WizardContext,
}

impl std::fmt::Debug for WizardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardController")
            .field("applicant_id", &self.applicant_id)
            .finish_non_exhaustive()
    }
}

impl WizardController {
    /// Open the wizard for an applicant: the resume entry point.
    ///
    /// With an `application_id` the record is loaded and the wizard starts
    /// at its persisted current step; a missing record is `NotFound` and a
    /// record owned by someone else is `Forbidden` (both render a blocking
    /// error view, no step UI). Without an id the wizard starts fresh at
    /// the first step, seeded by the preselection; no record is created
    /// until the first step completes.
    pub async fn open(
        repository: Arc<dyn ApplicationRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
        applicant_id: ApplicantId,
        application_id: Option<ApplicationId>,
        preselection: Preselection,
    ) -> Result<Self, WizardError> {
        let position = match application_id {
            Some(id) => {
                let record = repository.get(&id).await?;
                if record.applicant_id != applicant_id {
                    warn!(
                        application_id = %id,
                        "wizard open rejected: record not owned by acting applicant"
                    );
                    return Err(WizardError::Forbidden);
                }
                WizardPosition::Active { record }
            }
            None => WizardPosition::Fresh { preselection },
        };
        Ok(Self {
            repository,
            notifier,
            applicant_id,
            context: WizardContext::new(position),
        })
    }

    pub fn applicant_id(&self) -> &ApplicantId {
        &self.applicant_id
    }

    /// Snapshot of the current position.
    pub async fn position(&self) -> WizardPosition {
        self.context.position().await
    }

    /// A step unit finished collecting input and signalled completion.
    ///
    /// On the very first completion the record is created lazily from the
    /// payload. The transition (current step, completed set, progress,
    /// flags) is persisted as one logical write; on persistence failure
    /// nothing advances and a retryable message is surfaced.
    pub async fn complete_step(
        &self,
        step: ApplicationStep,
        payload: StepPayload,
    ) -> Result<WizardPosition, WizardError> {
        let _guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.wizard.complete_step", step = %step);
        async {
            let record = match self.context.position().await {
                WizardPosition::Fresh { .. } => {
                    if step != ApplicationStep::first() {
                        return Err(WizardError::Forbidden);
                    }
                    self.create_record(payload).await?
                }
                WizardPosition::Active { record } => {
                    if !record.is_draft() {
                        return Err(WizardError::Forbidden);
                    }
                    // Completing a step is only legitimate from a position
                    // the applicant could navigate to.
                    if !gate::jump_allowed(record.current_step, &record.completed_steps, step) {
                        return Err(WizardError::Forbidden);
                    }
                    record
                }
                WizardPosition::HandedOff { .. } => return Err(WizardError::Forbidden),
            };

            let transition = StepTransition::for_completion(&record.completed_steps, step);
            let updated = match self.repository.apply_transition(&record.id, &transition).await {
                Ok(updated) => updated,
                Err(err) => return Err(self.store_failure(err, "saving your progress").await),
            };
            info!(
                application_id = %updated.id,
                completed = %step,
                now_at = %updated.current_step,
                progress = updated.progress,
                "wizard step completed"
            );

            let position = if step.is_last() {
                // Hand off to "view application"; the wizard is done.
                WizardPosition::HandedOff {
                    application_id: updated.id.clone(),
                }
            } else {
                WizardPosition::Active { record: updated }
            };
            self.context.set_position(position.clone()).await;
            Ok(position)
        }
        .instrument(span)
        .await
    }

    /// Step back one position. Completed steps and progress are untouched;
    /// going back never un-completes a step.
    pub async fn go_back(&self) -> Result<WizardPosition, WizardError> {
        let _guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.wizard.go_back");
        async {
            let WizardPosition::Active { record } = self.context.position().await else {
                return Err(WizardError::Forbidden);
            };
            if !record.is_draft() {
                return Err(WizardError::Forbidden);
            }
            let Some(previous) = record.current_step.previous() else {
                return Err(WizardError::Forbidden);
            };
            self.reposition(&record, previous).await
        }
        .instrument(span)
        .await
    }

    /// Direct navigation, e.g. from a clickable progress indicator.
    ///
    /// Gated: the target must be completed, current, or the immediate next
    /// step. A rejected target is `Forbidden` with no store call and no
    /// state change.
    pub async fn go_to_step(
        &self,
        target: ApplicationStep,
    ) -> Result<WizardPosition, WizardError> {
        let _guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.wizard.go_to_step", target = %target);
        async {
            let WizardPosition::Active { record } = self.context.position().await else {
                return Err(WizardError::Forbidden);
            };
            if !record.is_draft() {
                return Err(WizardError::Forbidden);
            }
            if !gate::jump_allowed(record.current_step, &record.completed_steps, target) {
                return Err(WizardError::Forbidden);
            }
            self.reposition(&record, target).await
        }
        .instrument(span)
        .await
    }

    async fn create_record(&self, payload: StepPayload) -> Result<ApplicationRecord, WizardError> {
        let StepPayload::Basics(basics) = payload else {
            // Nothing to create a record from.
            return Err(ValidationError::MissingProgram.into());
        };
        let new = basics.into_new_application(self.applicant_id.clone())?;
        match self.repository.create(&new).await {
            Ok(record) => {
                info!(application_id = %record.id, program_id = %record.program_id,
                    "application record created");
                Ok(record)
            }
            Err(err) => Err(self.store_failure(err, "starting your application").await),
        }
    }

    async fn reposition(
        &self,
        record: &ApplicationRecord,
        step: ApplicationStep,
    ) -> Result<WizardPosition, WizardError> {
        match self.repository.set_current_step(&record.id, step).await {
            Ok(updated) => {
                let position = WizardPosition::Active { record: updated };
                self.context.set_position(position.clone()).await;
                Ok(position)
            }
            Err(err) => Err(self.store_failure(err, "moving between steps").await),
        }
    }

    /// Map a store failure, surfacing retryable ones as a transient toast.
    async fn store_failure(&self, err: ApplicationRepositoryError, doing: &str) -> WizardError {
        match err {
            ApplicationRepositoryError::NotFound => WizardError::NotFound,
            ApplicationRepositoryError::Storage(message) => {
                warn!(error = %message, "wizard store write failed");
                let note = Notification::error(format!(
                    "Something went wrong while {doing}. Please try again."
                ));
                if let Err(notify_err) = self.notifier.notify(&note).await {
                    warn!(error = %notify_err, "notification delivery failed");
                }
                WizardError::Persistence(anyhow::anyhow!(message))
            }
        }
    }
}

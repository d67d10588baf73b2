//! Application record store port.

use async_trait::async_trait;
use thiserror::Error;

use crate::application::{ApplicationRecord, NewApplication};
use crate::ids::ApplicationId;
use crate::steps::ApplicationStep;
use crate::wizard::StepTransition;

#[derive(Debug, Error)]
pub enum ApplicationRepositoryError {
    #[error("application not found")]
    NotFound,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Typed CRUD over application records.
///
/// The wizard never issues partial-field updates: every write goes through
/// one of the two update operations below, each covering exactly the fields
/// its transition owns.
#[async_trait]
pub trait ApplicationRepositoryPort: Send + Sync {
    /// Create a record for the given applicant/program/intake selection.
    ///
    /// Idempotent: when a record for the same (applicant, program, intake)
    /// already exists it is returned as-is, never duplicated.
    async fn create(
        &self,
        new: &NewApplication,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError>;

    async fn get(
        &self,
        id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError>;

    /// Apply a step-completion transition as one logical write covering
    /// `current_step`, `completed_steps`, `progress` and the per-step
    /// flags.
    ///
    /// `completed_steps` must be merged by set-union against the stored
    /// row (a stale snapshot may never under-count a concurrent writer);
    /// `progress` is recomputed from the merged set and `current_step` is
    /// last-writer-wins. Returns the record as stored after the write.
    async fn apply_transition(
        &self,
        id: &ApplicationId,
        transition: &StepTransition,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError>;

    /// Persist only the wizard position (go-back / direct navigation).
    /// Completed steps and progress are untouched.
    async fn set_current_step(
        &self,
        id: &ApplicationId,
        step: ApplicationStep,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError>;
}

//! Step completion payloads and record-creation input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{ApplicantId, IntakeId, ProgramId};

/// Whether the applicant is applying for a regular program or a short course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseType {
    Regular,
    Short,
}

impl Default for CourseType {
    fn default() -> Self {
        CourseType::Regular
    }
}

/// Seeds for the first step's form, carried on external entry links
/// (e.g. an "Apply" button on an intake card).
///
/// Preselection never creates or mutates a record; it only prefills input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preselection {
    pub program_id: Option<ProgramId>,
    pub intake_id: Option<IntakeId>,
    pub course_type: Option<CourseType>,
}

/// Wire-shaped input collected by the basics step unit.
///
/// Fields are optional because they arrive from outside the domain; they
/// are validated into a [`NewApplication`] before any store call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicsPayload {
    pub program_id: Option<ProgramId>,
    pub intake_id: Option<IntakeId>,
    #[serde(default)]
    pub course_type: CourseType,
}

/// Creation-payload validation failures, surfaced back to the step unit as
/// field-level feedback. No state transition happens on these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a program must be selected")]
    MissingProgram,
    #[error("an intake must be selected for a regular course")]
    MissingIntake,
}

/// Validated input for creating an application record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub applicant_id: ApplicantId,
    pub program_id: ProgramId,
    pub intake_id: Option<IntakeId>,
    pub is_short_course: bool,
}

impl BasicsPayload {
    /// Validate this payload into creation input for the given applicant.
    pub fn into_new_application(
        self,
        applicant_id: ApplicantId,
    ) -> Result<NewApplication, ValidationError> {
        let program_id = self.program_id.ok_or(ValidationError::MissingProgram)?;
        let is_short_course = self.course_type == CourseType::Short;
        let intake_id = match (self.intake_id, is_short_course) {
            (Some(intake_id), _) => Some(intake_id),
            (None, true) => None,
            (None, false) => return Err(ValidationError::MissingIntake),
        };
        Ok(NewApplication {
            applicant_id,
            program_id,
            intake_id,
            is_short_course,
        })
    }
}

/// What a step unit hands to `complete_step` when it finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepPayload {
    /// Program/intake selection from the basics step. Required the first
    /// time, since it carries everything record creation needs.
    Basics(BasicsPayload),
    /// The step unit persisted its own fields through its own collaborator;
    /// the wizard only records completion.
    Collected,
}

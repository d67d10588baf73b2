//! The persisted representation of one applicant's application.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::{ApplicantId, ApplicationId, IntakeId, ProgramId};
use crate::steps::{ApplicationStep, StepFlag};

/// Lifecycle status of an application.
///
/// The wizard only ever sees `Draft`; every other status is reached through
/// the submission/review collaborators and renders the record read-only for
/// navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Draft,
    Submitted,
    UnderReview,
    Accepted,
    Rejected,
    Enrolled,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Draft => "DRAFT",
            ApplicationStatus::Submitted => "SUBMITTED",
            ApplicationStatus::UnderReview => "UNDER_REVIEW",
            ApplicationStatus::Accepted => "ACCEPTED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Enrolled => "ENROLLED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string that does not name a known lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown application status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for ApplicationStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(ApplicationStatus::Draft),
            "SUBMITTED" => Ok(ApplicationStatus::Submitted),
            "UNDER_REVIEW" => Ok(ApplicationStatus::UnderReview),
            "ACCEPTED" => Ok(ApplicationStatus::Accepted),
            "REJECTED" => Ok(ApplicationStatus::Rejected),
            "ENROLLED" => Ok(ApplicationStatus::Enrolled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One applicant's in-progress or submitted application.
///
/// `completed_steps` is the source of truth for progress; the six boolean
/// flags are denormalized copies of its membership for list/dashboard
/// consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub applicant_id: ApplicantId,
    pub program_id: ProgramId,
    /// `None` only for short courses.
    pub intake_id: Option<IntakeId>,
    /// Set at creation, immutable afterwards.
    pub is_short_course: bool,
    pub current_step: ApplicationStep,
    pub completed_steps: BTreeSet<ApplicationStep>,
    /// 0-100, derived from `completed_steps` but persisted for fast reads.
    pub progress: u8,
    pub basics_complete: bool,
    pub personal_info_complete: bool,
    pub education_complete: bool,
    pub program_info_complete: bool,
    pub documents_complete: bool,
    pub declaration_complete: bool,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationRecord {
    /// Whether the wizard may still mutate this record.
    pub fn is_draft(&self) -> bool {
        self.status == ApplicationStatus::Draft
    }

    pub fn flag(&self, flag: StepFlag) -> bool {
        match flag {
            StepFlag::Basics => self.basics_complete,
            StepFlag::PersonalInfo => self.personal_info_complete,
            StepFlag::Education => self.education_complete,
            StepFlag::ProgramInfo => self.program_info_complete,
            StepFlag::Documents => self.documents_complete,
            StepFlag::Declaration => self.declaration_complete,
        }
    }

    pub fn set_flag(&mut self, flag: StepFlag) {
        match flag {
            StepFlag::Basics => self.basics_complete = true,
            StepFlag::PersonalInfo => self.personal_info_complete = true,
            StepFlag::Education => self.education_complete = true,
            StepFlag::ProgramInfo => self.program_info_complete = true,
            StepFlag::Documents => self.documents_complete = true,
            StepFlag::Declaration => self.declaration_complete = true,
        }
    }
}

//! Application record mapper.

use std::collections::BTreeSet;

use anyhow::Context;
use chrono::{DateTime, Utc};
use tracing::warn;

use af_core::application::{ApplicationRecord, ApplicationStatus, NewApplication};
use af_core::ids::{ApplicantId, ApplicationId, IntakeId, ProgramId};
use af_core::steps::ApplicationStep;

use crate::db::models::{ApplicationRow, NewApplicationRow};

pub struct ApplicationMapper;

impl ApplicationMapper {
    /// Map a stored row into the domain record.
    ///
    /// A persisted `current_step` that no longer parses is clamped to the
    /// first step (logged, never fatal); unregistered entries inside the
    /// stored `completed_steps` array are dropped the same way. A corrupt
    /// JSON array or an unknown status is an error: those are written only
    /// by this adapter and by trusted collaborators, so damage there means
    /// the row itself is unusable.
    pub fn to_domain(row: &ApplicationRow) -> anyhow::Result<ApplicationRecord> {
        let current_step = match row.current_step.parse::<ApplicationStep>() {
            Ok(step) => step,
            Err(err) => {
                warn!(
                    application_id = %row.id,
                    %err,
                    "clamping unparseable wizard position to the first step"
                );
                ApplicationStep::first()
            }
        };
        let completed_steps = Self::decode_steps(&row.id, &row.completed_steps)?;
        let status = row.status.parse::<ApplicationStatus>()?;
        let created_at = millis_to_datetime(row.created_at_ms)
            .with_context(|| format!("created_at out of range for application {}", row.id))?;
        let updated_at = millis_to_datetime(row.updated_at_ms)
            .with_context(|| format!("updated_at out of range for application {}", row.id))?;

        Ok(ApplicationRecord {
            id: ApplicationId::from(row.id.as_str()),
            applicant_id: ApplicantId::from(row.applicant_id.as_str()),
            program_id: ProgramId::from(row.program_id.as_str()),
            intake_id: row.intake_id.as_deref().map(IntakeId::from),
            is_short_course: row.is_short_course,
            current_step,
            completed_steps,
            progress: row.progress.clamp(0, 100) as u8,
            basics_complete: row.basics_complete,
            personal_info_complete: row.personal_info_complete,
            education_complete: row.education_complete,
            program_info_complete: row.program_info_complete,
            documents_complete: row.documents_complete,
            declaration_complete: row.declaration_complete,
            status,
            created_at,
            updated_at,
        })
    }

    /// Build the insert row for a freshly created application: positioned
    /// at the first step, nothing completed, status DRAFT.
    pub fn to_insert_row(new: &NewApplication) -> NewApplicationRow {
        let now = Utc::now().timestamp_millis();
        NewApplicationRow {
            id: ApplicationId::new().into_inner(),
            applicant_id: new.applicant_id.as_str().to_string(),
            program_id: new.program_id.as_str().to_string(),
            intake_id: new.intake_id.as_ref().map(|id| id.as_str().to_string()),
            is_short_course: new.is_short_course,
            current_step: ApplicationStep::first().id().to_string(),
            completed_steps: "[]".to_string(),
            progress: 0,
            basics_complete: false,
            personal_info_complete: false,
            education_complete: false,
            program_info_complete: false,
            documents_complete: false,
            declaration_complete: false,
            status: ApplicationStatus::Draft.as_str().to_string(),
            created_at_ms: now,
            updated_at_ms: now,
        }
    }

    /// Decode a stored JSON array of step ids, dropping unregistered ones.
    pub fn decode_steps(
        application_id: &str,
        raw: &str,
    ) -> anyhow::Result<BTreeSet<ApplicationStep>> {
        let raw_steps: Vec<String> = serde_json::from_str(raw)
            .with_context(|| format!("corrupt completed_steps for application {application_id}"))?;
        let mut steps = BTreeSet::new();
        for raw_step in raw_steps {
            match raw_step.parse::<ApplicationStep>() {
                Ok(step) => {
                    steps.insert(step);
                }
                Err(err) => warn!(
                    application_id = %application_id,
                    %err,
                    "dropping unregistered completed step"
                ),
            }
        }
        Ok(steps)
    }

    /// Encode a completed set as a JSON array of step ids, ordinal order.
    pub fn encode_steps(steps: &BTreeSet<ApplicationStep>) -> anyhow::Result<String> {
        Ok(serde_json::to_string(steps)?)
    }
}

fn millis_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

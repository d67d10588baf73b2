//! Diesel-backed application record store.

use chrono::Utc;
use diesel::Connection;
use diesel::ExpressionMethods;
use diesel::OptionalExtension;
use diesel::QueryDsl;
use diesel::RunQueryDsl;
use diesel::SqliteConnection;

use af_core::application::{ApplicationRecord, NewApplication};
use af_core::ids::ApplicationId;
use af_core::ports::{ApplicationRepositoryError, ApplicationRepositoryPort};
use af_core::progress::progress_percent;
use af_core::steps::{ApplicationStep, StepFlag};
use af_core::wizard::StepTransition;

use crate::db::executor::DbExecutor;
use crate::db::mappers::ApplicationMapper;
use crate::db::models::ApplicationRow;
use crate::db::schema::t_application;

pub struct DieselApplicationRepository<E> {
    executor: E,
}

impl<E> DieselApplicationRepository<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn storage(err: anyhow::Error) -> ApplicationRepositoryError {
    ApplicationRepositoryError::Storage(format!("{err:#}"))
}

/// Look up an existing record for the same (applicant, program, intake)
/// selection. SQLite treats NULLs as distinct in unique indexes, so
/// short-course idempotency relies on this probe inside the transaction.
fn find_existing(
    conn: &mut SqliteConnection,
    new: &NewApplication,
) -> anyhow::Result<Option<ApplicationRow>> {
    let base = t_application::table
        .filter(t_application::applicant_id.eq(new.applicant_id.as_str()))
        .filter(t_application::program_id.eq(new.program_id.as_str()));
    let row = match new.intake_id.as_ref() {
        Some(intake_id) => base
            .filter(t_application::intake_id.eq(intake_id.as_str()))
            .first::<ApplicationRow>(conn)
            .optional()?,
        None => base
            .filter(t_application::intake_id.is_null())
            .first::<ApplicationRow>(conn)
            .optional()?,
    };
    Ok(row)
}

fn load_row(
    conn: &mut SqliteConnection,
    id: &ApplicationId,
) -> anyhow::Result<Option<ApplicationRow>> {
    Ok(t_application::table
        .filter(t_application::id.eq(id.as_str()))
        .first::<ApplicationRow>(conn)
        .optional()?)
}

#[async_trait::async_trait]
impl<E> ApplicationRepositoryPort for DieselApplicationRepository<E>
where
    E: DbExecutor + Send + Sync,
{
    async fn create(
        &self,
        new: &NewApplication,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError> {
        self.executor
            .with_conn(|conn| {
                conn.transaction(|conn| {
                    if let Some(existing) = find_existing(conn, new)? {
                        // Idempotent creation: same selection, same record.
                        return ApplicationMapper::to_domain(&existing);
                    }
                    let row = ApplicationMapper::to_insert_row(new);
                    diesel::insert_into(t_application::table)
                        .values(&row)
                        .execute(conn)?;
                    let inserted = t_application::table
                        .filter(t_application::id.eq(&row.id))
                        .first::<ApplicationRow>(conn)?;
                    ApplicationMapper::to_domain(&inserted)
                })
            })
            .map_err(storage)
    }

    async fn get(
        &self,
        id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError> {
        let row = self
            .executor
            .with_conn(|conn| load_row(conn, id))
            .map_err(storage)?;
        match row {
            Some(row) => ApplicationMapper::to_domain(&row).map_err(storage),
            None => Err(ApplicationRepositoryError::NotFound),
        }
    }

    async fn apply_transition(
        &self,
        id: &ApplicationId,
        transition: &StepTransition,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError> {
        let updated = self
            .executor
            .with_conn(|conn| {
                conn.transaction(|conn| {
                    let Some(row) = load_row(conn, id)? else {
                        return Ok(None);
                    };

                    // Merge against the stored row, not the caller's
                    // snapshot: a concurrent writer's completions survive.
                    let mut completed =
                        ApplicationMapper::decode_steps(&row.id, &row.completed_steps)?;
                    completed.extend(transition.completed_steps.iter().copied());
                    let progress = i32::from(progress_percent(&completed));

                    let mut basics_complete = row.basics_complete;
                    let mut personal_info_complete = row.personal_info_complete;
                    let mut education_complete = row.education_complete;
                    let mut program_info_complete = row.program_info_complete;
                    let mut documents_complete = row.documents_complete;
                    let mut declaration_complete = row.declaration_complete;
                    for flag in transition.flags {
                        match flag {
                            StepFlag::Basics => basics_complete = true,
                            StepFlag::PersonalInfo => personal_info_complete = true,
                            StepFlag::Education => education_complete = true,
                            StepFlag::ProgramInfo => program_info_complete = true,
                            StepFlag::Documents => documents_complete = true,
                            StepFlag::Declaration => declaration_complete = true,
                        }
                    }

                    diesel::update(t_application::table.filter(t_application::id.eq(id.as_str())))
                        .set((
                            t_application::current_step.eq(transition.current_step.id()),
                            t_application::completed_steps
                                .eq(ApplicationMapper::encode_steps(&completed)?),
                            t_application::progress.eq(progress),
                            t_application::basics_complete.eq(basics_complete),
                            t_application::personal_info_complete.eq(personal_info_complete),
                            t_application::education_complete.eq(education_complete),
                            t_application::program_info_complete.eq(program_info_complete),
                            t_application::documents_complete.eq(documents_complete),
                            t_application::declaration_complete.eq(declaration_complete),
                            t_application::updated_at_ms.eq(Utc::now().timestamp_millis()),
                        ))
                        .execute(conn)?;

                    let stored = t_application::table
                        .filter(t_application::id.eq(id.as_str()))
                        .first::<ApplicationRow>(conn)?;
                    Ok(Some(ApplicationMapper::to_domain(&stored)?))
                })
            })
            .map_err(storage)?;
        updated.ok_or(ApplicationRepositoryError::NotFound)
    }

    async fn set_current_step(
        &self,
        id: &ApplicationId,
        step: ApplicationStep,
    ) -> Result<ApplicationRecord, ApplicationRepositoryError> {
        let updated = self
            .executor
            .with_conn(|conn| {
                conn.transaction(|conn| {
                    let affected = diesel::update(
                        t_application::table.filter(t_application::id.eq(id.as_str())),
                    )
                    .set((
                        t_application::current_step.eq(step.id()),
                        t_application::updated_at_ms.eq(Utc::now().timestamp_millis()),
                    ))
                    .execute(conn)?;
                    if affected == 0 {
                        return Ok(None);
                    }
                    let stored = t_application::table
                        .filter(t_application::id.eq(id.as_str()))
                        .first::<ApplicationRow>(conn)?;
                    Ok(Some(ApplicationMapper::to_domain(&stored)?))
                })
            })
            .map_err(storage)?;
        updated.ok_or(ApplicationRepositoryError::NotFound)
    }
}

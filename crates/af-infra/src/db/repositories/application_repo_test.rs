//! Repository tests against a real on-disk SQLite database.

use std::collections::BTreeSet;

use diesel::ExpressionMethods;
use diesel::QueryDsl;
use diesel::RunQueryDsl;
use tempfile::TempDir;

use af_core::application::{ApplicationStatus, NewApplication};
use af_core::ids::{ApplicantId, IntakeId, ProgramId};
use af_core::ports::{ApplicationRepositoryError, ApplicationRepositoryPort};
use af_core::steps::ApplicationStep::{self, *};
use af_core::wizard::StepTransition;

use crate::db::executor::DieselSqliteExecutor;
use crate::db::pool::{init_db_pool, DbPool};
use crate::db::repositories::DieselApplicationRepository;
use crate::db::schema::t_application;

fn setup() -> (TempDir, DbPool, DieselApplicationRepository<DieselSqliteExecutor>) {
    let dir = tempfile::tempdir().unwrap();
    let url = dir.path().join("admitflow-test.db");
    let pool = init_db_pool(url.to_str().unwrap()).unwrap();
    let repository = DieselApplicationRepository::new(DieselSqliteExecutor::new(pool.clone()));
    (dir, pool, repository)
}

fn new_application(intake: Option<&str>) -> NewApplication {
    NewApplication {
        applicant_id: ApplicantId::from("applicant-1"),
        program_id: ProgramId::from("P1"),
        intake_id: intake.map(IntakeId::from),
        is_short_course: intake.is_none(),
    }
}

#[tokio::test]
async fn created_records_start_at_the_first_step() {
    let (_dir, _pool, repository) = setup();
    let record = repository.create(&new_application(Some("I1"))).await.unwrap();

    assert_eq!(record.current_step, Basics);
    assert!(record.completed_steps.is_empty());
    assert_eq!(record.progress, 0);
    assert_eq!(record.status, ApplicationStatus::Draft);
    assert!(!record.is_short_course);

    let loaded = repository.get(&record.id).await.unwrap();
    assert_eq!(loaded, record);
}

#[tokio::test]
async fn creation_is_idempotent_per_selection() {
    let (_dir, _pool, repository) = setup();
    let first = repository.create(&new_application(Some("I1"))).await.unwrap();
    let second = repository.create(&new_application(Some("I1"))).await.unwrap();
    assert_eq!(first.id, second.id);

    // Short courses have no intake; the NULL column still dedupes.
    let short_a = repository.create(&new_application(None)).await.unwrap();
    let short_b = repository.create(&new_application(None)).await.unwrap();
    assert_eq!(short_a.id, short_b.id);
    assert_ne!(first.id, short_a.id);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let (_dir, _pool, repository) = setup();
    let err = repository
        .get(&af_core::ids::ApplicationId::from("missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApplicationRepositoryError::NotFound));
}

#[tokio::test]
async fn transitions_persist_the_full_update() {
    let (_dir, _pool, repository) = setup();
    let record = repository.create(&new_application(Some("I1"))).await.unwrap();

    let transition = StepTransition::for_completion(&record.completed_steps, Basics);
    let updated = repository
        .apply_transition(&record.id, &transition)
        .await
        .unwrap();

    assert_eq!(updated.current_step, Personal);
    assert_eq!(updated.completed_steps, [Basics].into_iter().collect());
    assert_eq!(updated.progress, 14);
    assert!(updated.basics_complete);
    assert!(updated.program_info_complete);
    assert!(!updated.personal_info_complete);
    assert!(updated.updated_at >= record.updated_at);
}

#[tokio::test]
async fn stale_snapshots_merge_by_set_union() {
    let (_dir, _pool, repository) = setup();
    let record = repository.create(&new_application(Some("I1"))).await.unwrap();

    // Two writers, both starting from the freshly created (empty) record.
    let stale_before: BTreeSet<ApplicationStep> = BTreeSet::new();
    let t_basics = StepTransition::for_completion(&stale_before, Basics);
    let t_personal = StepTransition::for_completion(&stale_before, Personal);

    repository
        .apply_transition(&record.id, &t_basics)
        .await
        .unwrap();
    let merged = repository
        .apply_transition(&record.id, &t_personal)
        .await
        .unwrap();

    // The second write's stale snapshot must not erase the first's step.
    assert_eq!(
        merged.completed_steps,
        [Basics, Personal].into_iter().collect()
    );
    assert_eq!(merged.progress, 29);
    assert!(merged.basics_complete);
    assert!(merged.personal_info_complete);
}

#[tokio::test]
async fn set_current_step_touches_position_only() {
    let (_dir, _pool, repository) = setup();
    let record = repository.create(&new_application(Some("I1"))).await.unwrap();
    let transition = StepTransition::for_completion(&record.completed_steps, Basics);
    let after_completion = repository
        .apply_transition(&record.id, &transition)
        .await
        .unwrap();

    let moved = repository
        .set_current_step(&record.id, Basics)
        .await
        .unwrap();
    assert_eq!(moved.current_step, Basics);
    assert_eq!(moved.completed_steps, after_completion.completed_steps);
    assert_eq!(moved.progress, after_completion.progress);
}

#[tokio::test]
async fn unparseable_stored_position_is_clamped_on_load() {
    let (_dir, pool, repository) = setup();
    let record = repository.create(&new_application(Some("I1"))).await.unwrap();

    let mut conn = pool.get().unwrap();
    diesel::update(t_application::table.filter(t_application::id.eq(record.id.as_str())))
        .set(t_application::current_step.eq("payment"))
        .execute(&mut conn)
        .unwrap();

    let loaded = repository.get(&record.id).await.unwrap();
    assert_eq!(loaded.current_step, Basics);
}

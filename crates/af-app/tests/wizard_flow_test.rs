//! End-to-end wizard flow over a real SQLite-backed record store.

use std::sync::Arc;

use tempfile::TempDir;

use af_app::{ApplicationProgress, WizardController, WizardPosition};
use af_core::application::{
    ApplicationStatus, BasicsPayload, CourseType, Preselection, StepPayload,
};
use af_core::ids::{ApplicantId, ApplicationId, IntakeId, ProgramId};
use af_core::ports::{ApplicationRepositoryPort, Notification, NotificationPort};
use af_core::steps::ApplicationStep::*;
use af_core::wizard::WizardError;
use af_infra::{init_db_pool, DbPool, DieselApplicationRepository, DieselSqliteExecutor};

struct NullNotifier;

#[async_trait::async_trait]
impl NotificationPort for NullNotifier {
    async fn notify(&self, _notification: &Notification) -> anyhow::Result<()> {
        Ok(())
    }
}

fn store(dir: &TempDir) -> (DbPool, Arc<DieselApplicationRepository<DieselSqliteExecutor>>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    let url = dir.path().join("admitflow.db");
    let pool = init_db_pool(url.to_str().unwrap()).unwrap();
    let repository = Arc::new(DieselApplicationRepository::new(DieselSqliteExecutor::new(
        pool.clone(),
    )));
    (pool, repository)
}

async fn fresh_controller(
    repository: Arc<DieselApplicationRepository<DieselSqliteExecutor>>,
) -> WizardController {
    WizardController::open(
        repository,
        Arc::new(NullNotifier),
        ApplicantId::from("applicant-1"),
        None,
        Preselection::default(),
    )
    .await
    .unwrap()
}

fn basics_payload() -> StepPayload {
    StepPayload::Basics(BasicsPayload {
        program_id: Some(ProgramId::from("P1")),
        intake_id: Some(IntakeId::from("I1")),
        course_type: CourseType::Regular,
    })
}

#[tokio::test]
async fn the_wizard_walks_an_application_from_nothing_to_handoff() {
    let dir = tempfile::tempdir().unwrap();
    let (_pool, repository) = store(&dir);
    let controller = fresh_controller(repository.clone()).await;

    // Fresh: no record until the first step completes.
    assert!(matches!(
        controller.position().await,
        WizardPosition::Fresh { .. }
    ));

    // Complete basics: lazy creation, position advances, progress 1/7.
    let position = controller
        .complete_step(Basics, basics_payload())
        .await
        .unwrap();
    let record = position.record().unwrap().clone();
    assert_eq!(record.current_step, Personal);
    assert_eq!(record.completed_steps, [Basics].into_iter().collect());
    assert_eq!(record.progress, 14);

    // Complete personal: 2/7.
    let position = controller
        .complete_step(Personal, StepPayload::Collected)
        .await
        .unwrap();
    let after_personal = position.record().unwrap().clone();
    assert_eq!(after_personal.current_step, Education);
    assert_eq!(
        after_personal.completed_steps,
        [Basics, Personal].into_iter().collect()
    );
    assert_eq!(after_personal.progress, 29);

    // Going back moves position only.
    let position = controller.go_back().await.unwrap();
    let after_back = position.record().unwrap().clone();
    assert_eq!(after_back.current_step, Personal);
    assert_eq!(after_back.completed_steps, after_personal.completed_steps);
    assert_eq!(after_back.progress, 29);

    // Review is not reachable from personal.
    let err = controller.go_to_step(Review).await.unwrap_err();
    assert!(matches!(err, WizardError::Forbidden));
    assert_eq!(
        controller.position().await.record().unwrap().current_step,
        Personal
    );

    // Walk the rest of the sequence; progress only ever grows.
    let mut last_progress = 29;
    for step in [Personal, Education, Sponsor, Documents, Review] {
        let position = controller
            .complete_step(step, StepPayload::Collected)
            .await
            .unwrap();
        let progress = position.record().unwrap().progress;
        assert!(progress >= last_progress, "progress went backwards at {step}");
        last_progress = progress;
    }

    // The last step hands off instead of advancing.
    let position = controller
        .complete_step(Declaration, StepPayload::Collected)
        .await
        .unwrap();
    let WizardPosition::HandedOff { application_id } = position else {
        panic!("expected handoff after the declaration step");
    };
    assert_eq!(application_id, record.id);

    let stored = repository.get(&record.id).await.unwrap();
    assert_eq!(stored.progress, 100);
    assert_eq!(stored.current_step, Declaration);
    assert_eq!(stored.status, ApplicationStatus::Draft);
    assert!(stored.declaration_complete);
}

#[tokio::test]
async fn completing_basics_twice_creates_one_record() {
    let dir = tempfile::tempdir().unwrap();
    let (_pool, repository) = store(&dir);

    let first = fresh_controller(repository.clone()).await;
    let position = first.complete_step(Basics, basics_payload()).await.unwrap();
    let first_id = position.record().unwrap().id.clone();

    // A second tab, same applicant, same selection.
    let second = fresh_controller(repository.clone()).await;
    let position = second
        .complete_step(Basics, basics_payload())
        .await
        .unwrap();
    assert_eq!(position.record().unwrap().id, first_id);
}

#[tokio::test]
async fn a_resume_link_reopens_at_the_persisted_step() {
    let dir = tempfile::tempdir().unwrap();
    let (_pool, repository) = store(&dir);

    let controller = fresh_controller(repository.clone()).await;
    controller
        .complete_step(Basics, basics_payload())
        .await
        .unwrap();
    let id = controller
        .position()
        .await
        .record()
        .unwrap()
        .id
        .clone();
    drop(controller);

    let resumed = WizardController::open(
        repository.clone(),
        Arc::new(NullNotifier),
        ApplicantId::from("applicant-1"),
        Some(id.clone()),
        Preselection::default(),
    )
    .await
    .unwrap();
    assert_eq!(
        resumed.position().await.record().unwrap().current_step,
        Personal
    );

    // Someone else's resume link is rejected outright.
    let err = WizardController::open(
        repository.clone(),
        Arc::new(NullNotifier),
        ApplicantId::from("impostor"),
        Some(id),
        Preselection::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, WizardError::Forbidden));
}

#[tokio::test]
async fn dashboards_read_a_stable_progress_summary() {
    let dir = tempfile::tempdir().unwrap();
    let (_pool, repository) = store(&dir);

    let controller = fresh_controller(repository.clone()).await;
    controller
        .complete_step(Basics, basics_payload())
        .await
        .unwrap();
    let id = controller.position().await.record().unwrap().id.clone();

    let summary = ApplicationProgress::new(repository.clone())
        .execute(&id)
        .await
        .unwrap();
    assert_eq!(summary.percent, 14);
    assert_eq!(summary.resume_step, Personal);
    assert_eq!(summary.status, ApplicationStatus::Draft);

    let missing = ApplicationProgress::new(repository)
        .execute(&ApplicationId::from("missing"))
        .await
        .unwrap_err();
    assert!(matches!(missing, WizardError::NotFound));
}

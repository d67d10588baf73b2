//! Open/resume entry point.

use std::sync::Arc;

use af_core::application::Preselection;
use af_core::ids::ApplicationId;
use af_core::ports::{ApplicationRepositoryPort, NotificationPort, SessionPort};
use af_core::wizard::WizardError;

use super::controller::WizardController;

/// Use case the routing layer calls to enter the wizard.
///
/// Resolves the acting applicant from the current session, then opens the
/// controller with an optional application id (resume link) and optional
/// preselection (intake-card "Apply" links).
pub struct OpenWizard {
    sessions: Arc<dyn SessionPort>,
    repository: Arc<dyn ApplicationRepositoryPort>,
    notifier: Arc<dyn NotificationPort>,
}

impl OpenWizard {
    pub fn new(
        sessions: Arc<dyn SessionPort>,
        repository: Arc<dyn ApplicationRepositoryPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        Self {
            sessions,
            repository,
            notifier,
        }
    }

    pub async fn execute(
        &self,
        application_id: Option<ApplicationId>,
        preselection: Preselection,
    ) -> Result<WizardController, WizardError> {
        let session = self
            .sessions
            .current_session()
            .await
            .map_err(WizardError::Persistence)?;
        let Some(session) = session else {
            // Not signed in; the portal redirects to login.
            return Err(WizardError::Forbidden);
        };
        WizardController::open(
            self.repository.clone(),
            self.notifier.clone(),
            session.applicant_id,
            application_id,
            preselection,
        )
        .await
    }
}

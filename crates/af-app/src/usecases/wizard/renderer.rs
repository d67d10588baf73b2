//! Step renderer.

use std::collections::HashMap;
use std::sync::Arc;

use af_core::ports::StepUnitPort;
use af_core::steps::ApplicationStep;
use af_core::wizard::WizardError;

use super::controller::WizardController;

/// Dispatch table from step to its input-collection unit.
///
/// The renderer guarantees two things only: the unit mounted matches the
/// controller's current position, and completion flows through exactly one
/// channel (the unit's payload into `complete_step`). It never validates
/// payload contents; that is the unit's job.
#[derive(Default)]
pub struct StepRenderer {
    units: HashMap<ApplicationStep, Arc<dyn StepUnitPort>>,
}

impl StepRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under the step it reports. A later registration for
    /// the same step replaces the earlier one.
    pub fn register(&mut self, unit: Arc<dyn StepUnitPort>) -> &mut Self {
        self.units.insert(unit.step(), unit);
        self
    }

    /// The unit for a step; `NotFound` when no unit is registered for it.
    pub fn mount(&self, step: ApplicationStep) -> Result<Arc<dyn StepUnitPort>, WizardError> {
        self.units.get(&step).cloned().ok_or(WizardError::NotFound)
    }

    /// Render the unit for the controller's active step.
    ///
    /// A handed-off wizard has nothing left to mount; that is `Forbidden`
    /// (the caller should have navigated to the view-application action).
    pub async fn render_active(
        &self,
        controller: &WizardController,
    ) -> Result<serde_json::Value, WizardError> {
        let position = controller.position().await;
        let Some(step) = position.active_step() else {
            return Err(WizardError::Forbidden);
        };
        let unit = self.mount(step)?;
        unit.render(position.record(), controller.applicant_id())
            .await
            .map_err(WizardError::Persistence)
    }
}

#[cfg(test)]
mod tests {
    use af_core::application::{ApplicationRecord, Preselection};
    use af_core::ids::ApplicantId;

    use super::*;

    struct EchoUnit(ApplicationStep);

    #[async_trait::async_trait]
    impl StepUnitPort for EchoUnit {
        fn step(&self) -> ApplicationStep {
            self.0
        }

        async fn render(
            &self,
            record: Option<&ApplicationRecord>,
            applicant: &ApplicantId,
        ) -> anyhow::Result<serde_json::Value> {
            Ok(serde_json::json!({
                "step": self.0.id(),
                "applicant": applicant.as_str(),
                "has_record": record.is_some(),
            }))
        }
    }

    #[test]
    fn mounts_the_registered_unit() {
        let mut renderer = StepRenderer::new();
        renderer.register(Arc::new(EchoUnit(ApplicationStep::Basics)));
        let unit = renderer.mount(ApplicationStep::Basics).unwrap();
        assert_eq!(unit.step(), ApplicationStep::Basics);
    }

    #[test]
    fn unregistered_steps_are_not_found() {
        let renderer = StepRenderer::new();
        assert!(matches!(
            renderer.mount(ApplicationStep::Review).unwrap_err(),
            WizardError::NotFound
        ));
    }

    #[tokio::test]
    async fn renders_the_first_step_for_a_fresh_wizard() {
        use af_core::ports::{Notification, NotificationPort};

        struct NullNotifier;
        #[async_trait::async_trait]
        impl NotificationPort for NullNotifier {
            async fn notify(&self, _n: &Notification) -> anyhow::Result<()> {
                Ok(())
            }
        }

        struct NoRepo;
        #[async_trait::async_trait]
        impl af_core::ports::ApplicationRepositoryPort for NoRepo {
            async fn create(
                &self,
                _new: &af_core::application::NewApplication,
            ) -> Result<ApplicationRecord, af_core::ports::ApplicationRepositoryError>
            {
                unreachable!("rendering never writes")
            }
            async fn get(
                &self,
                _id: &af_core::ids::ApplicationId,
            ) -> Result<ApplicationRecord, af_core::ports::ApplicationRepositoryError>
            {
                unreachable!("fresh wizard loads nothing")
            }
            async fn apply_transition(
                &self,
                _id: &af_core::ids::ApplicationId,
                _transition: &af_core::wizard::StepTransition,
            ) -> Result<ApplicationRecord, af_core::ports::ApplicationRepositoryError>
            {
                unreachable!("rendering never writes")
            }
            async fn set_current_step(
                &self,
                _id: &af_core::ids::ApplicationId,
                _step: ApplicationStep,
            ) -> Result<ApplicationRecord, af_core::ports::ApplicationRepositoryError>
            {
                unreachable!("rendering never writes")
            }
        }

        let controller = WizardController::open(
            Arc::new(NoRepo),
            Arc::new(NullNotifier),
            ApplicantId::from("applicant-1"),
            None,
            Preselection::default(),
        )
        .await
        .unwrap();

        let mut renderer = StepRenderer::new();
        renderer.register(Arc::new(EchoUnit(ApplicationStep::Basics)));
        let view = renderer.render_active(&controller).await.unwrap();
        assert_eq!(view["step"], "basics");
        assert_eq!(view["has_record"], false);
    }
}

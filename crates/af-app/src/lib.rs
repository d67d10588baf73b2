//! # af-app
//!
//! Application-layer use cases for AdmitFlow: the wizard controller that
//! drives an applicant through the step sequence, the step renderer, the
//! open/resume entry point and the progress summary consumed by dashboard
//! views.

pub mod usecases;

pub use usecases::progress::{ApplicationProgress, ProgressSummary};
pub use usecases::wizard::{OpenWizard, StepRenderer, WizardController, WizardPosition};

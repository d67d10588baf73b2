//! The application wizard.
//!
//! [`WizardController`] orchestrates step navigation against the record
//! store; [`StepRenderer`] mounts the input-collection unit for the active
//! step; [`OpenWizard`] is the entry point the routing layer calls with an
//! optional application id and preselection.

mod context;
mod controller;
mod open;
mod renderer;
mod state;

pub use controller::WizardController;
pub use open::OpenWizard;
pub use renderer::StepRenderer;
pub use state::WizardPosition;

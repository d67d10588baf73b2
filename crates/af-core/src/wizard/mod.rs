//! Wizard navigation rules.
//!
//! Pure gating and transition computation; no side effects. The
//! orchestration (loading, persistence, state commit) lives in the
//! application layer.

mod error;
pub mod gate;
mod transition;

pub use error::WizardError;
pub use transition::StepTransition;

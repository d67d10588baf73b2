//! # af-core
//!
//! Core domain models and business logic for AdmitFlow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod application;
pub mod ids;
pub mod ports;
pub mod progress;
pub mod steps;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use application::{
    ApplicationRecord, ApplicationStatus, BasicsPayload, CourseType, NewApplication, Preselection,
    StepPayload, ValidationError,
};
pub use ids::{ApplicantId, ApplicationId, IntakeId, ProgramId};
pub use steps::{all_steps, ApplicationStep, StepDefinition, StepFlag, UnknownStep};
pub use wizard::{StepTransition, WizardError};

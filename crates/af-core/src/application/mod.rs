//! Application record domain models.

mod payload;
mod record;

pub use payload::{
    BasicsPayload, CourseType, NewApplication, Preselection, StepPayload, ValidationError,
};
pub use record::{ApplicationRecord, ApplicationStatus, UnknownStatus};

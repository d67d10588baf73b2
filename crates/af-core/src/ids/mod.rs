//! ID type wrappers for type safety.
//!
//! Every entity reference crossing a port boundary uses one of these opaque
//! wrappers instead of a bare `String`, so an applicant id can never be
//! handed to an operation expecting an application id.

mod id_macro;

use serde::{Deserialize, Serialize};

/// Identifier of one application record (assigned at creation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(String);

/// Identity of the applicant (the auth session subject).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(String);

/// Identifier of a program offered for admission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(String);

/// Identifier of an enrollment intake window.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IntakeId(String);

id_macro::impl_id!(ApplicationId, ApplicantId, ProgramId, IntakeId);

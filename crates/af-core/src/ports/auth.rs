//! Auth service port.
//!
//! Credential handling, session issuance and verification-code delivery are
//! external; the wizard only needs to know who is acting.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::ApplicantId;

/// An authenticated session subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub applicant_id: ApplicantId,
    /// The identifier the applicant signed in with (email or phone).
    pub identifier: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait SessionPort: Send + Sync {
    async fn authenticate(&self, identifier: &str, password: &str) -> Result<Session, AuthError>;

    /// The session of the acting user, if any.
    async fn current_session(&self) -> anyhow::Result<Option<Session>>;
}

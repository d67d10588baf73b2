//! Wizard error taxonomy.

use thiserror::Error;

use crate::application::ValidationError;
use crate::ports::ApplicationRepositoryError;

/// Errors surfaced by wizard operations.
///
/// `NotFound`/`Forbidden` on load render a blocking error view.
/// `Validation` goes back to the step unit as field feedback, with no state
/// transition. `Persistence` is retryable; displayed state never advances
/// on it.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("application not found")]
    NotFound,
    #[error("navigation not permitted")]
    Forbidden,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("persistence failed: {0}")]
    Persistence(#[source] anyhow::Error),
}

impl From<ApplicationRepositoryError> for WizardError {
    fn from(err: ApplicationRepositoryError) -> Self {
        match err {
            ApplicationRepositoryError::NotFound => WizardError::NotFound,
            ApplicationRepositoryError::Storage(message) => {
                WizardError::Persistence(anyhow::anyhow!(message))
            }
        }
    }
}

//! Error types for form submission

use staffdesk_schema::{ValidationError, ValidationReport};
use staffdesk_store::StoreError;

/// Failure to hand a validated value to its destination
#[derive(Debug, thiserror::Error)]
pub enum CommitError {
    /// Mock store unavailable
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Collaborator refused the value
    #[error("rejected: {0}")]
    Rejected(String),
}

/// Form submission errors
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Candidate failed validation; messages are attached to the form
    #[error(transparent)]
    Invalid(ValidationReport),

    /// Schema lookup or narrowing failed
    #[error("schema error: {0}")]
    Schema(ValidationError),

    /// Destination refused the validated value
    #[error("commit failed: {0}")]
    Commit(#[from] CommitError),
}

impl From<ValidationError> for FormError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Invalid(report) => Self::Invalid(report),
            other => Self::Schema(other),
        }
    }
}

impl FormError {
    /// Field report, when the candidate was invalid
    #[must_use]
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

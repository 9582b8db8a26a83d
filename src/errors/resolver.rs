//! Errors returned by the organization and user resolvers
//!
//! Validation and not-found conditions are ordinary, inspectable variants.
//! Internal failures get their own variant so callers can tell "nothing
//! matched" apart from "the store broke".
//!
//! ```rust
//! use orgdir::errors::{ResolverError, ValidationError};
//!
//! let err = ResolverError::from(ValidationError::single("email", "\"email\" is required"));
//! assert!(err.is_validation_error());
//! assert_eq!(err.error_code(), "VALIDATION_FAILED");
//! ```

use thiserror::Error;

use super::{StoreError, ValidationError};

#[derive(Error, Debug)]
pub enum ResolverError {
    /// The validation port rejected the supplied fields
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// No entity exists for an operation that requires one
    #[error("{entity} not found in the database")]
    NotFound { entity: &'static str, key: String },

    /// Required arguments were empty
    #[error("{0}")]
    MissingFields(String),

    /// Unexpected failure while talking to a collaborator
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolverError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        ResolverError::NotFound {
            entity,
            key: key.into(),
        }
    }

    pub fn missing_fields(message: impl Into<String>) -> Self {
        ResolverError::MissingFields(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ResolverError::Internal(message.into())
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, ResolverError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolverError::NotFound { .. })
    }

    pub fn is_missing_fields(&self) -> bool {
        matches!(self, ResolverError::MissingFields(_))
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ResolverError::Internal(_))
    }

    /// Get error code for GraphQL/API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ResolverError::Validation(_) => "VALIDATION_FAILED",
            ResolverError::NotFound { .. } => "NOT_FOUND",
            ResolverError::MissingFields(_) => "MISSING_FIELDS",
            ResolverError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The violations behind a validation failure, if any.
    pub fn validation_details(&self) -> Option<&ValidationError> {
        match self {
            ResolverError::Validation(details) => Some(details),
            _ => None,
        }
    }
}

impl From<StoreError> for ResolverError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store operation failed: {}", err);
        ResolverError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found() {
        let err = ResolverError::not_found("Organization", "Acme");
        assert_eq!(err.to_string(), "Organization not found in the database");
        assert!(err.is_not_found());
        assert!(!err.is_internal());
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_missing_fields() {
        let err = ResolverError::missing_fields("All fields are required!");
        assert_eq!(err.to_string(), "All fields are required!");
        assert!(err.is_missing_fields());
        assert_eq!(err.error_code(), "MISSING_FIELDS");
    }

    #[test]
    fn test_validation_keeps_details() {
        let err = ResolverError::from(ValidationError::single("ceo", "\"ceo\" is required"));
        assert_eq!(err.to_string(), "\"ceo\" is required");
        assert_eq!(
            err.validation_details().map(|d| d.fields()),
            Some(vec!["ceo"])
        );
    }

    #[test]
    fn test_internal() {
        let err = ResolverError::internal("hash failed");
        assert_eq!(err.to_string(), "Internal error: hash failed");
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.validation_details().is_none());
    }
}

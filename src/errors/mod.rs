//! Error types for the resolver layer
//!
//! # Error Categories
//!
//! - **ValidationError**: the validation port rejected the supplied fields
//! - **ResolverError**: everything a resolver can hand back to its caller
//!   (validation, not found, missing fields, internal failure)
//! - **StoreError**: failures raised by a persistence adapter
//!
//! Store failures are never swallowed: they convert into
//! `ResolverError::Internal` and are logged where the conversion happens.
//!
//! # GraphQL Integration
//!
//! When the `graphql` feature is enabled, `ResolverError` converts to a GraphQL
//! error with a structured `code` extension through the `ToGraphQLError` trait.
//!
//! ```rust
//! use orgdir::errors::ResolverError;
//!
//! let err = ResolverError::not_found("Organization", "Acme");
//! assert!(err.is_not_found());
//! assert_eq!(err.error_code(), "NOT_FOUND");
//! ```

pub mod common;
pub mod resolver;
pub mod store;
pub mod validation;

pub use resolver::ResolverError;
pub use store::StoreError;
pub use validation::{FieldViolation, ValidationError};

#[cfg(feature = "graphql")]
pub use common::{ResultExt, ToGraphQLError};

/// Result type alias for resolver operations
pub type ResolverResult<T> = Result<T, ResolverError>;

/// Result type alias for persistence adapters
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for the validation port
pub type ValidationResult<T> = Result<T, ValidationError>;

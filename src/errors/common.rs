//! GraphQL conversion for resolver errors
//!
//! ```rust
//! use orgdir::errors::{ResolverError, ToGraphQLError};
//!
//! let err = ResolverError::not_found("User", "a@x.com");
//! let graphql_err = err.to_graphql_error();
//! assert_eq!(graphql_err.message, "User not found in the database");
//! ```

#[cfg(feature = "graphql")]
use async_graphql::{Error as GraphQLError, ErrorExtensions};

#[cfg(feature = "graphql")]
use super::*;

/// Convert domain errors to GraphQL errors with error codes
#[cfg(feature = "graphql")]
pub trait ToGraphQLError {
    /// Convert to GraphQL error with structured extensions
    fn to_graphql_error(&self) -> GraphQLError;
}

#[cfg(feature = "graphql")]
impl ToGraphQLError for ResolverError {
    fn to_graphql_error(&self) -> GraphQLError {
        let code = self.error_code();
        let message = self.to_string();

        GraphQLError::new(message).extend_with(|_, e| {
            e.set("code", code);

            match self {
                ResolverError::Validation(details) => {
                    let fields: Vec<String> =
                        details.details.iter().map(|d| d.field.clone()).collect();
                    e.set("fields", fields);
                }
                ResolverError::NotFound { entity, key } => {
                    e.set("resource", *entity);
                    e.set("key", key.as_str());
                }
                _ => {}
            }
        })
    }
}

/// Extension trait for Result<T, E> to convert errors to GraphQL errors
#[cfg(feature = "graphql")]
pub trait ResultExt<T> {
    /// Convert error to GraphQL error
    fn to_graphql_result(self) -> Result<T, GraphQLError>;
}

#[cfg(feature = "graphql")]
impl<T> ResultExt<T> for Result<T, ResolverError> {
    fn to_graphql_result(self) -> Result<T, GraphQLError> {
        self.map_err(|e| e.to_graphql_error())
    }
}

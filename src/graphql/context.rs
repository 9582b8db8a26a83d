use std::sync::Arc;

use crate::services::{OrganizationService, UserService};

#[derive(Clone)]
pub struct GraphQLContext {
    pub organization_service: Arc<OrganizationService>,
    pub user_service: Arc<UserService>,
    /// Resolve `User.password` to null instead of the stored hash.
    pub redact_password_hash: bool,
}

impl GraphQLContext {
    pub fn new(
        organization_service: Arc<OrganizationService>,
        user_service: Arc<UserService>,
    ) -> Self {
        Self {
            organization_service,
            user_service,
            redact_password_hash: false,
        }
    }

    pub fn with_password_redaction(mut self, redact: bool) -> Self {
        self.redact_password_hash = redact;
        self
    }

    /// Convert a stored user into its API shape, honouring the redaction flag.
    pub fn user_shape(&self, user: crate::models::User) -> crate::graphql::types::User {
        let mut shape = crate::graphql::types::User::from(user);
        if self.redact_password_hash {
            shape.password = None;
        }
        shape
    }
}

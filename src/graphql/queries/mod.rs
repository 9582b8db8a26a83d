use async_graphql::*;

use crate::errors::ResultExt;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::{Organization, User};

pub struct Query;

#[Object]
impl Query {
    /// Get an organization by ID
    async fn one_organization(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Organization>> {
        let context = ctx.data::<GraphQLContext>()?;
        let organization = context
            .organization_service
            .one_organization(id.as_str())
            .await
            .to_graphql_result()?;

        Ok(organization.map(Organization::from))
    }

    /// Get all organizations
    async fn all_organizations(&self, ctx: &Context<'_>) -> Result<Vec<Organization>> {
        let context = ctx.data::<GraphQLContext>()?;
        let organizations = context
            .organization_service
            .all_organizations()
            .await
            .to_graphql_result()?;

        Ok(organizations.into_iter().map(Organization::from).collect())
    }

    /// Get a user by ID
    async fn one_user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .user_service
            .one_user(id.as_str())
            .await
            .to_graphql_result()?;

        Ok(user.map(|u| context.user_shape(u)))
    }

    /// Get all users
    async fn all_users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let users = context.user_service.all_users().await.to_graphql_result()?;

        Ok(users.into_iter().map(|u| context.user_shape(u)).collect())
    }
}

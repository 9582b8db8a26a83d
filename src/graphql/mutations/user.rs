use async_graphql::*;

use crate::errors::ResultExt;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::User;
use crate::models::UserInput;

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Register a user. The password is stored as a bcrypt hash.
    async fn add_user(
        &self,
        ctx: &Context<'_>,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
        created_at: Option<String>,
        updated_at: Option<String>,
    ) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = UserInput {
            username,
            email,
            password,
            created_at,
            updated_at,
        };

        let user = context
            .user_service
            .add_user(input)
            .await
            .to_graphql_result()?;
        Ok(context.user_shape(user))
    }

    async fn delete_user(&self, ctx: &Context<'_>, email: String) -> Result<User> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .user_service
            .delete_user(&email)
            .await
            .to_graphql_result()?;
        Ok(context.user_shape(user))
    }

    /// Check credentials. Returns null for an unknown email or a wrong
    /// password; no session is created.
    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<Option<User>> {
        let context = ctx.data::<GraphQLContext>()?;
        let user = context
            .user_service
            .login(&email, &password)
            .await
            .to_graphql_result()?;
        Ok(user.map(|u| context.user_shape(u)))
    }
}

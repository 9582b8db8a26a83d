// Organization and user mutations live in their own modules and are merged
// into a single root here.

mod organization;
mod user;

use async_graphql::*;

#[derive(Default, MergedObject)]
pub struct Mutation(
    pub organization::OrganizationMutation,
    pub user::UserMutation,
);

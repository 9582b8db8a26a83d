use async_graphql::*;

use crate::errors::ResultExt;
use crate::graphql::context::GraphQLContext;
use crate::graphql::types::Organization;
use crate::models::{OrganizationInput, OrganizationUpdate};

#[derive(Default)]
pub struct OrganizationMutation;

#[Object]
impl OrganizationMutation {
    /// Create an organization. `noOfEmployees` is derived from `employees`;
    /// a supplied value is ignored.
    async fn add_organization(
        &self,
        ctx: &Context<'_>,
        organization: Option<String>,
        products: Option<Vec<Option<String>>>,
        market_value: Option<i64>,
        address: Option<String>,
        ceo: Option<String>,
        country: Option<String>,
        employees: Option<Vec<Option<String>>>,
        no_of_employees: Option<i32>,
    ) -> Result<Organization> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = OrganizationInput {
            organization,
            products,
            market_value,
            address,
            ceo,
            country,
            employees,
            no_of_employees,
        };

        let created = context
            .organization_service
            .add_organization(input)
            .await
            .to_graphql_result()?;
        Ok(Organization::from(created))
    }

    /// Update the supplied fields of an organization. Empty strings, zero and
    /// empty lists leave the stored value in place.
    async fn update_organization(
        &self,
        ctx: &Context<'_>,
        id: ID,
        organization: Option<String>,
        products: Option<Vec<String>>,
        market_value: Option<i64>,
        address: Option<String>,
        ceo: Option<String>,
        country: Option<String>,
        employees: Option<Vec<String>>,
        no_of_employees: Option<i32>,
    ) -> Result<Organization> {
        let context = ctx.data::<GraphQLContext>()?;
        let update = OrganizationUpdate {
            organization,
            products,
            market_value,
            address,
            ceo,
            country,
            employees,
            no_of_employees,
        };

        let updated = context
            .organization_service
            .update_organization(id.as_str(), update)
            .await
            .to_graphql_result()?;
        Ok(Organization::from(updated))
    }

    /// Delete an organization by ID
    async fn delete_organization(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Organization>> {
        let context = ctx.data::<GraphQLContext>()?;
        let removed = context
            .organization_service
            .delete_organization(id.as_str())
            .await
            .to_graphql_result()?;
        Ok(removed.map(Organization::from))
    }

    /// Delete the first organization with this name
    async fn delete_organization_by_company(
        &self,
        ctx: &Context<'_>,
        organization: String,
    ) -> Result<Organization> {
        let context = ctx.data::<GraphQLContext>()?;
        let removed = context
            .organization_service
            .delete_organization_by_company(&organization)
            .await
            .to_graphql_result()?;
        Ok(Organization::from(removed))
    }
}

use async_graphql::*;

use crate::models;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Org")]
pub struct Organization {
    pub id: ID,
    pub organization: String,
    pub products: Vec<String>,
    pub market_value: i64,
    pub address: String,
    pub ceo: String,
    pub country: String,
    pub employees: Vec<String>,
    pub no_of_employees: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<models::Organization> for Organization {
    fn from(model: models::Organization) -> Self {
        Self {
            id: ID(model.id),
            organization: model.organization,
            products: model.products,
            market_value: model.market_value,
            address: model.address,
            ceo: model.ceo,
            country: model.country,
            employees: model.employees,
            no_of_employees: model.no_of_employees,
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

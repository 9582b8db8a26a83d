use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored organization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub organization: String,
    pub products: Vec<String>,
    pub market_value: i64,
    pub address: String,
    pub ceo: String,
    pub country: String,
    pub employees: Vec<String>,
    pub no_of_employees: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `addOrganization` arguments, before derivation and validation.
/// List items may be null; validation rejects them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrganizationInput {
    pub organization: Option<String>,
    pub products: Option<Vec<Option<String>>>,
    pub market_value: Option<i64>,
    pub address: Option<String>,
    pub ceo: Option<String>,
    pub country: Option<String>,
    pub employees: Option<Vec<Option<String>>>,
    pub no_of_employees: Option<i32>,
}

/// Raw `updateOrganization` arguments. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrganizationUpdate {
    pub organization: Option<String>,
    pub products: Option<Vec<String>>,
    pub market_value: Option<i64>,
    pub address: Option<String>,
    pub ceo: Option<String>,
    pub country: Option<String>,
    pub employees: Option<Vec<String>>,
    /// Accepted for compatibility, never applied.
    pub no_of_employees: Option<i32>,
}

/// Validated field set ready to be saved as a new organization.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrganization {
    pub organization: String,
    pub products: Vec<String>,
    pub market_value: i64,
    pub address: String,
    pub ceo: String,
    pub country: String,
    pub employees: Vec<String>,
    pub no_of_employees: i32,
}

/// The mutable field set written by `find_by_id_and_update`.
///
/// `no_of_employees` is absent: updates never touch it.
#[derive(Clone, Debug, PartialEq)]
pub struct OrganizationChanges {
    pub organization: String,
    pub market_value: i64,
    pub address: String,
    pub ceo: String,
    pub country: String,
    pub employees: Vec<String>,
    pub products: Vec<String>,
}

impl OrganizationChanges {
    /// Keep every mutable field exactly as stored.
    pub fn from_current(current: &Organization) -> Self {
        Self {
            organization: current.organization.clone(),
            market_value: current.market_value,
            address: current.address.clone(),
            ceo: current.ceo.clone(),
            country: current.country.clone(),
            employees: current.employees.clone(),
            products: current.products.clone(),
        }
    }

    pub fn apply_to(&self, target: &mut Organization) {
        target.organization = self.organization.clone();
        target.market_value = self.market_value;
        target.address = self.address.clone();
        target.ceo = self.ceo.clone();
        target.country = self.country.clone();
        target.employees = self.employees.clone();
        target.products = self.products.clone();
    }
}

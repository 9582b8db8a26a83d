use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{NewOrganization, Organization, OrganizationChanges};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization: String,
    #[sea_orm(column_type = "Text", default_value = "[]")]
    pub products: String, // JSON array stored as string
    pub market_value: i64,
    pub address: String,
    pub ceo: String,
    pub country: String,
    #[sea_orm(column_type = "Text", default_value = "[]")]
    pub employees: String, // JSON array stored as string
    pub no_of_employees: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    pub fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4().to_string()),
            organization: ActiveValue::NotSet,
            products: Set("[]".to_string()),
            market_value: ActiveValue::NotSet,
            address: ActiveValue::NotSet,
            ceo: ActiveValue::NotSet,
            country: ActiveValue::NotSet,
            employees: Set("[]".to_string()),
            no_of_employees: Set(0),
            created_at: Set(chrono::Utc::now()),
            updated_at: Set(chrono::Utc::now()),
        }
    }

    pub fn from_new(organization: NewOrganization) -> Result<Self, StoreError> {
        let mut model = Self::new();
        model.organization = Set(organization.organization);
        model.products = Set(serde_json::to_string(&organization.products)?);
        model.market_value = Set(organization.market_value);
        model.address = Set(organization.address);
        model.ceo = Set(organization.ceo);
        model.country = Set(organization.country);
        model.employees = Set(serde_json::to_string(&organization.employees)?);
        model.no_of_employees = Set(organization.no_of_employees);
        Ok(model)
    }

    pub fn apply_changes(mut self, changes: OrganizationChanges) -> Result<Self, StoreError> {
        self.organization = Set(changes.organization);
        self.market_value = Set(changes.market_value);
        self.address = Set(changes.address);
        self.ceo = Set(changes.ceo);
        self.country = Set(changes.country);
        self.employees = Set(serde_json::to_string(&changes.employees)?);
        self.products = Set(serde_json::to_string(&changes.products)?);
        Ok(self.set_updated_at())
    }

    pub fn set_updated_at(mut self) -> Self {
        self.updated_at = Set(chrono::Utc::now());
        self
    }
}

impl TryFrom<Model> for Organization {
    type Error = StoreError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            products: serde_json::from_str(&model.products)?,
            employees: serde_json::from_str(&model.employees)?,
            id: model.id,
            organization: model.organization,
            market_value: model.market_value,
            address: model.address,
            ceo: model.ceo,
            country: model.country,
            no_of_employees: model.no_of_employees,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

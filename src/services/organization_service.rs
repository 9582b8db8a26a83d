//! Organization queries and mutations.
//!
//! `update_organization` reads the stored document, merges the supplied
//! fields onto it and writes the full mutable set back. The read and the write
//! are separate store calls: two concurrent updates of the same id can lose
//! one of them (last write wins).

use std::sync::Arc;

use crate::errors::{ResolverError, ResolverResult};
use crate::models::{Organization, OrganizationChanges, OrganizationInput, OrganizationUpdate};
use crate::services::validation::{OrganizationSchema, OrganizationValidator};
use crate::store::{OrganizationFilter, OrganizationStore, ReturnDocument};

const ENTITY: &str = "Organization";

/// Values where "empty" means "not supplied" on update.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for i64 {
    fn is_truthy(&self) -> bool {
        *self != 0
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// The incoming value when it is truthy, otherwise the field's own stored value.
pub fn supplied_or<T: Truthy>(incoming: Option<T>, stored: T) -> T {
    match incoming {
        Some(value) if value.is_truthy() => value,
        _ => stored,
    }
}

/// Merge an update onto the stored document, field by field.
pub fn merge_changes(update: OrganizationUpdate, current: &Organization) -> OrganizationChanges {
    let stored = OrganizationChanges::from_current(current);

    OrganizationChanges {
        organization: supplied_or(update.organization, stored.organization),
        market_value: supplied_or(update.market_value, stored.market_value),
        address: supplied_or(update.address, stored.address),
        ceo: supplied_or(update.ceo, stored.ceo),
        country: supplied_or(update.country, stored.country),
        employees: supplied_or(update.employees, stored.employees),
        products: supplied_or(update.products, stored.products),
    }
}

#[derive(Clone)]
pub struct OrganizationService {
    store: Arc<dyn OrganizationStore>,
    validator: Arc<OrganizationValidator>,
}

impl OrganizationService {
    pub fn new(store: Arc<dyn OrganizationStore>, validator: Arc<OrganizationValidator>) -> Self {
        Self { store, validator }
    }

    pub fn with_default_rules(store: Arc<dyn OrganizationStore>) -> Self {
        Self::new(store, Arc::new(OrganizationSchema))
    }

    /// `None` when no organization has this id.
    pub async fn one_organization(&self, id: &str) -> ResolverResult<Option<Organization>> {
        tracing::debug!("Looking up organization {}", id);
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn all_organizations(&self) -> ResolverResult<Vec<Organization>> {
        Ok(self.store.find(&OrganizationFilter::all()).await?)
    }

    /// Derive `no_of_employees`, validate, then save.
    pub async fn add_organization(
        &self,
        mut input: OrganizationInput,
    ) -> ResolverResult<Organization> {
        if let Some(supplied) = input.no_of_employees {
            tracing::debug!("Ignoring supplied noOfEmployees={}", supplied);
        }
        input.no_of_employees = Some(employee_count(input.employees.as_deref()));

        let value = self.validator.validate(input).map_err(|details| {
            tracing::warn!("addOrganization rejected: {}", details);
            ResolverError::from(details)
        })?;

        let saved = self.store.save(value).await?;
        tracing::info!("Created organization {} ({})", saved.organization, saved.id);
        Ok(saved)
    }

    pub async fn update_organization(
        &self,
        id: &str,
        update: OrganizationUpdate,
    ) -> ResolverResult<Organization> {
        let Some(current) = self.store.find_by_id(id).await? else {
            tracing::warn!("updateOrganization: no organization with id {}", id);
            return Err(ResolverError::not_found(ENTITY, id));
        };

        let changes = merge_changes(update, &current);
        self.store
            .find_by_id_and_update(id, changes, ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                // Removed between the read and the write
                tracing::warn!("updateOrganization: organization {} vanished", id);
                ResolverError::not_found(ENTITY, id)
            })
    }

    /// Remove by id and return whatever the store removed.
    pub async fn delete_organization(&self, id: &str) -> ResolverResult<Option<Organization>> {
        let removed = self.store.find_by_id_and_remove(id).await?;
        match &removed {
            Some(organization) => tracing::info!("Deleted organization {}", organization.id),
            None => tracing::debug!("deleteOrganization: nothing stored under {}", id),
        }
        Ok(removed)
    }

    pub async fn delete_organization_by_company(
        &self,
        organization: &str,
    ) -> ResolverResult<Organization> {
        let filter = OrganizationFilter::by_name(organization);

        if self.store.find_one(&filter).await?.is_none() {
            tracing::warn!("deleteOrganizationByCompany: {} not found", organization);
            return Err(ResolverError::not_found(ENTITY, organization));
        }

        let removed = self
            .store
            .find_one_and_delete(&filter)
            .await?
            .ok_or_else(|| ResolverError::not_found(ENTITY, organization))?;
        tracing::info!("Deleted organization {} ({})", removed.organization, removed.id);
        Ok(removed)
    }
}

fn employee_count(employees: Option<&[Option<String>]>) -> i32 {
    employees
        .map(|e| i32::try_from(e.len()).unwrap_or(i32::MAX))
        .unwrap_or(0)
}

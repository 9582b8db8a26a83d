//! In-process store used by tests and local experiments.
//!
//! Documents are kept in insertion order. A read delay can be injected to
//! widen the gap between a resolver's read and its write, which makes the
//! lost-update race of `update_organization` reproducible.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{OrganizationFilter, OrganizationStore, ReturnDocument, UserFilter, UserStore};
use crate::errors::StoreResult;
use crate::models::{NewOrganization, NewUser, Organization, OrganizationChanges, User};

#[derive(Default)]
pub struct MemoryStore {
    organizations: RwLock<IndexMap<String, Organization>>,
    users: RwLock<IndexMap<String, User>>,
    read_delay: Option<Duration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep after every `find_by_id` snapshot is taken.
    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = Some(delay);
        self
    }

    pub async fn organization_count(&self) -> usize {
        self.organizations.read().await.len()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }

    async fn pause(&self) {
        if let Some(delay) = self.read_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Organization>> {
        let found = self.organizations.read().await.get(id).cloned();
        self.pause().await;
        Ok(found)
    }

    async fn find(&self, filter: &OrganizationFilter) -> StoreResult<Vec<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(organizations
            .values()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &OrganizationFilter) -> StoreResult<Option<Organization>> {
        let organizations = self.organizations.read().await;
        Ok(organizations.values().find(|o| filter.matches(o)).cloned())
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        changes: OrganizationChanges,
        returning: ReturnDocument,
    ) -> StoreResult<Option<Organization>> {
        let mut organizations = self.organizations.write().await;
        let Some(stored) = organizations.get_mut(id) else {
            return Ok(None);
        };

        let before = stored.clone();
        changes.apply_to(stored);
        stored.updated_at = Utc::now();

        Ok(Some(match returning {
            ReturnDocument::Before => before,
            ReturnDocument::After => stored.clone(),
        }))
    }

    async fn find_by_id_and_remove(&self, id: &str) -> StoreResult<Option<Organization>> {
        Ok(self.organizations.write().await.shift_remove(id))
    }

    async fn find_one_and_delete(
        &self,
        filter: &OrganizationFilter,
    ) -> StoreResult<Option<Organization>> {
        let mut organizations = self.organizations.write().await;
        let key = organizations
            .iter()
            .find(|(_, o)| filter.matches(o))
            .map(|(k, _)| k.clone());

        Ok(key.and_then(|k| organizations.shift_remove(&k)))
    }

    async fn save(&self, organization: NewOrganization) -> StoreResult<Organization> {
        let now = Utc::now();
        let saved = Organization {
            id: Uuid::new_v4().to_string(),
            organization: organization.organization,
            products: organization.products,
            market_value: organization.market_value,
            address: organization.address,
            ceo: organization.ceo,
            country: organization.country,
            employees: organization.employees,
            no_of_employees: organization.no_of_employees,
            created_at: now,
            updated_at: now,
        };

        self.organizations
            .write()
            .await
            .insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let found = self.users.read().await.get(id).cloned();
        self.pause().await;
        Ok(found)
    }

    async fn find(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn find_one(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| filter.matches(u)).cloned())
    }

    async fn find_one_and_delete(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        let key = users
            .iter()
            .find(|(_, u)| filter.matches(u))
            .map(|(k, _)| k.clone());

        Ok(key.and_then(|k| users.shift_remove(&k)))
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let saved = User {
            id: Uuid::new_v4().to_string(),
            username: user.username,
            email: user.email,
            password: user.password,
            created_at: user.created_at.unwrap_or(now),
            updated_at: user.updated_at.unwrap_or(now),
        };

        self.users
            .write()
            .await
            .insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }
}

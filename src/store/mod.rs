//! Persistence port
//!
//! Resolvers only ever talk to the store through `OrganizationStore` and
//! `UserStore`. Every call is one independent round-trip; nothing here ties
//! two calls together, so a read followed by a write is not atomic.

pub mod memory;
#[cfg(feature = "server")]
pub mod sea_orm_store;

pub use memory::MemoryStore;
#[cfg(feature = "server")]
pub use sea_orm_store::SeaOrmStore;

use async_trait::async_trait;

use crate::errors::StoreResult;
use crate::models::{NewOrganization, NewUser, Organization, OrganizationChanges, User};

/// Which version of the document `find_by_id_and_update` hands back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnDocument {
    Before,
    #[default]
    After,
}

/// Organization query. An empty filter matches every document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizationFilter {
    pub organization: Option<String>,
}

impl OrganizationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_name(organization: impl Into<String>) -> Self {
        Self {
            organization: Some(organization.into()),
        }
    }

    pub fn matches(&self, candidate: &Organization) -> bool {
        self.organization
            .as_ref()
            .map_or(true, |name| &candidate.organization == name)
    }
}

/// User query. An empty filter matches every document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub email: Option<String>,
}

impl UserFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn matches(&self, candidate: &User) -> bool {
        self.email
            .as_ref()
            .map_or(true, |email| &candidate.email == email)
    }
}

#[async_trait]
pub trait OrganizationStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Organization>>;

    async fn find(&self, filter: &OrganizationFilter) -> StoreResult<Vec<Organization>>;

    async fn find_one(&self, filter: &OrganizationFilter) -> StoreResult<Option<Organization>>;

    /// Overwrite the mutable fields of one document. `None` when the id is
    /// unknown at write time.
    async fn find_by_id_and_update(
        &self,
        id: &str,
        changes: OrganizationChanges,
        returning: ReturnDocument,
    ) -> StoreResult<Option<Organization>>;

    async fn find_by_id_and_remove(&self, id: &str) -> StoreResult<Option<Organization>>;

    async fn find_one_and_delete(
        &self,
        filter: &OrganizationFilter,
    ) -> StoreResult<Option<Organization>>;

    async fn save(&self, organization: NewOrganization) -> StoreResult<Organization>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>>;

    async fn find(&self, filter: &UserFilter) -> StoreResult<Vec<User>>;

    async fn find_one(&self, filter: &UserFilter) -> StoreResult<Option<User>>;

    async fn find_one_and_delete(&self, filter: &UserFilter) -> StoreResult<Option<User>>;

    async fn save(&self, user: NewUser) -> StoreResult<User>;
}

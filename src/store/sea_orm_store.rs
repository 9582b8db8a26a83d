use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Select,
    TransactionTrait,
};

use super::{OrganizationFilter, OrganizationStore, ReturnDocument, UserFilter, UserStore};
use crate::database::entities::{organizations, users};
use crate::errors::StoreResult;
use crate::models::{NewOrganization, NewUser, Organization, OrganizationChanges, User};

/// SQLite-backed store. Single-document writes that need a read first run
/// inside one transaction; nothing spans two port calls.
#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn organization_query(filter: &OrganizationFilter) -> Select<organizations::Entity> {
    let mut query = organizations::Entity::find();
    if let Some(name) = &filter.organization {
        query = query.filter(organizations::Column::Organization.eq(name.as_str()));
    }
    query
}

fn user_query(filter: &UserFilter) -> Select<users::Entity> {
    let mut query = users::Entity::find();
    if let Some(email) = &filter.email {
        query = query.filter(users::Column::Email.eq(email.as_str()));
    }
    query
}

fn to_organization(model: Option<organizations::Model>) -> StoreResult<Option<Organization>> {
    model.map(Organization::try_from).transpose()
}

#[async_trait]
impl OrganizationStore for SeaOrmStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Organization>> {
        let model = organizations::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        to_organization(model)
    }

    async fn find(&self, filter: &OrganizationFilter) -> StoreResult<Vec<Organization>> {
        organization_query(filter)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Organization::try_from)
            .collect()
    }

    async fn find_one(&self, filter: &OrganizationFilter) -> StoreResult<Option<Organization>> {
        let model = organization_query(filter).one(&self.db).await?;
        to_organization(model)
    }

    async fn find_by_id_and_update(
        &self,
        id: &str,
        changes: OrganizationChanges,
        returning: ReturnDocument,
    ) -> StoreResult<Option<Organization>> {
        let txn = self.db.begin().await?;

        let Some(current) = organizations::Entity::find_by_id(id.to_string())
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let active: organizations::ActiveModel = current.clone().into();
        let updated = active.apply_changes(changes)?.update(&txn).await?;
        txn.commit().await?;

        let returned = match returning {
            ReturnDocument::Before => current,
            ReturnDocument::After => updated,
        };
        Organization::try_from(returned).map(Some)
    }

    async fn find_by_id_and_remove(&self, id: &str) -> StoreResult<Option<Organization>> {
        let txn = self.db.begin().await?;

        let model = organizations::Entity::find_by_id(id.to_string())
            .one(&txn)
            .await?;
        if model.is_some() {
            organizations::Entity::delete_by_id(id.to_string())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        to_organization(model)
    }

    async fn find_one_and_delete(
        &self,
        filter: &OrganizationFilter,
    ) -> StoreResult<Option<Organization>> {
        let txn = self.db.begin().await?;

        let model = organization_query(filter).one(&txn).await?;
        if let Some(found) = &model {
            organizations::Entity::delete_by_id(found.id.clone())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        to_organization(model)
    }

    async fn save(&self, organization: NewOrganization) -> StoreResult<Organization> {
        let model = organizations::ActiveModel::from_new(organization)?
            .insert(&self.db)
            .await?;
        Organization::try_from(model)
    }
}

#[async_trait]
impl UserStore for SeaOrmStore {
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let model = users::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(User::from))
    }

    async fn find(&self, filter: &UserFilter) -> StoreResult<Vec<User>> {
        let models = user_query(filter).all(&self.db).await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_one(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let model = user_query(filter).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn find_one_and_delete(&self, filter: &UserFilter) -> StoreResult<Option<User>> {
        let txn = self.db.begin().await?;

        let model = user_query(filter).one(&txn).await?;
        if let Some(found) = &model {
            users::Entity::delete_by_id(found.id.clone())
                .exec(&txn)
                .await?;
        }
        txn.commit().await?;

        Ok(model.map(User::from))
    }

    async fn save(&self, user: NewUser) -> StoreResult<User> {
        let model = users::ActiveModel::from(user).insert(&self.db).await?;
        Ok(User::from(model))
    }
}

use async_graphql::*;

use crate::models;

#[derive(SimpleObject, Clone, Debug)]
pub struct User {
    pub id: ID,
    pub username: String,
    pub email: String,
    /// bcrypt hash, null when hash redaction is switched on
    pub password: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<models::User> for User {
    fn from(model: models::User) -> Self {
        Self {
            id: ID(model.id),
            username: model.username,
            email: model.email,
            password: Some(model.password),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

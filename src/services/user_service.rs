use std::sync::Arc;

use crate::errors::{ResolverError, ResolverResult, ValidationError};
use crate::models::{User, UserInput};
use crate::services::auth_service::{BcryptHasher, PasswordHasher};
use crate::services::validation::{UserSchema, UserValidator};
use crate::store::{UserFilter, UserStore};

const ENTITY: &str = "User";

/// User queries, mutations and the password check behind `login`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    validator: Arc<UserValidator>,
    hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        validator: Arc<UserValidator>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            store,
            validator,
            hasher,
        }
    }

    pub fn with_default_rules(store: Arc<dyn UserStore>, hasher: BcryptHasher) -> Self {
        Self::new(store, Arc::new(UserSchema), Arc::new(hasher))
    }

    pub async fn one_user(&self, id: &str) -> ResolverResult<Option<User>> {
        tracing::debug!("Looking up user {}", id);
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn all_users(&self) -> ResolverResult<Vec<User>> {
        Ok(self.store.find(&UserFilter::all()).await?)
    }

    /// Validate, replace the plaintext password with its hash, then save.
    /// Emails are unique across users.
    pub async fn add_user(&self, input: UserInput) -> ResolverResult<User> {
        let mut value = self.validator.validate(input).map_err(|details| {
            tracing::warn!("addUser rejected: {}", details);
            ResolverError::from(details)
        })?;

        if self
            .store
            .find_one(&UserFilter::by_email(value.email.as_str()))
            .await?
            .is_some()
        {
            tracing::warn!("addUser rejected: {} already registered", value.email);
            return Err(ValidationError::single("email", "\"email\" already exists").into());
        }

        let password = std::mem::take(&mut value.password);
        value.password = self
            .with_hasher(move |hasher| hasher.hash_password(&password))
            .await?;

        let saved = self.store.save(value).await?;
        tracing::info!("Created user {} ({})", saved.email, saved.id);
        Ok(saved)
    }

    pub async fn delete_user(&self, email: &str) -> ResolverResult<User> {
        let filter = UserFilter::by_email(email);

        if self.store.find_one(&filter).await?.is_none() {
            tracing::warn!("deleteUser: {} not found", email);
            return Err(ResolverError::not_found(ENTITY, email));
        }

        let removed = self
            .store
            .find_one_and_delete(&filter)
            .await?
            .ok_or_else(|| ResolverError::not_found(ENTITY, email))?;
        tracing::info!("Deleted user {}", removed.id);
        Ok(removed)
    }

    /// The matching user, or `None` for an unknown email or a wrong password.
    /// No session or token is issued.
    pub async fn login(&self, email: &str, password: &str) -> ResolverResult<Option<User>> {
        if email.is_empty() || password.is_empty() {
            return Err(ResolverError::missing_fields("All fields are required!"));
        }

        let Some(user) = self.store.find_one(&UserFilter::by_email(email)).await? else {
            tracing::debug!("login: no user for {}", email);
            return Ok(None);
        };

        let candidate = password.to_string();
        let hash = user.password.clone();
        let matches = self
            .with_hasher(move |hasher| hasher.verify_password(&candidate, &hash))
            .await?;

        if matches {
            tracing::debug!("login: {} authenticated", user.id);
            Ok(Some(user))
        } else {
            tracing::debug!("login: password mismatch for {}", email);
            Ok(None)
        }
    }

    /// bcrypt is CPU bound, keep it off the async workers.
    async fn with_hasher<T, F>(&self, op: F) -> ResolverResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn PasswordHasher) -> anyhow::Result<T> + Send + 'static,
    {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || op(hasher.as_ref()))
            .await
            .map_err(|e| {
                tracing::error!("Password hashing task failed: {}", e);
                ResolverError::internal(format!("Password hashing task failed: {}", e))
            })?
            .map_err(|e| {
                tracing::error!("{}", e);
                ResolverError::internal(e.to_string())
            })
    }
}

use anyhow::{anyhow, Result};
use bcrypt::{hash, verify, DEFAULT_COST};

/// One-way salted password hashing.
pub trait PasswordHasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool>;
}

/// bcrypt-backed hasher.
#[derive(Clone, Copy, Debug)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> Result<String> {
        hash(password, self.cost).map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool> {
        verify(password, hash).map_err(|e| anyhow!("Failed to verify password: {}", e))
    }
}

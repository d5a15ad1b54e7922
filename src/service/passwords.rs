//! Password hashing helpers built around Argon2id.
//! Memory and parallelism are fixed; the iteration count is the tunable work factor.

use crate::error::SylvaError;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;

const MEMORY_COST_KIB: u32 = 19 * 1024;
const PARALLELISM: u32 = 1;

#[derive(Debug, Clone, Copy)]
pub struct PasswordPolicy {
    time_cost: u32,
}

impl PasswordPolicy {
    pub fn new(time_cost: u32) -> Self {
        Self {
            time_cost: time_cost.max(1),
        }
    }

    fn argon2(&self) -> Result<Argon2<'static>, SylvaError> {
        let params = Params::new(MEMORY_COST_KIB, self.time_cost, PARALLELISM, None)?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    /// Hash a secret and return the PHC string (salt and parameters included).
    pub fn hash(&self, plaintext: &str) -> Result<String, SylvaError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()?
            .hash_password(plaintext.as_bytes(), &salt)?
            .to_string();
        Ok(hash)
    }

    /// Same as [`Self::hash`] but off the async executor.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, SylvaError> {
        let policy = *self;
        tokio::task::spawn_blocking(move || policy.hash(&plaintext)).await?
    }
}

/// Verify a secret against a stored PHC string. The parameters embedded in the
/// hash are used, so hashes made under an older policy keep verifying.
/// A malformed stored hash never matches.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

pub async fn verify_password_blocking(
    plaintext: String,
    stored_hash: String,
) -> Result<bool, SylvaError> {
    let matched =
        tokio::task::spawn_blocking(move || verify_password(&plaintext, &stored_hash)).await?;
    Ok(matched)
}

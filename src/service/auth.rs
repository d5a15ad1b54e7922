use crate::db::SylvaStorage;
use crate::error::SylvaError;
use crate::service::passwords::verify_password_blocking;
use crate::service::tokens::TokenSigner;
use tracing::{info, warn};

/// Checks identifier/secret pairs against the account table and issues tokens.
#[derive(Clone)]
pub struct AuthService {
    storage: SylvaStorage,
    tokens: TokenSigner,
}

impl AuthService {
    pub fn new(storage: SylvaStorage, tokens: TokenSigner) -> Self {
        Self { storage, tokens }
    }

    pub fn tokens(&self) -> &TokenSigner {
        &self.tokens
    }

    /// Returns a signed token on success. Unknown user and wrong secret both
    /// yield [`SylvaError::InvalidCredentials`]; database faults stay [`SylvaError::Storage`].
    pub async fn login(&self, username: &str, password: &str) -> Result<String, SylvaError> {
        let Some(account) = self.storage.find_account(username).await? else {
            warn!(username, "login rejected: unknown account");
            return Err(SylvaError::InvalidCredentials);
        };

        if !verify_password_blocking(password.to_string(), account.password_hash).await? {
            warn!(username, "login rejected: password mismatch");
            return Err(SylvaError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.username)?;
        info!(username, "login succeeded");
        Ok(token)
    }
}

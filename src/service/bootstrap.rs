use crate::db::SylvaStorage;
use crate::error::SylvaError;
use crate::service::passwords::PasswordPolicy;
use tracing::info;

/// The account seeded on first start.
#[derive(Clone)]
pub struct OwnerAccount {
    pub username: String,
    pub password: String,
}

/// Create the tables and seed the built-in account if it is missing.
/// Safe to run repeatedly: an existing account keeps its hash.
pub async fn initialize(
    storage: &SylvaStorage,
    owner: &OwnerAccount,
    policy: PasswordPolicy,
) -> Result<(), SylvaError> {
    storage.init_schema().await?;

    if storage.find_account(&owner.username).await?.is_some() {
        info!(username = %owner.username, "built-in account present");
        return Ok(());
    }

    let hash = policy.hash_blocking(owner.password.clone()).await?;
    if storage
        .insert_account_if_absent(&owner.username, &hash)
        .await?
    {
        info!(username = %owner.username, "built-in account created");
    }
    Ok(())
}

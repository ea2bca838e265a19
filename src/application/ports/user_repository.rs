use async_trait::async_trait;

use crate::domain::users::account::{Account, NewAccount};

#[derive(thiserror::Error, Debug)]
pub enum UserRepositoryError {
    #[error("an account with this email already exists")]
    DuplicateEmail,
    #[error("account storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Account store. Implementations must enforce email uniqueness atomically:
/// of any number of concurrent `create_user` calls sharing an email, exactly
/// one succeeds and the rest return [`UserRepositoryError::DuplicateEmail`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, account: &NewAccount) -> Result<Account, UserRepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserRepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, UserRepositoryError>;
    async fn list_users(&self) -> Result<Vec<Account>, UserRepositoryError>;
}

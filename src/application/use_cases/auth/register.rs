use tracing::warn;

use crate::application::ports::password_hasher::{HashingError, PasswordHasher};
use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::account::{AccountProfile, NewAccount, Role};

#[derive(thiserror::Error, Debug)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(&'static str),
    #[error(transparent)]
    Hashing(#[from] HashingError),
    #[error("an account with this email already exists")]
    DuplicateAccount,
    #[error("could not create account: {0}")]
    Storage(#[source] anyhow::Error),
}

pub struct Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub requested_role: String,
}

impl<'a, R, H> Register<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(&self, req: &RegisterRequest) -> Result<AccountProfile, RegisterError> {
        if req.name.is_empty() || req.email.is_empty() || req.password.is_empty() {
            return Err(RegisterError::Validation("All fields are required"));
        }

        let password_hash = self.hasher.hash(&req.password)?;

        // Self-registration never grants anything above `user`.
        if matches!(req.requested_role.parse::<Role>(), Ok(Role::Admin)) {
            warn!(email = %req.email, "signup_requested_admin_role_ignored");
        }
        let account = NewAccount {
            name: req.name.clone(),
            email: req.email.clone(),
            password_hash,
            role: Role::User,
        };

        match self.repo.create_user(&account).await {
            Ok(created) => Ok(created.into()),
            Err(UserRepositoryError::DuplicateEmail) => Err(RegisterError::DuplicateAccount),
            Err(UserRepositoryError::Storage(e)) => Err(RegisterError::Storage(e)),
        }
    }
}

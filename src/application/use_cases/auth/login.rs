use tracing::{debug, error};

use crate::application::ports::password_hasher::{MalformedHashError, PasswordHasher};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::account::AccountProfile;

/// Login failures. `AccountNotFound` and `InvalidCredentials` are kept apart
/// for logging; the HTTP layer reports both the same way.
#[derive(thiserror::Error, Debug)]
pub enum LoginError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("account not found")]
    AccountNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    CorruptCredential(#[from] MalformedHashError),
    #[error("account lookup failed: {0}")]
    Storage(#[source] anyhow::Error),
}

pub struct Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub repo: &'a R,
    pub hasher: &'a H,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R, H> Login<'a, R, H>
where
    R: UserRepository + ?Sized,
    H: PasswordHasher + ?Sized,
{
    pub async fn execute(&self, req: &LoginRequest) -> Result<AccountProfile, LoginError> {
        if req.email.is_empty() || req.password.is_empty() {
            return Err(LoginError::Validation("All fields are required"));
        }

        let account = match self.repo.find_by_email(&req.email).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                self.hasher.verify_dummy(&req.password);
                debug!(email = %req.email, "login_unknown_email");
                return Err(LoginError::AccountNotFound);
            }
            Err(e) => return Err(LoginError::Storage(e.into())),
        };

        let matches = self
            .hasher
            .verify(&req.password, &account.password_hash)
            .inspect_err(|e| {
                error!(user_id = account.id, error = %e, "stored_hash_unreadable");
            })?;
        if !matches {
            debug!(user_id = account.id, "login_password_mismatch");
            return Err(LoginError::InvalidCredentials);
        }

        Ok(account.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::domain::users::account::{NewAccount, Role};
    use crate::infrastructure::memory::user_repository::InMemoryUserRepository;
    use crate::test_support::PlainHasher;

    async fn seeded() -> (InMemoryUserRepository, i64) {
        let repo = InMemoryUserRepository::new();
        let created = Register {
            repo: &repo,
            hasher: &PlainHasher,
        }
        .execute(&RegisterRequest {
            name: "Ann".into(),
            email: "ann@x.com".into(),
            password: "secret123".into(),
            requested_role: "admin".into(),
        })
        .await
        .unwrap();
        (repo, created.id)
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn signup_then_login_returns_same_account() {
        let (repo, id) = seeded().await;
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        let profile = uc.execute(&login("ann@x.com", "secret123")).await.unwrap();
        assert_eq!(profile.id, id);
        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.role, Role::User);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (repo, _) = seeded().await;
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        let err = uc.execute(&login("ann@x.com", "wrong")).await.unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let (repo, _) = seeded().await;
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        let err = uc
            .execute(&login("bob@x.com", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::AccountNotFound));
    }

    #[tokio::test]
    async fn email_match_is_exact() {
        let (repo, _) = seeded().await;
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        let err = uc
            .execute(&login("ANN@x.com", "secret123"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::AccountNotFound));
    }

    #[tokio::test]
    async fn rejects_empty_fields() {
        let (repo, _) = seeded().await;
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        for req in [login("", "secret123"), login("ann@x.com", "")] {
            let err = uc.execute(&req).await.unwrap_err();
            assert!(matches!(err, LoginError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn malformed_stored_hash_is_corrupt_credential() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&NewAccount {
            name: "Legacy".into(),
            email: "legacy@x.com".into(),
            password_hash: "md5:abcdef".into(),
            role: Role::User,
        })
        .await
        .unwrap();
        let uc = Login {
            repo: &repo,
            hasher: &PlainHasher,
        };

        let err = uc
            .execute(&login("legacy@x.com", "whatever"))
            .await
            .unwrap_err();
        assert!(matches!(err, LoginError::CorruptCredential(_)));
    }
}

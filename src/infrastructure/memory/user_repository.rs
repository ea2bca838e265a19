use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::account::{Account, NewAccount};

#[derive(Default)]
struct State {
    next_id: i64,
    accounts: Vec<Account>,
}

/// In-memory account store. The uniqueness check and the insert happen under
/// one lock, so concurrent signups for the same email cannot both succeed.
#[derive(Default)]
pub struct InMemoryUserRepository {
    state: Mutex<State>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_user(&self, account: &NewAccount) -> Result<Account, UserRepositoryError> {
        let mut state = self.state.lock().await;
        if state.accounts.iter().any(|a| a.email == account.email) {
            return Err(UserRepositoryError::DuplicateEmail);
        }
        state.next_id += 1;
        let created = Account {
            id: state.next_id,
            name: account.name.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            created_at: chrono::Utc::now(),
        };
        state.accounts.push(created.clone());
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, UserRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn list_users(&self) -> Result<Vec<Account>, UserRepositoryError> {
        Ok(self.state.lock().await.accounts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::users::account::Role;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Ann".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn assigns_increasing_ids() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create_user(&new_account("a@x.com")).await.unwrap();
        let b = repo.create_user(&new_account("b@x.com")).await.unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(repo.find_by_id(2).await.unwrap().unwrap().email, "b@x.com");
        assert!(repo.find_by_id(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_does_not_overwrite() {
        let repo = InMemoryUserRepository::new();
        repo.create_user(&new_account("a@x.com")).await.unwrap();
        let mut other = new_account("a@x.com");
        other.name = "Impostor".into();
        let err = repo.create_user(&other).await.unwrap_err();
        assert!(matches!(err, UserRepositoryError::DuplicateEmail));

        let stored = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "Ann");
        assert_eq!(repo.list_users().await.unwrap().len(), 1);
    }
}

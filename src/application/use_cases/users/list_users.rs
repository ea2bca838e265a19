use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::account::AccountProfile;

pub struct ListUsers<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ListUsers<'a, R> {
    pub async fn execute(&self) -> Result<Vec<AccountProfile>, UserRepositoryError> {
        let rows = self.repo.list_users().await?;
        Ok(rows.into_iter().map(AccountProfile::from).collect())
    }
}

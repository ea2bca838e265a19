use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::account::AccountProfile;

pub struct GetUser<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> GetUser<'a, R> {
    pub async fn execute(&self, id: i64) -> Result<Option<AccountProfile>, UserRepositoryError> {
        Ok(self.repo.find_by_id(id).await?.map(AccountProfile::from))
    }
}

use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::application::ports::user_repository::{UserRepository, UserRepositoryError};
use crate::domain::users::account::{Account, NewAccount, Role};
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage(e: impl Into<anyhow::Error>) -> UserRepositoryError {
    UserRepositoryError::Storage(e.into())
}

fn map_account(row: PgRow) -> Result<Account, UserRepositoryError> {
    let role: String = row.try_get("role").map_err(storage)?;
    Ok(Account {
        id: row.try_get("id").map_err(storage)?,
        name: row.try_get("name").map_err(storage)?,
        email: row.try_get("email").map_err(storage)?,
        password_hash: row.try_get("password_hash").map_err(storage)?,
        role: role.parse::<Role>().map_err(storage)?,
        created_at: row.try_get("created_at").map_err(storage)?,
    })
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(&self, account: &NewAccount) -> Result<Account, UserRepositoryError> {
        // Relies on the UNIQUE constraint on email; no prior existence check.
        let res = sqlx::query(
            r#"INSERT INTO users (name, email, password_hash, role) VALUES ($1, $2, $3, $4)
               RETURNING id, name, email, password_hash, role, created_at"#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(row) => map_account(row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(UserRepositoryError::DuplicateEmail)
            }
            Err(e) => Err(storage(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, UserRepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, name, email, password_hash, role, created_at FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        row.map(map_account).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, UserRepositoryError> {
        let row = sqlx::query(
            r#"SELECT id, name, email, password_hash, role, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage)?;
        row.map(map_account).transpose()
    }

    async fn list_users(&self) -> Result<Vec<Account>, UserRepositoryError> {
        let rows = sqlx::query(
            r#"SELECT id, name, email, password_hash, role, created_at FROM users ORDER BY id"#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage)?;
        rows.into_iter().map(map_account).collect()
    }
}

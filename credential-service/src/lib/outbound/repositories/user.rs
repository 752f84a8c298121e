use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRegistry;
use crate::user::errors::CredentialError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRegistry {
    pool: PgPool,
}

impl PostgresUserRegistry {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRegistry for PostgresUserRegistry {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, CredentialError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let id: i64 = r
                    .try_get("id")
                    .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
                let password_hash: String = r
                    .try_get("password_hash")
                    .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

                Ok(Some(User {
                    id: UserId(id),
                    email: email.clone(),
                    password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, user: NewUser) -> Result<UserId, CredentialError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::EmailAlreadyExists(user.email.to_string());
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;
        if id <= 0 {
            return Err(CredentialError::DatabaseError(format!(
                "Insert returned invalid id {}",
                id
            )));
        }

        Ok(UserId(id))
    }
}

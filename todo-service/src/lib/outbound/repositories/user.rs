use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::page::Page;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USERNAME_UNIQUE: &str = "users_username_key";
const EMAIL_UNIQUE: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId(row.id),
            username: Username::new(row.username)?,
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Name of the unique constraint `err` violated, if that is what it is.
fn violated_unique_constraint(err: &sqlx::Error) -> Option<&str> {
    err.as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
}

fn database_error(err: sqlx::Error) -> UserError {
    UserError::DatabaseError(err.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let constraint = violated_unique_constraint(&e).map(str::to_owned);
            match constraint.as_deref() {
                Some(USERNAME_UNIQUE) => UserError::UsernameAlreadyExists(user.username.to_string()),
                Some(EMAIL_UNIQUE) => UserError::EmailAlreadyExists(user.email.to_string()),
                _ => database_error(e),
            }
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(User::try_from)
        .transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            ORDER BY id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(page.offset())
        .bind(page.limit())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $2, email = $3, password_hash = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violated_unique_constraint(&e).is_some() {
                UserError::AccountConflict
            } else {
                database_error(e)
            }
        })?;

        row.ok_or(UserError::NotFound(user.id))?.try_into()
    }

    async fn delete(&self, id: UserId) -> Result<(), UserError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id));
        }

        Ok(())
    }
}

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::RepositoryError;

const USER_COLUMNS: &str = "id, email, password_hash, role, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = EmailAddress::new(row.email)
            .map_err(|e| RepositoryError::Database(format!("corrupt email for {}: {}", row.id, e)))?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| RepositoryError::Database(format!("corrupt role for {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId(row.id),
            email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Map a failed write, turning unique violations into `DuplicateKey`.
fn write_error(e: sqlx::Error, key: &str) -> RepositoryError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::DuplicateKey(key.to_string());
        }
    }
    RepositoryError::Database(e.to_string())
}

fn read_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.0)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, user.email.as_str()))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        match row {
            Some(r) => User::try_from(r),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        match row {
            Some(r) => User::try_from(r),
            None => Err(RepositoryError::NotFound(email.to_string())),
        }
    }

    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<User, RepositoryError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE users SET updated_at = ");
        builder.push_bind(Utc::now());

        if let Some(email) = &changes.email {
            builder.push(", email = ");
            builder.push_bind(email.as_str().to_string());
        }
        if let Some(password_hash) = &changes.password_hash {
            builder.push(", password_hash = ");
            builder.push_bind(password_hash.clone());
        }
        if let Some(role) = changes.role {
            builder.push(", role = ");
            builder.push_bind(role.as_str());
        }

        builder.push(" WHERE id = ");
        builder.push_bind(id.0);
        builder.push(" RETURNING ");
        builder.push(USER_COLUMNS);

        let key = changes
            .email
            .as_ref()
            .map(|email| email.as_str())
            .unwrap_or_default();

        let row = builder
            .build_query_as::<UserRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| write_error(e, key))?;

        match row {
            Some(r) => User::try_from(r),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

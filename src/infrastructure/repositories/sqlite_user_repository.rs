use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::repositories::{RepositoryError, RepositoryResult, UserRepository};
use crate::domain::user::User;

/// SQLite implementation of UserRepository
///
/// One statement per operation; connections are checked out of the pool for
/// the duration of a single statement and released on every exit path. The
/// UNIQUE constraint on `email` is the authoritative uniqueness guarantee;
/// violations are remapped to [`RepositoryError::DuplicateEmail`].
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

const SELECT_COLUMNS: &str = "id, name, email, age, created_at, updated_at";

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the users table if it does not exist
    ///
    /// The schema is a single table with no indices beyond the primary key
    /// and the email uniqueness constraint. Run once at startup.
    pub async fn migrate(pool: &SqlitePool) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL UNIQUE,
                age         INTEGER NOT NULL,
                created_at  TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }
}

/// Maps a sqlx error to the repository error space, detecting unique
/// violations so callers see the same conflict regardless of which path
/// caught it
fn write_error(email: &str, e: sqlx::Error) -> RepositoryError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => RepositoryError::DuplicateEmail(email.to_string()),
        _ => db_error(e),
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(e.to_string())
}

/// Reconstructs a User from a row; ids and timestamps are stored as TEXT
fn map_row(row: &SqliteRow) -> RepositoryResult<User> {
    let id: String = row.try_get("id").map_err(db_error)?;
    let id = Uuid::parse_str(&id)
        .map_err(|e| RepositoryError::Database(format!("Invalid id in database: {}", e)))?;

    let created_at: String = row.try_get("created_at").map_err(db_error)?;
    let updated_at: String = row.try_get("updated_at").map_err(db_error)?;
    let created_at = parse_timestamp(&created_at)?;
    let updated_at = parse_timestamp(&updated_at)?;

    Ok(User::from_persistence(
        id,
        row.try_get("name").map_err(db_error)?,
        row.try_get("email").map_err(db_error)?,
        row.try_get("age").map_err(db_error)?,
        created_at,
        updated_at,
    ))
}

fn parse_timestamp(raw: &str) -> RepositoryResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Database(format!("Invalid timestamp in database: {}", e)))
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: &User) -> RepositoryResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, age, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(&user.email, e))?;

        tracing::info!(user_id = %user.id, "Created user");
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            SELECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE email = ?1",
            SELECT_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.as_ref().map(map_row).transpose()
    }

    async fn get_all(&self, skip: u64, limit: u64) -> RepositoryResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at, id LIMIT ?1 OFFSET ?2",
            SELECT_COLUMNS
        ))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .bind(i64::try_from(skip).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.iter().map(map_row).collect()
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let total: i64 = row.try_get("total").map_err(db_error)?;
        Ok(total as u64)
    }

    async fn update(&self, user: &User) -> RepositoryResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?2, email = ?3, age = ?4, updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(user.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(&user.email, e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(user.id));
        }

        tracing::info!(user_id = %user.id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(deleted)
    }
}

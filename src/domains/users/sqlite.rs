//! In-memory SQLite implementation of [`UserStore`].
//!
//! The pool holds exactly one connection that is never recycled: an
//! in-memory SQLite database lives only as long as its connection, and a
//! single connection also serializes every write. The connection must not
//! be closed, expired or health-checked away, or the store would silently
//! reopen as an empty database without a schema.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::{debug, info};

use super::error::StoreError;
use super::model::User;
use super::store::{SAMPLE_USERS, UserStore};

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL
);
";

/// Internal row struct for SQLite deserialization.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, StoreError> {
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| StoreError::Corrupt(format!("invalid created_at: {e}")))?
            .with_timezone(&Utc);

        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at,
        })
    }
}

/// Escape `LIKE` wildcards so the filter matches literally.
fn like_pattern(filter: &str) -> String {
    let mut escaped = String::with_capacity(filter.len() + 2);
    escaped.push('%');
    for c in filter.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// User store backed by a private in-memory SQLite database.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Open an empty in-memory store and create the schema.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .test_before_acquire(false)
            .connect_with(options)
            .await?;

        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        debug!("User store schema created");

        Ok(Self { pool })
    }

    /// Open an in-memory store seeded with [`SAMPLE_USERS`].
    pub async fn with_sample_data() -> Result<Self, StoreError> {
        let store = Self::in_memory().await?;
        for (name, email) in SAMPLE_USERS {
            store.insert(name, email).await?;
        }
        info!("User store seeded with {} sample users", SAMPLE_USERS.len());
        Ok(store)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn query(&self, name_filter: Option<&str>, limit: u32) -> Result<Vec<User>, StoreError> {
        let pattern = name_filter.map(like_pattern);

        let rows: Vec<UserRow> = sqlx::query_as(
            r"SELECT id, name, email, created_at
             FROM users
             WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\'
             ORDER BY id ASC
             LIMIT ?2",
        )
        .bind(pattern)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn insert(&self, name: &str, email: &str) -> Result<i64, StoreError> {
        let created_at = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)")
            .bind(name)
            .bind(email)
            .bind(&created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::unique_violation(email)
                }
                other => StoreError::Database(other),
            })?;

        let id = result.last_insert_rowid();
        debug!(id, email, "Inserted user");
        Ok(id)
    }

    async fn all(&self) -> Result<Vec<User>, StoreError> {
        let rows: Vec<UserRow> =
            sqlx::query_as("SELECT id, name, email, created_at FROM users ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }
}

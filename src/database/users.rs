// ABOUTME: User management database operations
// ABOUTME: Handles account creation and lookup by email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Caloriq

use super::Database;
use crate::models::User;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

/// Outcome of inserting a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInsert {
    /// Row written
    Created,
    /// Another account already owns the email
    EmailTaken,
}

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                first_name TEXT NOT NULL DEFAULT '',
                last_name TEXT NOT NULL DEFAULT '',
                name TEXT NOT NULL DEFAULT '',
                email TEXT UNIQUE NOT NULL,
                mobile TEXT,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create users table")?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// A unique-constraint violation on `email` is reported as
    /// [`UserInsert::EmailTaken`] rather than an error, so concurrent
    /// registrations of the same address resolve cleanly.
    ///
    /// # Errors
    ///
    /// Returns an error for any other database failure
    pub async fn create_user(&self, user: &User) -> Result<UserInsert> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, first_name, last_name, name, email, mobile, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.mobile)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(UserInsert::Created),
            Err(sqlx::Error::Database(db_error)) if db_error.is_unique_violation() => {
                Ok(UserInsert::EmailTaken)
            }
            Err(e) => Err(e).context("Failed to insert user"),
        }
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r"
            SELECT id, first_name, last_name, name, email, mobile, password_hash, created_at
            FROM users WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to query user by email")?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Number of registered users
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count users")?;
        Ok(row.get("count"))
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.get("id");
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .context("Invalid created_at in users row")?;

        Ok(User {
            id: Uuid::parse_str(&id).with_context(|| format!("Invalid user id {id}"))?,
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            name: row.get("name"),
            email: row.get("email"),
            mobile: row.get("mobile"),
            password_hash: row.get("password_hash"),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    fn user(email: &str) -> User {
        User::new(
            "Grace".to_owned(),
            "Hopper".to_owned(),
            email.to_owned(),
            Some("555-0199".to_owned()),
            "$2b$04$hash".to_owned(),
        )
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = memory_db().await;
        let original = user("grace@example.com");

        assert_eq!(db.create_user(&original).await.unwrap(), UserInsert::Created);

        let fetched = db
            .get_user_by_email("grace@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.id, original.id);
        assert_eq!(fetched.name, "Grace Hopper");
        assert_eq!(fetched.mobile.as_deref(), Some("555-0199"));
        assert_eq!(fetched.created_at, original.created_at);
        assert_eq!(db.get_user_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_reported() {
        let db = memory_db().await;
        db.create_user(&user("dup@example.com")).await.unwrap();

        let second = db.create_user(&user("dup@example.com")).await.unwrap();
        assert_eq!(second, UserInsert::EmailTaken);
        assert_eq!(db.get_user_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_email_is_none() {
        let db = memory_db().await;
        assert!(db
            .get_user_by_email("nobody@example.com")
            .await
            .unwrap()
            .is_none());
    }
}

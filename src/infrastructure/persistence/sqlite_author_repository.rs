//! SQLite implementation of the author repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Author, DEFAULT_AVATAR, NewAuthor, NewUser, ProfilePatch, User};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

const AUTHOR_COLUMNS: &str = "id, user_id, name, avatar, count";

pub struct SqliteAuthorRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAuthorRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

fn username_conflict(username: &str) -> AppError {
    AppError::conflict(
        "Username already taken",
        json!({ "username": username }),
    )
}

#[async_trait]
impl AuthorRepository for SqliteAuthorRepository {
    async fn register(
        &self,
        new_user: NewUser,
        new_author: NewAuthor,
    ) -> Result<(User, Author), AppError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email) VALUES (?, ?) \
             RETURNING id, username, email",
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                username_conflict(&new_user.username)
            } else {
                e.into()
            }
        })?;

        let avatar = new_author
            .avatar
            .unwrap_or_else(|| DEFAULT_AVATAR.to_string());

        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (user_id, name, avatar) VALUES (?, ?, ?) \
             RETURNING id, user_id, name, avatar, count",
        )
        .bind(user.id)
        .bind(&new_author.name)
        .bind(&avatar)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((user, author))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(author)
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Author>, AppError> {
        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(author)
    }

    async fn update_profile(
        &self,
        user_id: i64,
        patch: ProfilePatch,
    ) -> Result<Author, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if current.is_none() {
            return Err(AppError::not_found(
                "Author not found",
                json!({ "user_id": user_id }),
            ));
        }

        if let Some(username) = &patch.username {
            sqlx::query("UPDATE users SET username = ? WHERE id = ?")
                .bind(username)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    if is_unique_violation(&e) {
                        username_conflict(username)
                    } else {
                        e.into()
                    }
                })?;
        }

        if let Some(email) = &patch.email {
            sqlx::query("UPDATE users SET email = ? WHERE id = ?")
                .bind(email)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(name) = &patch.name {
            sqlx::query("UPDATE authors SET name = ? WHERE user_id = ?")
                .bind(name)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        if let Some(avatar) = &patch.avatar {
            sqlx::query("UPDATE authors SET avatar = ? WHERE user_id = ?")
                .bind(avatar)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }

        let author = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors WHERE user_id = ?"
        ))
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(author)
    }

    async fn popular(&self, limit: i64) -> Result<Vec<Author>, AppError> {
        let authors = sqlx::query_as::<_, Author>(&format!(
            "SELECT {AUTHOR_COLUMNS} FROM authors ORDER BY count DESC, id ASC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(authors)
    }
}

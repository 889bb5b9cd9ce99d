//! SQLite implementation of the question repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{NewQuestion, Question, Tag};
use crate::domain::repositories::QuestionRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

const QUESTION_COLUMNS: &str = "id, title, body, author_id, created_at, rating";

pub struct SqliteQuestionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteQuestionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

/// Resolves a tag name to a row id, creating the tag when absent.
///
/// Creation can lose a race against a concurrent request inserting the same
/// name; the unique violation is treated as "the row exists now" and the
/// lookup is retried instead of propagating a conflict.
async fn resolve_tag(conn: &mut SqliteConnection, name: &str) -> Result<i64, AppError> {
    if let Some(id) = sqlx::query_scalar::<_, i64>("SELECT id FROM tags WHERE name = ?")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?
    {
        return Ok(id);
    }

    match sqlx::query_scalar::<_, i64>("INSERT INTO tags (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    {
        Ok(id) => Ok(id),
        Err(e) if is_unique_violation(&e) => {
            sqlx::query_scalar::<_, i64>("SELECT id FROM tags WHERE name = ?")
                .bind(name)
                .fetch_one(&mut *conn)
                .await
                .map_err(Into::into)
        }
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl QuestionRepository for SqliteQuestionRepository {
    async fn create(&self, new_question: NewQuestion) -> Result<Question, AppError> {
        let mut tx = self.pool.begin().await?;

        let question = sqlx::query_as::<_, Question>(
            "INSERT INTO questions (title, body, author_id, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, title, body, author_id, created_at, rating",
        )
        .bind(&new_question.title)
        .bind(&new_question.body)
        .bind(new_question.author_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for name in &new_question.tags {
            let tag_id = resolve_tag(&mut tx, name).await?;

            sqlx::query("INSERT INTO question_tags (question_id, tag_id) VALUES (?, ?)")
                .bind(question.id)
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query("UPDATE tags SET count = count + 1 WHERE id = ?")
                .bind(tag_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE authors SET count = count + 1 WHERE id = ?")
            .bind(new_question.author_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(question)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(question)
    }

    async fn latest_id(&self) -> Result<Option<i64>, AppError> {
        let id = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM questions")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(id)
    }

    async fn list_newest(&self, limit: i64, offset: i64) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(questions)
    }

    async fn list_hottest(&self, limit: i64, offset: i64) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             ORDER BY rating DESC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(questions)
    }

    async fn list_by_tag(
        &self,
        tag: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT q.id, q.title, q.body, q.author_id, q.created_at, q.rating \
             FROM questions q \
             JOIN question_tags qt ON qt.question_id = q.id \
             JOIN tags t ON t.id = qt.tag_id \
             WHERE t.name = ? \
             ORDER BY q.id ASC LIMIT ? OFFSET ?",
        )
        .bind(tag)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(questions)
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Question>, AppError> {
        let questions = sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE author_id = ? \
             ORDER BY rating DESC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(author_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(questions)
    }

    async fn count_all(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn count_by_tag(&self, tag: &str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM question_tags qt \
             JOIN tags t ON t.id = qt.tag_id WHERE t.name = ?",
        )
        .bind(tag)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions WHERE author_id = ?")
                .bind(author_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }

    async fn tags_of(&self, question_id: i64) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.count FROM tags t \
             JOIN question_tags qt ON qt.tag_id = t.id \
             WHERE qt.question_id = ? ORDER BY t.name",
        )
        .bind(question_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(tags)
    }
}

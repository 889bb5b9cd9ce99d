//! SQLite implementation of the answer repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Answer, NewAnswer};
use crate::domain::repositories::AnswerRepository;
use crate::error::AppError;

const ANSWER_COLUMNS: &str = "id, question_id, author_id, body, created_at, rating, is_correct";

pub struct SqliteAnswerRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAnswerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for SqliteAnswerRepository {
    async fn create(&self, new_answer: NewAnswer) -> Result<Answer, AppError> {
        let mut tx = self.pool.begin().await?;

        // The question must still exist; checked inside the transaction so
        // a failed insert leaves the author counter untouched.
        let question_exists =
            sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE id = ?")
                .bind(new_answer.question_id)
                .fetch_optional(&mut *tx)
                .await?;

        if question_exists.is_none() {
            return Err(AppError::not_found(
                "Question not found",
                json!({ "question_id": new_answer.question_id }),
            ));
        }

        let answer = sqlx::query_as::<_, Answer>(
            "INSERT INTO answers (question_id, author_id, body, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, question_id, author_id, body, created_at, rating, is_correct",
        )
        .bind(new_answer.question_id)
        .bind(new_answer.author_id)
        .bind(&new_answer.body)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE authors SET count = count + 1 WHERE id = ?")
            .bind(new_answer.author_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(answer)
    }

    async fn list_for_question(
        &self,
        question_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Answer>, AppError> {
        let answers = sqlx::query_as::<_, Answer>(&format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = ? \
             ORDER BY rating DESC, id ASC LIMIT ? OFFSET ?"
        ))
        .bind(question_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(answers)
    }

    async fn count_for_question(&self, question_id: i64) -> Result<i64, AppError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM answers WHERE question_id = ?")
                .bind(question_id)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}

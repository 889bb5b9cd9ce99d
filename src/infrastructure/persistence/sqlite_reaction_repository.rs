//! SQLite implementation of the reaction repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{AnswerReaction, QuestionReaction, ReactionState};
use crate::domain::repositories::ReactionRepository;
use crate::error::AppError;

pub struct SqliteReactionRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteReactionRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReactionRepository for SqliteReactionRepository {
    async fn cast_on_question(
        &self,
        author_id: i64,
        question_id: i64,
        state: ReactionState,
    ) -> Result<(QuestionReaction, i64), AppError> {
        let mut tx = self.pool.begin().await?;

        let target = sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE id = ?")
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?;

        if target.is_none() {
            return Err(AppError::not_found(
                "Question not found",
                json!({ "question_id": question_id }),
            ));
        }

        let row = sqlx::query(
            "INSERT INTO question_reactions (author_id, question_id, state) \
             VALUES (?, ?, ?) \
             RETURNING id, author_id, question_id, state",
        )
        .bind(author_id)
        .bind(question_id)
        .bind(state.to_db())
        .fetch_one(&mut *tx)
        .await?;

        let reaction = QuestionReaction {
            id: row.get("id"),
            author_id: row.get("author_id"),
            question_id: row.get("question_id"),
            state: ReactionState::from_db(row.get("state")),
        };

        // The rating moves by a relative delta so concurrent casts on the
        // same target cannot lose each other's update.
        let rating = sqlx::query_scalar::<_, i64>(
            "UPDATE questions SET rating = rating + ? WHERE id = ? RETURNING rating",
        )
        .bind(state.delta())
        .bind(question_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((reaction, rating))
    }

    async fn cast_on_answer(
        &self,
        author_id: i64,
        answer_id: i64,
        state: ReactionState,
    ) -> Result<(AnswerReaction, i64), AppError> {
        let mut tx = self.pool.begin().await?;

        let target = sqlx::query_scalar::<_, i64>("SELECT id FROM answers WHERE id = ?")
            .bind(answer_id)
            .fetch_optional(&mut *tx)
            .await?;

        if target.is_none() {
            return Err(AppError::not_found(
                "Answer not found",
                json!({ "answer_id": answer_id }),
            ));
        }

        let row = sqlx::query(
            "INSERT INTO answer_reactions (author_id, answer_id, state) \
             VALUES (?, ?, ?) \
             RETURNING id, author_id, answer_id, state",
        )
        .bind(author_id)
        .bind(answer_id)
        .bind(state.to_db())
        .fetch_one(&mut *tx)
        .await?;

        let reaction = AnswerReaction {
            id: row.get("id"),
            author_id: row.get("author_id"),
            answer_id: row.get("answer_id"),
            state: ReactionState::from_db(row.get("state")),
        };

        let rating = sqlx::query_scalar::<_, i64>(
            "UPDATE answers SET rating = rating + ? WHERE id = ? RETURNING rating",
        )
        .bind(state.delta())
        .bind(answer_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((reaction, rating))
    }
}

//! Repository trait for answer writes and per-question listings.

use crate::domain::entities::{Answer, NewAnswer};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Creates an answer in one transaction, incrementing the author's
    /// `count` alongside the insert.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the question no longer exists; the
    /// check happens inside the transaction, before any counter moves.
    async fn create(&self, new_answer: NewAnswer) -> Result<Answer, AppError>;

    /// Answers for a question, ordered by rating descending with id
    /// ascending as tiebreak.
    async fn list_for_question(
        &self,
        question_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Answer>, AppError>;

    async fn count_for_question(&self, question_id: i64) -> Result<i64, AppError>;
}

//! Repository trait for vote casting.

use crate::domain::entities::{AnswerReaction, QuestionReaction, ReactionState};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reactions.
///
/// Casting always inserts a fresh reaction row and applies its delta to the
/// target's rating in the same transaction; the new rating is read back
/// before commit. Prior reactions from the same author are not consulted,
/// so repeated casts accumulate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    /// Records a reaction on a question and returns the inserted row with
    /// the question's updated rating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the question does not exist.
    async fn cast_on_question(
        &self,
        author_id: i64,
        question_id: i64,
        state: ReactionState,
    ) -> Result<(QuestionReaction, i64), AppError>;

    /// Records a reaction on an answer and returns the inserted row with
    /// the answer's updated rating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the answer does not exist.
    async fn cast_on_answer(
        &self,
        author_id: i64,
        answer_id: i64,
        state: ReactionState,
    ) -> Result<(AnswerReaction, i64), AppError>;
}

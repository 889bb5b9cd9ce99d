//! Vote casting service.

use std::sync::Arc;

use crate::domain::entities::{ReactionState, ReactionTarget};
use crate::domain::repositories::{AuthorRepository, ReactionRepository};
use crate::error::AppError;
use serde_json::json;

/// Service for casting reactions on questions and answers.
///
/// Every cast inserts a fresh reaction row and moves the target's rating by
/// that row's delta inside one transaction. Earlier reactions from the same
/// author are not replaced: an up followed by a down from one author nets a
/// rating change of zero via two rows, not a swapped vote.
pub struct ReactionService<R: ReactionRepository, U: AuthorRepository> {
    reactions: Arc<R>,
    authors: Arc<U>,
}

impl<R: ReactionRepository, U: AuthorRepository> ReactionService<R, U> {
    pub fn new(reactions: Arc<R>, authors: Arc<U>) -> Self {
        Self { reactions, authors }
    }

    /// Casts a reaction and returns the target's updated rating.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author or the target does not
    /// exist; the target's rating is untouched in that case.
    pub async fn cast(
        &self,
        author_id: i64,
        target: ReactionTarget,
        state: ReactionState,
    ) -> Result<i64, AppError> {
        self.authors
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Author not found", json!({ "author_id": author_id }))
            })?;

        let rating = match target {
            ReactionTarget::Question(question_id) => {
                let (_, rating) = self
                    .reactions
                    .cast_on_question(author_id, question_id, state)
                    .await?;
                rating
            }
            ReactionTarget::Answer(answer_id) => {
                let (_, rating) = self
                    .reactions
                    .cast_on_answer(author_id, answer_id, state)
                    .await?;
                rating
            }
        };

        tracing::debug!(author_id, ?target, ?state, rating, "reaction cast");
        Ok(rating)
    }
}

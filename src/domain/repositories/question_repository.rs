//! Repository trait for question writes and ranked listings.

use crate::domain::entities::{NewQuestion, Question, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for questions.
///
/// # Ordering contracts
///
/// Listing methods promise deterministic order:
///
/// - newest: `created_at` descending, id descending
/// - hottest / by author: `rating` descending, id ascending
/// - by tag: id ascending
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteQuestionRepository`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Creates a question with its tag associations in one transaction.
    ///
    /// Within the transaction: the question row is inserted, each distinct
    /// tag name in `new_question.tags` is resolved to an existing tag or a
    /// freshly created one, the association is recorded once per tag, every
    /// associated tag's `count` moves by +1, and the author's `count` moves
    /// by +1. On any failure nothing is committed.
    async fn create(&self, new_question: NewQuestion) -> Result<Question, AppError>;

    /// Finds a question by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Question>, AppError>;

    /// Returns the id of the most recently inserted question, if any.
    async fn latest_id(&self) -> Result<Option<i64>, AppError>;

    /// Questions ordered newest first.
    async fn list_newest(&self, limit: i64, offset: i64) -> Result<Vec<Question>, AppError>;

    /// Questions ordered by rating descending.
    async fn list_hottest(&self, limit: i64, offset: i64) -> Result<Vec<Question>, AppError>;

    /// Questions carrying the given tag, in natural id order. An unknown
    /// tag name yields an empty list.
    async fn list_by_tag(
        &self,
        tag: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Question>, AppError>;

    /// Questions by one author, ordered by rating descending.
    async fn list_by_author(
        &self,
        author_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Question>, AppError>;

    async fn count_all(&self) -> Result<i64, AppError>;

    async fn count_by_tag(&self, tag: &str) -> Result<i64, AppError>;

    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;

    /// Tags associated with a question, in name order.
    async fn tags_of(&self, question_id: i64) -> Result<Vec<Tag>, AppError>;
}

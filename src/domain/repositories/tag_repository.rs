//! Repository trait for tag lookups.
//!
//! Tag creation is not exposed here: tags come into existence inside the
//! question-creation transaction (see
//! [`crate::domain::repositories::QuestionRepository::create`]), never on
//! their own.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists the most used tags, ordered by `count` descending with id
    /// ascending as tiebreak.
    async fn popular(&self, limit: i64) -> Result<Vec<Tag>, AppError>;
}

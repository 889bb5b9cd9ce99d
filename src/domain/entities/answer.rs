//! Answer entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An answer to a question.
///
/// `rating` is maintained like [`super::Question::rating`] from the answer's
/// own reaction rows.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub author_id: i64,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub rating: i64,
    pub is_correct: bool,
}

/// Input data for posting an answer.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: i64,
    pub author_id: i64,
    pub body: String,
}

//! Question entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A posted question.
///
/// `rating` is the sum of reaction deltas ever cast on the question
/// (+1 per up, -1 per down, 0 per retraction).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub rating: i64,
}

/// Input data for posting a question.
///
/// `tags` holds the already-parsed, distinct tag names; resolving them to
/// rows happens inside the creation transaction.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub author_id: i64,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

//! Tag entity: a topic label shared across questions.

use serde::Serialize;

/// A topic tag. Names are unique and matched case-sensitively.
///
/// `count` is the number of distinct questions currently carrying the tag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub count: i64,
}

//! Author entity: the posting profile attached to a user.

use serde::Serialize;

/// Default avatar reference for authors registered without one.
pub const DEFAULT_AVATAR: &str = "static/img/user.png";

/// A posting profile. Exactly one exists per [`super::User`].
///
/// `count` is the number of questions plus answers this author has posted,
/// maintained by the write path and used to rank popular authors.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Author {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Storage reference to the avatar image; upload handling is external.
    pub avatar: String,
    pub count: i64,
}

/// Input data for creating an author profile.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    /// `None` falls back to [`DEFAULT_AVATAR`].
    pub avatar: Option<String>,
}

/// Partial update for a user's profile.
///
/// `None` fields are left unchanged. Username and email live on the user
/// row, name and avatar on the author row.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl ProfilePatch {
    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.name.is_none()
            && self.avatar.is_none()
    }
}

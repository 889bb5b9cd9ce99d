//! Repository trait for accounts and posting profiles.

use crate::domain::entities::{Author, NewAuthor, NewUser, ProfilePatch, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for users and their author profiles.
///
/// The user and author rows form a 1:1 pair, so creation is a single
/// operation: [`AuthorRepository::register`] inserts both in one
/// transaction, which is what keeps the "exactly one author per user"
/// invariant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Creates a user row and its author profile in one transaction.
    ///
    /// The new author starts with `count = 0` and the default avatar when
    /// none is given.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is already taken.
    async fn register(
        &self,
        new_user: NewUser,
        new_author: NewAuthor,
    ) -> Result<(User, Author), AppError>;

    /// Finds an author profile by its id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError>;

    /// Finds the author profile belonging to a user.
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Author>, AppError>;

    /// Partially updates a user's profile.
    ///
    /// Only fields present in [`ProfilePatch`] are modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no author profile.
    /// Returns [`AppError::Conflict`] if a new username is already taken.
    async fn update_profile(&self, user_id: i64, patch: ProfilePatch)
    -> Result<Author, AppError>;

    /// Lists the most active authors, ordered by `count` descending with id
    /// ascending as tiebreak.
    async fn popular(&self, limit: i64) -> Result<Vec<Author>, AppError>;
}

//! Registration and profile management service.
//!
//! Credentials and sessions are handled outside this crate; registration
//! here records identity data and creates the author profile that the
//! posting services act on behalf of.

use std::sync::Arc;

use crate::application::commands::{RegisterCommand, UpdateProfileCommand};
use crate::domain::entities::{Author, NewAuthor, NewUser, ProfilePatch, User};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;
use validator::Validate;

pub struct AccountService<U: AuthorRepository> {
    authors: Arc<U>,
}

impl<U: AuthorRepository> AccountService<U> {
    pub fn new(authors: Arc<U>) -> Self {
        Self { authors }
    }

    /// Registers an account: one user row plus its author profile, created
    /// together.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a malformed command and
    /// [`AppError::Conflict`] for a taken username.
    pub async fn register(&self, cmd: RegisterCommand) -> Result<(User, Author), AppError> {
        cmd.validate()?;

        let (user, author) = self
            .authors
            .register(
                NewUser {
                    username: cmd.username,
                    email: cmd.email,
                },
                NewAuthor {
                    name: cmd.name,
                    avatar: cmd.avatar,
                },
            )
            .await?;

        tracing::info!(user_id = user.id, author_id = author.id, "account registered");
        Ok((user, author))
    }

    /// Applies a partial profile update for a user.
    ///
    /// With nothing to change, returns the current profile unchanged.
    pub async fn update_profile(
        &self,
        user_id: i64,
        cmd: UpdateProfileCommand,
    ) -> Result<Author, AppError> {
        cmd.validate()?;

        let patch = ProfilePatch {
            username: cmd.username,
            email: cmd.email,
            name: cmd.name,
            avatar: cmd.avatar,
        };

        if patch.is_empty() {
            return self.authors.find_by_user_id(user_id).await?.ok_or_else(|| {
                AppError::not_found(
                    "Author not found",
                    serde_json::json!({ "user_id": user_id }),
                )
            });
        }

        self.authors.update_profile(user_id, patch).await
    }

    /// Looks up the author profile for a user.
    pub async fn author_of(&self, user_id: i64) -> Result<Option<Author>, AppError> {
        self.authors.find_by_user_id(user_id).await
    }
}

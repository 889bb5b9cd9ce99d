//! Typed command DTOs for the write path.
//!
//! Commands are validated with `validator` before any service logic runs;
//! a failed validation surfaces as [`crate::error::AppError::Validation`]
//! and nothing is written.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

/// Maximum question title length.
pub const MAX_TITLE_LENGTH: u64 = 1024;

/// Username charset: word characters plus `. @ + -`.
static USERNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

/// Request to post a question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostQuestionCommand {
    #[validate(length(min = 1, max = 1024, message = "Title must be 1-1024 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,

    /// Free-text tag list, split on whitespace by the tag parser.
    #[serde(default)]
    pub tags: String,
}

/// Request to post an answer to a question.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PostAnswerCommand {
    pub question_id: i64,

    #[validate(length(min = 1, message = "Body must not be empty"))]
    pub body: String,
}

/// Request to register an account.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterCommand {
    #[validate(length(min = 1, max = 150))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may contain letters, digits and . @ + - _"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    /// Display name shown on posts.
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    /// Storage reference to an uploaded avatar, when one was provided.
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Partial profile update. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileCommand {
    #[validate(length(min = 1, max = 150))]
    #[validate(regex(
        path = "*USERNAME_REGEX",
        message = "Username may contain letters, digits and . @ + - _"
    ))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    pub avatar: Option<String>,
}

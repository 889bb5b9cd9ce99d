//! Core domain entities representing the board's data model.
//!
//! Entities are plain data structures without business logic. Creation uses
//! separate `New*` structs; partial updates use patch structs with `Option`
//! fields.
//!
//! # Entity Types
//!
//! - [`User`] - A registered account (identity data only)
//! - [`Author`] - The posting profile attached 1:1 to a user
//! - [`Tag`] - A topic label shared across questions
//! - [`Question`] / [`Answer`] - The content entities
//! - [`QuestionReaction`] / [`AnswerReaction`] - Up/down votes
//!
//! The `count` and `rating` fields on [`Author`], [`Tag`], [`Question`] and
//! [`Answer`] are denormalized aggregates: they are maintained incrementally
//! by the write path and must always equal what a re-scan of the underlying
//! rows would produce.

pub mod answer;
pub mod author;
pub mod question;
pub mod reaction;
pub mod tag;
pub mod user;

pub use answer::{Answer, NewAnswer};
pub use author::{Author, DEFAULT_AVATAR, NewAuthor, ProfilePatch};
pub use question::{NewQuestion, Question};
pub use reaction::{AnswerReaction, QuestionReaction, ReactionState, ReactionTarget};
pub use tag::Tag;
pub use user::{NewUser, User};

//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern;
//! concrete implementations live in `crate::infrastructure::persistence`.
//! Each write operation is a single transaction: the entity row and every
//! affected counter commit together or not at all.
//!
//! # Available Repositories
//!
//! - [`AuthorRepository`] - Accounts and posting profiles
//! - [`TagRepository`] - Tag lookups and popularity
//! - [`QuestionRepository`] - Question writes (with tag resolution) and
//!   ranked listings
//! - [`AnswerRepository`] - Answer writes and per-question listings
//! - [`ReactionRepository`] - Vote casting
//!
//! Mock implementations are auto-generated via `mockall` under `cfg(test)`.

pub mod answer_repository;
pub mod author_repository;
pub mod question_repository;
pub mod reaction_repository;
pub mod tag_repository;

pub use answer_repository::AnswerRepository;
pub use author_repository::AuthorRepository;
pub use question_repository::QuestionRepository;
pub use reaction_repository::ReactionRepository;
pub use tag_repository::TagRepository;

#[cfg(test)]
pub use answer_repository::MockAnswerRepository;
#[cfg(test)]
pub use author_repository::MockAuthorRepository;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use reaction_repository::MockReactionRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;

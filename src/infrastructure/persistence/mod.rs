//! SQLite implementations of the domain repositories.
//!
//! All writes follow the same shape: open a transaction, insert the entity
//! row, apply every affected counter as a relative delta
//! (`SET count = count + ?`), commit. An error anywhere drops the
//! transaction and rolls everything back, so counters can never drift from
//! the rows they summarize.

pub mod sqlite_answer_repository;
pub mod sqlite_author_repository;
pub mod sqlite_question_repository;
pub mod sqlite_reaction_repository;
pub mod sqlite_tag_repository;

pub use sqlite_answer_repository::SqliteAnswerRepository;
pub use sqlite_author_repository::SqliteAuthorRepository;
pub use sqlite_question_repository::SqliteQuestionRepository;
pub use sqlite_reaction_repository::SqliteReactionRepository;
pub use sqlite_tag_repository::SqliteTagRepository;
